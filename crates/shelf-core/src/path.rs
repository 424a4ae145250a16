//! Prefix path normalization for the virtual filesystem.
//!
//! Every entry in the namespace carries a `prefix` string in canonical
//! form: either `/` (the root) or `/seg1/.../segN/`. Hierarchy exists
//! only in these strings, so every folder operation starts by funnelling
//! caller input through [`normalize_prefix`]. The helpers here are pure
//! string functions; none of them touch the database.

/// Normalize a raw prefix into canonical form.
///
/// The canonical form is `/` for the root, otherwise `/` + segments + `/`.
/// At most one leading and one trailing slash are stripped from the input
/// before re-wrapping, so the function is idempotent on its own output.
/// Interior segments are not validated; `a//b` keeps its empty segment.
pub fn normalize_prefix(raw: &str) -> String {
    if raw == "/" {
        return "/".to_string();
    }
    let stripped = raw.strip_prefix('/').unwrap_or(raw);
    let stripped = stripped.strip_suffix('/').unwrap_or(stripped);
    format!("/{stripped}/")
}

/// The last path segment of a normalized prefix, i.e. the folder's own name.
///
/// Returns `None` for the root and for prefixes whose final segment is
/// empty (`//`, `/a//`): a folder row's prefix must end with its own name,
/// so such prefixes cannot name a folder.
pub fn leaf_name(prefix: &str) -> Option<&str> {
    let body = prefix.strip_suffix('/')?;
    if body.is_empty() {
        return None;
    }
    let leaf = match body.rfind('/') {
        Some(idx) => &body[idx + 1..],
        None => body,
    };
    if leaf.is_empty() { None } else { Some(leaf) }
}

/// Swap the final segment of a normalized prefix for `new_name`.
///
/// Returns `None` for the root, which has no segment to replace.
pub fn replace_leaf(prefix: &str, new_name: &str) -> Option<String> {
    let body = prefix.strip_suffix('/')?;
    if body.is_empty() {
        return None;
    }
    let parent_end = body.rfind('/').map(|idx| idx + 1).unwrap_or(0);
    Some(format!("{}{}/", &prefix[..parent_end], new_name))
}

/// The containing prefix of a normalized prefix (`/a/b/` -> `/a/`).
///
/// The root is its own parent.
pub fn parent_prefix(prefix: &str) -> &str {
    let Some(body) = prefix.strip_suffix('/') else {
        return prefix;
    };
    if body.is_empty() {
        return prefix;
    }
    match body.rfind('/') {
        Some(idx) => &prefix[..=idx],
        None => prefix,
    }
}

/// The non-empty segments of a normalized prefix, in order.
///
/// Used to render breadcrumb navigation; the root yields an empty list.
pub fn breadcrumbs(prefix: &str) -> Vec<String> {
    prefix
        .split('/')
        .filter(|seg| !seg.is_empty())
        .map(str::to_string)
        .collect()
}

/// Whether `candidate` lies strictly below `base` (both normalized).
pub fn is_strict_descendant(candidate: &str, base: &str) -> bool {
    candidate != base && candidate.starts_with(base)
}

/// The first segment of `entry_prefix` past `base`, if the entry lies
/// below `base`.
///
/// This is the partition rule for directory listings: a row whose prefix
/// extends the listed prefix contributes its first extra segment as a
/// subfolder name. Returns `None` for rows at or outside `base` and for
/// remainders with no non-empty segment.
pub fn child_segment<'a>(entry_prefix: &'a str, base: &str) -> Option<&'a str> {
    let remainder = entry_prefix.strip_prefix(base)?;
    remainder.split('/').find(|seg| !seg.is_empty())
}
