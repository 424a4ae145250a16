//! Request DTOs with validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use shelf_entity::share::{SharePermission, ShareTargetKind};

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address.
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    /// Display name.
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token refresh request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    /// Refresh token.
    pub refresh_token: String,
}

/// Profile and credential update request. All fields optional; a password
/// change requires both `current_password` and `new_password`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    /// New display name.
    pub name: Option<String>,
    /// New email address.
    pub email: Option<String>,
    /// Current password, required when changing the password.
    pub current_password: Option<String>,
    /// New password.
    pub new_password: Option<String>,
}

/// Create folder request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateFolderRequest {
    /// Virtual path of the folder to create, e.g. `/photos/2024/`.
    #[validate(length(min = 1, message = "Prefix is required"))]
    pub prefix: String,
}

/// Rename folder request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RenameFolderRequest {
    /// Virtual path of the folder to rename.
    #[validate(length(min = 1, message = "Prefix is required"))]
    pub prefix: String,
    /// New name for the last path segment.
    #[validate(length(min = 1, message = "New name is required"))]
    pub new_name: String,
}

/// Folder selector for listing and deletion.
#[derive(Debug, Clone, Deserialize)]
pub struct PrefixQuery {
    /// Virtual path; defaults to the root for listings.
    pub prefix: Option<String>,
}

/// File metadata update request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateObjectRequest {
    /// New file name.
    pub name: Option<String>,
    /// New description; an empty string clears it.
    pub description: Option<String>,
    /// Replacement tag set; omitted leaves tags untouched.
    pub tags: Option<Vec<String>>,
}

/// Move request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MoveObjectRequest {
    /// Destination folder path.
    #[validate(length(min = 1, message = "New prefix is required"))]
    pub new_prefix: String,
}

/// Copy request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopyObjectRequest {
    /// Destination folder path; defaults to the source folder.
    pub new_prefix: Option<String>,
}

/// Create share request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateShareRequest {
    /// Whether the target is a single file or a folder subtree.
    pub target_kind: ShareTargetKind,
    /// Entry being shared.
    pub target_id: Uuid,
    /// User receiving access.
    pub grantee_id: Uuid,
    /// Granted permission level.
    pub permission: SharePermission,
}

/// Create access link request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLinkRequest {
    /// File to expose.
    pub entry_id: Uuid,
    /// Link lifetime in seconds.
    pub expires_in_seconds: i64,
}

/// Create tag request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTagRequest {
    /// Tag name.
    #[validate(length(min = 1, message = "Tag name is required"))]
    pub name: String,
}

/// Quota limit update request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateQuotaRequest {
    /// New storage limit in bytes.
    pub storage_limit: i64,
}

/// Tag search query.
#[derive(Debug, Clone, Deserialize)]
pub struct TagQuery {
    /// Tag name to match.
    pub tag: String,
}

/// Date range search query.
#[derive(Debug, Clone, Deserialize)]
pub struct DateRangeQuery {
    /// Inclusive range start.
    pub from: DateTime<Utc>,
    /// Inclusive range end.
    pub to: DateTime<Utc>,
}

/// Keyword search query.
#[derive(Debug, Clone, Deserialize)]
pub struct KeywordQuery {
    /// Substring to match against names and descriptions.
    pub q: String,
}
