//! In-memory namespace store.
//!
//! Mirrors the PostgreSQL repository closely enough for service-level
//! tests: prefix scans, subtree rewrites, and the one-folder-per-prefix
//! conflict all behave the same way. Not intended for production use.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use shelf_core::error::AppError;
use shelf_core::path::is_strict_descendant;
use shelf_core::result::AppResult;
use shelf_entity::entry::{NewEntry, StorageEntry};

use crate::namespace::NamespaceStore;

/// Namespace store backed by a mutex-guarded map.
#[derive(Debug, Default)]
pub struct MemoryNamespaceStore {
    entries: Mutex<HashMap<Uuid, StorageEntry>>,
}

impl MemoryNamespaceStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the store holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

fn sort_listing(entries: &mut [StorageEntry]) {
    entries.sort_by(|a, b| a.prefix.cmp(&b.prefix).then_with(|| a.name.cmp(&b.name)));
}

#[async_trait]
impl NamespaceStore for MemoryNamespaceStore {
    async fn insert(&self, entry: &NewEntry) -> AppResult<StorageEntry> {
        let mut entries = self.entries.lock().await;
        if entry.is_folder
            && entries
                .values()
                .any(|e| e.user_id == entry.user_id && e.is_folder && e.prefix == entry.prefix)
        {
            return Err(AppError::conflict(format!(
                "A folder already exists at '{}'",
                entry.prefix
            )));
        }
        let now = Utc::now();
        let stored = StorageEntry {
            id: entry.id,
            user_id: entry.user_id,
            name: entry.name.clone(),
            prefix: entry.prefix.clone(),
            is_folder: entry.is_folder,
            size: entry.size,
            mime_type: entry.mime_type.clone(),
            bucket: entry.bucket.clone(),
            description: entry.description.clone(),
            metadata: entry.metadata.clone(),
            created_at: now,
            updated_at: now,
        };
        entries.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn find_entry(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<StorageEntry>> {
        let entries = self.entries.lock().await;
        Ok(entries.get(&id).filter(|e| e.user_id == user_id).cloned())
    }

    async fn find_file(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<StorageEntry>> {
        let entries = self.entries.lock().await;
        Ok(entries
            .get(&id)
            .filter(|e| e.user_id == user_id && !e.is_folder)
            .cloned())
    }

    async fn exists_at(&self, user_id: Uuid, prefix: &str) -> AppResult<bool> {
        let entries = self.entries.lock().await;
        Ok(entries
            .values()
            .any(|e| e.user_id == user_id && e.prefix == prefix))
    }

    async fn exists_under(&self, user_id: Uuid, prefix: &str) -> AppResult<bool> {
        let entries = self.entries.lock().await;
        Ok(entries
            .values()
            .any(|e| e.user_id == user_id && is_strict_descendant(&e.prefix, prefix)))
    }

    async fn list_subtree(&self, user_id: Uuid, prefix: &str) -> AppResult<Vec<StorageEntry>> {
        let entries = self.entries.lock().await;
        let mut matched: Vec<StorageEntry> = entries
            .values()
            .filter(|e| e.user_id == user_id && e.prefix.starts_with(prefix))
            .cloned()
            .collect();
        sort_listing(&mut matched);
        Ok(matched)
    }

    async fn rename_subtree(
        &self,
        user_id: Uuid,
        old_prefix: &str,
        new_prefix: &str,
        new_name: &str,
    ) -> AppResult<u64> {
        let mut entries = self.entries.lock().await;
        // A folder row already sitting at a rewritten target prefix would
        // trip the unique index in PostgreSQL.
        let rewritten_prefixes: Vec<String> = entries
            .values()
            .filter(|e| e.user_id == user_id && e.is_folder && e.prefix.starts_with(old_prefix))
            .map(|e| format!("{new_prefix}{}", &e.prefix[old_prefix.len()..]))
            .collect();
        let collides = entries.values().any(|e| {
            e.user_id == user_id
                && e.is_folder
                && !e.prefix.starts_with(old_prefix)
                && rewritten_prefixes.iter().any(|p| p == &e.prefix)
        });
        if collides {
            return Err(AppError::conflict(format!(
                "A folder already exists at '{new_prefix}'"
            )));
        }
        let now = Utc::now();
        let mut rewritten = 0u64;
        for entry in entries.values_mut() {
            if entry.user_id != user_id || !entry.prefix.starts_with(old_prefix) {
                continue;
            }
            if entry.is_folder && entry.prefix == old_prefix {
                entry.name = new_name.to_string();
            }
            entry.prefix = format!("{new_prefix}{}", &entry.prefix[old_prefix.len()..]);
            entry.updated_at = now;
            rewritten += 1;
        }
        Ok(rewritten)
    }

    async fn delete_subtree(&self, user_id: Uuid, prefix: &str) -> AppResult<Vec<StorageEntry>> {
        let mut entries = self.entries.lock().await;
        let ids: Vec<Uuid> = entries
            .values()
            .filter(|e| e.user_id == user_id && e.prefix.starts_with(prefix))
            .map(|e| e.id)
            .collect();
        let mut removed = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(entry) = entries.remove(&id) {
                removed.push(entry);
            }
        }
        sort_listing(&mut removed);
        Ok(removed)
    }

    async fn update_file_prefix(
        &self,
        user_id: Uuid,
        id: Uuid,
        new_prefix: &str,
    ) -> AppResult<StorageEntry> {
        let mut entries = self.entries.lock().await;
        let entry = entries
            .get_mut(&id)
            .filter(|e| e.user_id == user_id && !e.is_folder)
            .ok_or_else(|| AppError::not_found("File not found"))?;
        entry.prefix = new_prefix.to_string();
        entry.updated_at = Utc::now();
        Ok(entry.clone())
    }

    async fn update_file_metadata(
        &self,
        user_id: Uuid,
        id: Uuid,
        name: &str,
        description: Option<&str>,
    ) -> AppResult<StorageEntry> {
        let mut entries = self.entries.lock().await;
        let entry = entries
            .get_mut(&id)
            .filter(|e| e.user_id == user_id && !e.is_folder)
            .ok_or_else(|| AppError::not_found("File not found"))?;
        entry.name = name.to_string();
        if let Some(description) = description {
            entry.description = Some(description.to_string());
        }
        entry.updated_at = Utc::now();
        Ok(entry.clone())
    }

    async fn delete_file(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<StorageEntry>> {
        let mut entries = self.entries.lock().await;
        let matches = entries
            .get(&id)
            .is_some_and(|e| e.user_id == user_id && !e.is_folder);
        if !matches {
            return Ok(None);
        }
        Ok(entries.remove(&id))
    }

    async fn list_user_files(&self, user_id: Uuid) -> AppResult<Vec<StorageEntry>> {
        let entries = self.entries.lock().await;
        let mut matched: Vec<StorageEntry> = entries
            .values()
            .filter(|e| e.user_id == user_id && !e.is_folder)
            .cloned()
            .collect();
        sort_listing(&mut matched);
        Ok(matched)
    }
}
