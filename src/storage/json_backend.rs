use chrono::Utc;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::core::errors::LedgerError;
use crate::core::utils::{ensure_dir, write_atomic, PathResolver};

use super::{Result, StorageBackend};

const ENTRY_EXTENSION: &str = "json";
const QUARANTINE_MARKER: &str = "corrupt";
const QUARANTINE_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// File-backed store: one JSON file per key under `<root>/store`.
#[derive(Clone, Debug)]
pub struct JsonStorage {
    root: PathBuf,
    store_dir: PathBuf,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let app_root = PathResolver::resolve_base(root);
        let store_dir = PathResolver::store_dir_in(&app_root);
        ensure_dir(&store_dir)?;
        Ok(Self {
            root: app_root,
            store_dir,
        })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None)
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }

    pub fn entry_path(&self, key: &str) -> PathBuf {
        self.store_dir
            .join(format!("{}.{}", canonical_key(key), ENTRY_EXTENSION))
    }

    /// Files previously set aside by [`StorageBackend::quarantine`], newest first.
    pub fn quarantined(&self, key: &str) -> Result<Vec<String>> {
        let prefix = format!("{}.{}-", canonical_key(key), QUARANTINE_MARKER);
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.store_dir)? {
            let entry = entry?;
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if name.starts_with(&prefix) {
                entries.push(name);
            }
        }
        // Timestamps sort lexically.
        entries.sort_by(|a, b| b.cmp(a));
        Ok(entries)
    }
}

impl StorageBackend for JsonStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.entry_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(&path)?;
        let data = String::from_utf8(bytes).map_err(|err| {
            LedgerError::StorageCorrupt(format!("{} is not valid UTF-8: {}", path.display(), err))
        })?;
        Ok(Some(data))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.entry_path(key);
        write_atomic(&path, value)?;
        tracing::debug!(path = %path.display(), bytes = value.len(), "wrote store entry");
        Ok(())
    }

    fn quarantine(&self, key: &str) -> Result<Option<String>> {
        let path = self.entry_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let timestamp = Utc::now().format(QUARANTINE_TIMESTAMP_FORMAT);
        let name = format!(
            "{}.{}-{}.{}",
            canonical_key(key),
            QUARANTINE_MARKER,
            timestamp,
            ENTRY_EXTENSION
        );
        let target = self.store_dir.join(&name);
        fs::rename(&path, &target)?;
        tracing::warn!(
            from = %path.display(),
            to = %target.display(),
            "quarantined unreadable store entry"
        );
        Ok(Some(target.display().to_string()))
    }
}

fn canonical_key(key: &str) -> String {
    let sanitized: String = key
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '-' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "entry".into()
    } else {
        sanitized
    }
}
