use redb::{Database, ReadableTable, TableDefinition};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use directories::ProjectDirs;

use crate::shared::error::{AppError, AppResult};
use crate::shared::types::TranscriptItem;

/// Key: creation millis (`TranscriptItem::id`), value: serialized item
const TRANSCRIPT_TABLE: TableDefinition<u64, &str> = TableDefinition::new("transcript_history");

/// Storage trait for transcript persistence
pub trait Storage: Send + Sync {
    /// Insert or replace the item stored under its id
    fn save_item(&self, item: &TranscriptItem) -> AppResult<()>;
    /// Newest first
    fn load_items(&self, limit: usize) -> AppResult<Vec<TranscriptItem>>;
    /// Returns whether an item was removed
    fn remove_item(&self, id: &str) -> AppResult<bool>;
    fn clear_all(&self) -> AppResult<()>;
}

pub(crate) fn storage_key(id: &str) -> AppResult<u64> {
    id.parse::<u64>()
        .map_err(|_| AppError::Validation(format!("Invalid transcript id: {}", id)))
}

/// Redb-based storage implementation
pub struct RedbStorage {
    db: Arc<Mutex<Database>>,
}

impl RedbStorage {
    pub fn default_path() -> AppResult<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "multitools", "multi-tools")
            .ok_or_else(|| AppError::Io("Failed to get project directories".to_string()))?;
        Ok(proj_dirs.data_dir().join("transcript_history.redb"))
    }

    pub fn open_default() -> AppResult<Self> {
        Self::open(Self::default_path()?)
    }

    pub fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::create(path)?;

        // Create the table up front so readers never see it missing
        let write_txn = db.begin_write()?;
        {
            let _table = write_txn.open_table(TRANSCRIPT_TABLE)?;
        }
        write_txn.commit()?;

        log::debug!("[TranscriptHistory] Opened database at {}", path.display());
        Ok(Self {
            db: Arc::new(Mutex::new(db)),
        })
    }

    fn lock(&self) -> AppResult<MutexGuard<'_, Database>> {
        self.db
            .lock()
            .map_err(|e| AppError::Storage(format!("Mutex poisoned: {}", e)))
    }
}

impl Storage for RedbStorage {
    fn save_item(&self, item: &TranscriptItem) -> AppResult<()> {
        let key = storage_key(&item.id)?;
        let serialized = serde_json::to_string(item)?;

        let db = self.lock()?;
        let write_txn = db.begin_write()?;
        {
            let mut table = write_txn.open_table(TRANSCRIPT_TABLE)?;
            table.insert(key, serialized.as_str())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    fn load_items(&self, limit: usize) -> AppResult<Vec<TranscriptItem>> {
        let db = self.lock()?;
        let read_txn = db.begin_read()?;
        let table = read_txn.open_table(TRANSCRIPT_TABLE)?;

        let mut items = Vec::new();
        // Keys are creation millis, so reverse key order is newest first
        for entry in table.iter()?.rev().take(limit) {
            let (_, value) = entry?;
            items.push(serde_json::from_str::<TranscriptItem>(value.value())?);
        }
        Ok(items)
    }

    fn remove_item(&self, id: &str) -> AppResult<bool> {
        let key = storage_key(id)?;

        let db = self.lock()?;
        let write_txn = db.begin_write()?;
        let removed = {
            let mut table = write_txn.open_table(TRANSCRIPT_TABLE)?;
            let removed = table.remove(key)?.is_some();
            removed
        };
        write_txn.commit()?;
        Ok(removed)
    }

    fn clear_all(&self) -> AppResult<()> {
        let db = self.lock()?;
        let write_txn = db.begin_write()?;
        {
            let mut table = write_txn.open_table(TRANSCRIPT_TABLE)?;

            let mut keys = Vec::new();
            for entry in table.iter()? {
                let (key, _) = entry?;
                keys.push(key.value());
            }
            for key in keys {
                table.remove(key)?;
            }
        }
        write_txn.commit()?;
        Ok(())
    }
}

/// In-memory storage, also the fallback when the database cannot be opened
#[derive(Default)]
pub struct InMemoryStorage {
    items: Mutex<Vec<TranscriptItem>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> AppResult<MutexGuard<'_, Vec<TranscriptItem>>> {
        self.items
            .lock()
            .map_err(|e| AppError::Storage(format!("Mutex poisoned: {}", e)))
    }
}

impl Storage for InMemoryStorage {
    fn save_item(&self, item: &TranscriptItem) -> AppResult<()> {
        let key = storage_key(&item.id)?;
        let mut items = self.lock()?;
        items.retain(|existing| existing.id != item.id);

        // Keep newest-first order by key
        let position = items
            .iter()
            .position(|existing| storage_key(&existing.id).map(|k| k < key).unwrap_or(true))
            .unwrap_or(items.len());
        items.insert(position, item.clone());
        Ok(())
    }

    fn load_items(&self, limit: usize) -> AppResult<Vec<TranscriptItem>> {
        let items = self.lock()?;
        Ok(items.iter().take(limit).cloned().collect())
    }

    fn remove_item(&self, id: &str) -> AppResult<bool> {
        let mut items = self.lock()?;
        let before = items.len();
        items.retain(|item| item.id != id);
        Ok(items.len() != before)
    }

    fn clear_all(&self) -> AppResult<()> {
        self.lock()?.clear();
        Ok(())
    }
}
