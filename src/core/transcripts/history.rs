use chrono::Utc;
use std::sync::{Arc, Mutex, MutexGuard};

use super::storage::{storage_key, InMemoryStorage, RedbStorage, Storage};
use crate::shared::error::{AppError, AppResult};
use crate::shared::types::TranscriptItem;

pub const DEFAULT_MAX_ITEMS: usize = 50;

/// Transcript history container with pluggable persistence.
///
/// Clones share storage and the capacity lock; every write runs under that
/// lock so key allocation and trimming never interleave.
#[derive(Clone)]
pub struct TranscriptHistory {
    storage: Arc<dyn Storage>,
    max_items: Arc<Mutex<usize>>,
}

impl TranscriptHistory {
    pub fn new(storage: Arc<dyn Storage>, max_items: usize) -> Self {
        Self {
            storage,
            max_items: Arc::new(Mutex::new(max_items)),
        }
    }

    pub fn in_memory(max_items: usize) -> Self {
        Self::new(Arc::new(InMemoryStorage::new()), max_items)
    }

    /// Open the on-disk history, falling back to memory if the database
    /// cannot be opened.
    pub fn open_default(max_items: usize) -> Self {
        let storage: Arc<dyn Storage> = match RedbStorage::open_default() {
            Ok(storage) => Arc::new(storage),
            Err(e) => {
                log::error!("[TranscriptHistory] Failed to initialize database: {}, using in-memory fallback", e);
                Arc::new(InMemoryStorage::new())
            }
        };
        Self::new(storage, max_items)
    }

    fn lock(&self) -> MutexGuard<'_, usize> {
        match self.max_items.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::warn!("[TranscriptHistory] Mutex poisoned, recovering...");
                poisoned.into_inner()
            }
        }
    }

    pub fn max_items(&self) -> usize {
        *self.lock()
    }

    /// Change the capacity, dropping the oldest items beyond it
    pub fn set_max_items(&self, max_items: usize) -> AppResult<()> {
        let mut guard = self.lock();
        *guard = max_items;
        self.enforce_capacity(max_items)?;
        log::info!("[TranscriptHistory] Capacity set to {}", max_items);
        Ok(())
    }

    /// Save a finished transcript. Blank text is not saved.
    pub fn save(&self, text: &str) -> AppResult<Option<TranscriptItem>> {
        if text.trim().is_empty() {
            log::debug!("[TranscriptHistory] Skipping blank transcript");
            return Ok(None);
        }

        let guard = self.lock();
        let now = Utc::now();
        // Keys must stay unique and increasing even within one millisecond
        let newest = match self.storage.load_items(1)?.first() {
            Some(item) => Some(storage_key(&item.id)?),
            None => None,
        };
        let now_millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let key = match newest {
            Some(newest) if newest >= now_millis => newest + 1,
            _ => now_millis,
        };

        let item = TranscriptItem::new(key, text.to_string(), now);
        self.storage.save_item(&item)?;
        self.enforce_capacity(*guard)?;

        log::info!("[TranscriptHistory] Saved transcript {}", item.id);
        Ok(Some(item))
    }

    /// Newest first
    pub fn items(&self) -> AppResult<Vec<TranscriptItem>> {
        let max_items = self.max_items();
        self.storage.load_items(max_items)
    }

    pub fn get(&self, id: &str) -> AppResult<Option<TranscriptItem>> {
        Ok(self.items()?.into_iter().find(|item| item.id == id))
    }

    /// Replace the text of an existing transcript; id and date are kept.
    pub fn update(&self, item: &TranscriptItem) -> AppResult<TranscriptItem> {
        let guard = self.lock();
        let mut existing = self
            .storage
            .load_items(*guard)?
            .into_iter()
            .find(|stored| stored.id == item.id)
            .ok_or_else(|| AppError::Validation(format!("Transcript not found: {}", item.id)))?;
        existing.text = item.text.clone();
        self.storage.save_item(&existing)?;

        log::info!("[TranscriptHistory] Updated transcript {}", existing.id);
        Ok(existing)
    }

    pub fn delete(&self, id: &str) -> AppResult<bool> {
        let _guard = self.lock();
        let removed = self.storage.remove_item(id)?;
        if removed {
            log::info!("[TranscriptHistory] Deleted transcript {}", id);
        }
        Ok(removed)
    }

    pub fn clear(&self) -> AppResult<()> {
        let _guard = self.lock();
        self.storage.clear_all()?;
        log::info!("[TranscriptHistory] Cleared all transcripts");
        Ok(())
    }

    pub fn count(&self) -> AppResult<usize> {
        Ok(self.items()?.len())
    }

    // Callers hold the lock
    fn enforce_capacity(&self, max_items: usize) -> AppResult<()> {
        let overflow = self.storage.load_items(usize::MAX)?;
        for item in overflow.iter().skip(max_items) {
            self.storage.remove_item(&item.id)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_list_newest_first() {
        let history = TranscriptHistory::in_memory(DEFAULT_MAX_ITEMS);
        history.save("first note").unwrap();
        history.save("second note").unwrap();

        let items = history.items().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].text, "second note");
        assert_eq!(items[1].text, "first note");
        assert_ne!(items[0].id, items[1].id);
    }

    #[test]
    fn test_blank_transcripts_are_ignored() {
        let history = TranscriptHistory::in_memory(DEFAULT_MAX_ITEMS);
        assert_eq!(history.save("   \n").unwrap(), None);
        assert_eq!(history.count().unwrap(), 0);
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let history = TranscriptHistory::in_memory(3);
        for i in 0..5 {
            history.save(&format!("note {}", i)).unwrap();
        }
        let texts: Vec<_> = history.items().unwrap().into_iter().map(|i| i.text).collect();
        assert_eq!(texts, vec!["note 4", "note 3", "note 2"]);
    }

    #[test]
    fn test_update_keeps_id_and_date() {
        let history = TranscriptHistory::in_memory(DEFAULT_MAX_ITEMS);
        let saved = history.save("draft").unwrap().unwrap();

        let mut edited = saved.clone();
        edited.text = "final".to_string();
        let updated = history.update(&edited).unwrap();

        assert_eq!(updated.id, saved.id);
        assert_eq!(updated.date, saved.date);
        assert_eq!(history.get(&saved.id).unwrap().unwrap().text, "final");
    }

    #[test]
    fn test_update_unknown_id_fails() {
        let history = TranscriptHistory::in_memory(DEFAULT_MAX_ITEMS);
        let ghost = TranscriptItem::new(1, "ghost".to_string(), Utc::now());
        assert!(matches!(history.update(&ghost), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_delete_and_clear() {
        let history = TranscriptHistory::in_memory(DEFAULT_MAX_ITEMS);
        let a = history.save("a").unwrap().unwrap();
        history.save("b").unwrap();

        assert!(history.delete(&a.id).unwrap());
        assert!(!history.delete(&a.id).unwrap());
        assert_eq!(history.count().unwrap(), 1);

        history.clear().unwrap();
        assert_eq!(history.count().unwrap(), 0);
    }

    #[test]
    fn test_concurrent_saves_keep_every_item() {
        let history = TranscriptHistory::in_memory(2_000);
        std::thread::scope(|scope| {
            for worker in 0..8 {
                let history = history.clone();
                scope.spawn(move || {
                    for i in 0..200 {
                        history.save(&format!("worker {} note {}", worker, i)).unwrap();
                    }
                });
            }
        });

        let items = history.items().unwrap();
        assert_eq!(items.len(), 1_600);
        let ids: std::collections::HashSet<_> = items.iter().map(|item| item.id.as_str()).collect();
        assert_eq!(ids.len(), 1_600);
    }

    #[test]
    fn test_shrinking_capacity_trims_and_applies_to_new_saves() {
        let history = TranscriptHistory::in_memory(DEFAULT_MAX_ITEMS);
        for i in 0..4 {
            history.save(&format!("note {}", i)).unwrap();
        }

        history.set_max_items(2).unwrap();
        assert_eq!(history.max_items(), 2);
        let texts: Vec<_> = history.items().unwrap().into_iter().map(|i| i.text).collect();
        assert_eq!(texts, vec!["note 3", "note 2"]);

        let clone = history.clone();
        clone.save("note 4").unwrap();
        assert_eq!(history.count().unwrap(), 2);
    }

    #[test]
    fn test_redb_backed_history() {
        let dir = tempfile::tempdir().unwrap();
        let storage = RedbStorage::open(dir.path().join("history.redb")).unwrap();
        let history = TranscriptHistory::new(Arc::new(storage), 2);

        history.save("one").unwrap();
        history.save("two").unwrap();
        history.save("three").unwrap();

        let texts: Vec<_> = history.items().unwrap().into_iter().map(|i| i.text).collect();
        assert_eq!(texts, vec!["three", "two"]);
    }
}
