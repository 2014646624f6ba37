//! Thread-safe beacon cache

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::entry::CacheEntry;
use crate::key::BeaconKey;
use crate::record::CacheRecord;

/// Bounded store of serialised beacon fragments, keyed by [`BeaconKey`].
///
/// All operations are safe to call from any thread; producers only ever
/// contend on the entry they append to.
#[derive(Debug, Default)]
pub struct BeaconCache {
    entries: RwLock<HashMap<BeaconKey, Arc<CacheEntry>>>,
    size_bytes: AtomicU64,
}

impl BeaconCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a serialised action fragment under `key`.
    pub fn add_action_data(&self, key: BeaconKey, timestamp_ms: i64, data: &str) {
        let entry = self.get_or_create_entry(key);
        entry.lock().add_action_record(CacheRecord::new(timestamp_ms, data));
        self.size_bytes.fetch_add(data.len() as u64, Ordering::Relaxed);
    }

    /// Append a serialised event fragment under `key`.
    pub fn add_event_data(&self, key: BeaconKey, timestamp_ms: i64, data: &str) {
        let entry = self.get_or_create_entry(key);
        entry.lock().add_event_record(CacheRecord::new(timestamp_ms, data));
        self.size_bytes.fetch_add(data.len() as u64, Ordering::Relaxed);
    }

    /// Drop everything associated with `key`, including staged data.
    pub fn delete_cache_entry(&self, key: BeaconKey) {
        let removed = self.entries.write().remove(&key);
        if let Some(entry) = removed {
            let live_bytes = entry.lock().live_size_bytes();
            self.size_bytes.fetch_sub(live_bytes, Ordering::Relaxed);
            debug!(key = %key, "deleted beacon cache entry");
        }
    }

    /// Pull the next chunk for `key`.
    ///
    /// On the first call of a drain all live fragments move into the
    /// entry's staging area (and leave the size counter); subsequent calls
    /// keep draining the staged remainder. Returns `None` when no entry
    /// exists and an empty string when the entry holds no data.
    pub fn get_next_beacon_chunk(
        &self,
        key: BeaconKey,
        prefix: &str,
        max_size: usize,
        delimiter: char,
    ) -> Option<String> {
        let entry = self.get_entry(key)?;
        let mut data = entry.lock();
        if data.needs_data_copy_before_chunking() {
            let staged_bytes = data.live_size_bytes();
            data.copy_data_for_chunking();
            self.size_bytes.fetch_sub(staged_bytes, Ordering::Relaxed);
        }
        Some(data.get_chunk(prefix, max_size, delimiter))
    }

    /// Confirm the chunk returned by the last [`Self::get_next_beacon_chunk`]
    /// call for `key`: the emitted fragments are gone for good.
    pub fn remove_chunked_data(&self, key: BeaconKey) {
        if let Some(entry) = self.get_entry(key) {
            entry.lock().remove_data_marked_for_sending();
        }
    }

    /// Abort the drain in progress for `key`: every staged fragment goes
    /// back in front of its live sequence, in the original order.
    pub fn reset_chunked_data(&self, key: BeaconKey) {
        if let Some(entry) = self.get_entry(key) {
            let restored_bytes = entry.lock().reset_data_marked_for_sending();
            self.size_bytes.fetch_add(restored_bytes, Ordering::Relaxed);
        }
    }

    /// True when `key` has no live fragments (a drain in progress does not
    /// count).
    pub fn is_empty(&self, key: BeaconKey) -> bool {
        match self.get_entry(key) {
            Some(entry) => entry.lock().is_empty(),
            None => true,
        }
    }

    /// Total bytes across all live fragments
    pub fn size_bytes(&self) -> u64 {
        self.size_bytes.load(Ordering::Relaxed)
    }

    /// Number of live fragments cached under `key`
    pub fn num_records(&self, key: BeaconKey) -> usize {
        match self.get_entry(key) {
            Some(entry) => entry.lock().num_live_records(),
            None => 0,
        }
    }

    /// Snapshot of all keys currently present
    pub fn beacon_keys(&self) -> Vec<BeaconKey> {
        self.entries.read().keys().copied().collect()
    }

    /// Remove live fragments of `key` older than `min_timestamp_ms`.
    ///
    /// Returns the number of removed fragments.
    pub fn evict_records_by_age(&self, key: BeaconKey, min_timestamp_ms: i64) -> usize {
        let Some(entry) = self.get_entry(key) else {
            return 0;
        };
        let (removed, removed_bytes) = entry.lock().remove_records_older_than(min_timestamp_ms);
        self.size_bytes.fetch_sub(removed_bytes, Ordering::Relaxed);
        removed
    }

    /// Remove the oldest live fragments of `key` until at most `max_keep`
    /// remain.
    ///
    /// Returns the number of removed fragments.
    pub fn evict_records_by_number(&self, key: BeaconKey, max_keep: usize) -> usize {
        let Some(entry) = self.get_entry(key) else {
            return 0;
        };
        let mut data = entry.lock();
        let excess = data.num_live_records().saturating_sub(max_keep);
        let (removed, removed_bytes) = data.remove_oldest_records(excess);
        drop(data);
        self.size_bytes.fetch_sub(removed_bytes, Ordering::Relaxed);
        removed
    }

    fn get_entry(&self, key: BeaconKey) -> Option<Arc<CacheEntry>> {
        self.entries.read().get(&key).cloned()
    }

    fn get_or_create_entry(&self, key: BeaconKey) -> Arc<CacheEntry> {
        if let Some(entry) = self.get_entry(key) {
            return entry;
        }
        Arc::clone(
            self.entries
                .write()
                .entry(key)
                .or_insert_with(|| Arc::new(CacheEntry::default())),
        )
    }

    #[cfg(test)]
    pub(crate) fn live_payloads(&self, key: BeaconKey) -> (Vec<String>, Vec<String>) {
        let entry = self.get_entry(key).expect("entry exists");
        let data = entry.lock();
        (data.live_action_payloads(), data.live_event_payloads())
    }
}
