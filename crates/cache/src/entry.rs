//! Per-key cache entry
//!
//! An entry holds two live sequences (action data drains before event data)
//! and an in-flight staging area populated while a chunked drain is in
//! progress. Rollback prepends the staged records back in front of the live
//! sequences, restoring the exact pre-drain order.

use std::collections::VecDeque;

use parking_lot::{Mutex, MutexGuard};

use crate::record::CacheRecord;

/// One beacon's cached data, guarded by its own lock
#[derive(Debug, Default)]
pub(crate) struct CacheEntry {
    data: Mutex<EntryData>,
}

impl CacheEntry {
    pub(crate) fn lock(&self) -> MutexGuard<'_, EntryData> {
        self.data.lock()
    }
}

#[derive(Debug, Default)]
pub(crate) struct EntryData {
    event_data: VecDeque<CacheRecord>,
    action_data: VecDeque<CacheRecord>,
    event_data_being_sent: Option<VecDeque<CacheRecord>>,
    action_data_being_sent: Option<VecDeque<CacheRecord>>,
}

impl EntryData {
    pub(crate) fn add_event_record(&mut self, record: CacheRecord) {
        self.event_data.push_back(record);
    }

    pub(crate) fn add_action_record(&mut self, record: CacheRecord) {
        self.action_data.push_back(record);
    }

    /// Bytes held in the live sequences (staged records are accounted at the
    /// cache level when they leave)
    pub(crate) fn live_size_bytes(&self) -> u64 {
        self.event_data
            .iter()
            .chain(self.action_data.iter())
            .map(CacheRecord::data_size_bytes)
            .sum()
    }

    /// Number of records in the live sequences
    pub(crate) fn num_live_records(&self) -> usize {
        self.event_data.len() + self.action_data.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.event_data.is_empty() && self.action_data.is_empty()
    }

    /// True until a drain is in progress for this entry
    pub(crate) fn needs_data_copy_before_chunking(&self) -> bool {
        self.action_data_being_sent.is_none() && self.event_data_being_sent.is_none()
    }

    /// Move everything from the live sequences into the staging area.
    ///
    /// Only called when no drain is in progress; data appended afterwards
    /// lands in the (now empty) live sequences and stays out of this drain.
    pub(crate) fn copy_data_for_chunking(&mut self) {
        debug_assert!(self.needs_data_copy_before_chunking());
        self.action_data_being_sent = Some(std::mem::take(&mut self.action_data));
        self.event_data_being_sent = Some(std::mem::take(&mut self.event_data));
    }

    fn has_data_to_send(&self) -> bool {
        let staged = |records: &Option<VecDeque<CacheRecord>>| {
            records.as_ref().is_some_and(|records| !records.is_empty())
        };
        staged(&self.action_data_being_sent) || staged(&self.event_data_being_sent)
    }

    /// Build the next chunk out of the staging area.
    ///
    /// Emits `prefix`, then `delimiter` + payload per staged record (action
    /// data first) while the running length stays within `max_size`.
    /// Emitted records are marked so that [`Self::remove_data_marked_for_sending`]
    /// can drop exactly them. Returns an empty string when nothing is
    /// staged.
    pub(crate) fn get_chunk(&mut self, prefix: &str, max_size: usize, delimiter: char) -> String {
        if !self.has_data_to_send() {
            // no data was staged, drain is complete
            self.action_data_being_sent = None;
            self.event_data_being_sent = None;
            return String::new();
        }

        let mut chunk = String::with_capacity(max_size.max(prefix.len()));
        chunk.push_str(prefix);
        let mut emitted = false;
        if let Some(records) = self.action_data_being_sent.as_mut() {
            chunkify(&mut chunk, records, max_size, delimiter, &mut emitted);
        }
        if let Some(records) = self.event_data_being_sent.as_mut() {
            chunkify(&mut chunk, records, max_size, delimiter, &mut emitted);
        }
        chunk
    }

    /// Drop the records emitted by the last [`Self::get_chunk`] call.
    ///
    /// When that empties the staging area the drain is finished and the next
    /// `get_chunk` starts over from the live sequences.
    pub(crate) fn remove_data_marked_for_sending(&mut self) {
        let drop_marked = |records: &mut Option<VecDeque<CacheRecord>>| {
            if let Some(staged) = records.as_mut() {
                while staged.front().is_some_and(CacheRecord::is_marked_for_sending) {
                    staged.pop_front();
                }
            }
        };
        drop_marked(&mut self.action_data_being_sent);
        drop_marked(&mut self.event_data_being_sent);

        if !self.has_data_to_send() {
            self.action_data_being_sent = None;
            self.event_data_being_sent = None;
        }
    }

    /// Put every staged record back in front of its live sequence,
    /// preserving the original order. Returns the restored byte count.
    pub(crate) fn reset_data_marked_for_sending(&mut self) -> u64 {
        let mut restored_bytes = 0;

        if let Some(mut staged) = self.action_data_being_sent.take() {
            for record in staged.iter_mut() {
                record.unmark_for_sending();
                restored_bytes += record.data_size_bytes();
            }
            staged.append(&mut self.action_data);
            self.action_data = staged;
        }
        if let Some(mut staged) = self.event_data_being_sent.take() {
            for record in staged.iter_mut() {
                record.unmark_for_sending();
                restored_bytes += record.data_size_bytes();
            }
            staged.append(&mut self.event_data);
            self.event_data = staged;
        }

        restored_bytes
    }

    /// Remove live records older than `min_timestamp_ms`.
    ///
    /// Returns the number of removed records and their byte count.
    pub(crate) fn remove_records_older_than(&mut self, min_timestamp_ms: i64) -> (usize, u64) {
        let mut removed = 0;
        let mut removed_bytes = 0;
        let mut expire = |records: &mut VecDeque<CacheRecord>| {
            records.retain(|record| {
                if record.timestamp_ms() < min_timestamp_ms {
                    removed += 1;
                    removed_bytes += record.data_size_bytes();
                    false
                } else {
                    true
                }
            });
        };
        expire(&mut self.action_data);
        expire(&mut self.event_data);
        (removed, removed_bytes)
    }

    /// Remove the `count` oldest live records, comparing the heads of both
    /// sequences by timestamp.
    pub(crate) fn remove_oldest_records(&mut self, count: usize) -> (usize, u64) {
        let mut removed = 0;
        let mut removed_bytes = 0;
        while removed < count {
            let action_ts = self.action_data.front().map(CacheRecord::timestamp_ms);
            let event_ts = self.event_data.front().map(CacheRecord::timestamp_ms);
            let record = match (action_ts, event_ts) {
                (Some(action), Some(event)) if action <= event => self.action_data.pop_front(),
                (Some(_), Some(_)) => self.event_data.pop_front(),
                (Some(_), None) => self.action_data.pop_front(),
                (None, Some(_)) => self.event_data.pop_front(),
                (None, None) => break,
            };
            if let Some(record) = record {
                removed += 1;
                removed_bytes += record.data_size_bytes();
            }
        }
        (removed, removed_bytes)
    }

    #[cfg(test)]
    pub(crate) fn live_event_payloads(&self) -> Vec<String> {
        self.event_data
            .iter()
            .map(|record| record.data().to_string())
            .collect()
    }

    #[cfg(test)]
    pub(crate) fn live_action_payloads(&self) -> Vec<String> {
        self.action_data
            .iter()
            .map(|record| record.data().to_string())
            .collect()
    }
}

fn chunkify(
    chunk: &mut String,
    records: &mut VecDeque<CacheRecord>,
    max_size: usize,
    delimiter: char,
    emitted: &mut bool,
) {
    for record in records.iter_mut() {
        let added = delimiter.len_utf8() + record.data().len();
        // a record larger than the whole budget still goes out alone,
        // otherwise the drain could never make progress
        if *emitted && chunk.len() + added > max_size {
            break;
        }
        record.mark_for_sending();
        chunk.push(delimiter);
        chunk.push_str(record.data());
        *emitted = true;
    }
}
