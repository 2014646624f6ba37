//! Vantage Cache - Bounded in-memory store for serialised beacon data
//!
//! Producers append already-serialised event fragments under a
//! [`BeaconKey`]; the sender thread drains them in size-limited chunks.
//! A failed transmission rolls the drained fragments back in their original
//! order, so the cache never reorders and drops at most one chunk per
//! attempt.
//!
//! # Locking
//!
//! A global `RwLock` guards the key set; one `Mutex` per entry guards that
//! entry's record sequences. Locks are always taken global-first, then
//! per-entry, which rules out lock cycles. The aggregate byte count is an
//! atomic read so size queries never contend.
//!
//! # Size accounting
//!
//! Bytes leave the counter when fragments move into the in-flight staging
//! area (`get_next_beacon_chunk`) and come back on `reset_chunked_data`;
//! every other mutation adjusts the counter immediately.

mod cache;
mod entry;
mod evictor;
mod key;
mod record;

pub use cache::BeaconCache;
pub use evictor::CacheEvictor;
pub use key::BeaconKey;
pub use record::CacheRecord;
