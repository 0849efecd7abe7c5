//! Concurrent data structures used by the leaderboard core.
//!
//! Unlike the lock-free structures elsewhere in the wider ecosystem this
//! codebase grew out of, the indexed skip list here is guarded by a single
//! `parking_lot::RwLock`: the rank-augmentation math (span bookkeeping)
//! is far simpler to keep correct under one writer at a time than it would
//! be to make lock-free, and readers vastly outnumber writers in the
//! leaderboard access pattern this module serves.

pub mod skiplist;

pub use skiplist::{IndexedSkipList, SkipListStats};
