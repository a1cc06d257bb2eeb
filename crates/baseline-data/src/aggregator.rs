//! Per-source, per-minute event counting.

use std::collections::BTreeMap;

use baseline_core::models::{Record, SourceKey};
use baseline_core::time_utils::{BucketSize, MinuteBucket};

// ── CountTable ────────────────────────────────────────────────────────────────

/// Number of records seen for each (key, bucket) slot.
///
/// Only slots that received at least one record exist; minutes without
/// events are absent rather than zero.
#[derive(Debug, Clone, Default)]
pub struct CountTable {
    bucket_size: BucketSize,
    slots: BTreeMap<SourceKey, BTreeMap<MinuteBucket, u64>>,
}

impl CountTable {
    pub fn new(bucket_size: BucketSize) -> Self {
        Self {
            bucket_size,
            slots: BTreeMap::new(),
        }
    }

    /// Count `record` in the slot for its key and bucket.
    pub fn accumulate(&mut self, record: &Record) {
        let key = SourceKey::from_record(record);
        let bucket = self.bucket_size.bucket(&record.timestamp);
        *self.slots.entry(key).or_default().entry(bucket).or_insert(0) += 1;
    }

    /// Count in a single slot, `0` when it was never touched.
    pub fn count(&self, key: &SourceKey, bucket: &MinuteBucket) -> u64 {
        self.slots
            .get(key)
            .and_then(|buckets| buckets.get(bucket))
            .copied()
            .unwrap_or(0)
    }

    /// Total records counted under `key`.
    pub fn total_for(&self, key: &SourceKey) -> u64 {
        self.slots
            .get(key)
            .map(|buckets| buckets.values().sum())
            .unwrap_or(0)
    }

    /// Number of distinct keys.
    pub fn key_count(&self) -> usize {
        self.slots.len()
    }

    /// Number of distinct (key, bucket) slots.
    pub fn slot_count(&self) -> usize {
        self.slots.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Group slots by key, dropping bucket identity.
    pub fn per_key_counts(&self) -> PerKeyCounts {
        let counts = self
            .slots
            .iter()
            .map(|(key, buckets)| {
                let counts: Vec<u64> = buckets.values().copied().collect();
                (key.clone(), counts)
            })
            .collect();
        PerKeyCounts { counts }
    }
}

// ── PerKeyCounts ──────────────────────────────────────────────────────────────

/// For each key, one count per bucket in which it appeared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PerKeyCounts {
    counts: BTreeMap<SourceKey, Vec<u64>>,
}

impl PerKeyCounts {
    /// Counts for `key`, or `None` if it was never observed.
    pub fn get(&self, key: &SourceKey) -> Option<&[u64]> {
        self.counts.get(key).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SourceKey, &[u64])> {
        self.counts.iter().map(|(k, v)| (k, v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
