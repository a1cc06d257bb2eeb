//! Baseline learning pipeline.
//!
//! Reads every record, folds it into a [`CountTable`], reduces each key's
//! per-minute counts to a mean and sample standard deviation, and hands the
//! resulting [`Profile`] to the writer.

use std::path::Path;

use baseline_core::error::Result;
use baseline_core::models::{Profile, Record};
use baseline_core::stats::summarize;
use baseline_core::time_utils::BucketSize;
use chrono::Utc;
use tracing::{debug, info};

use crate::aggregator::{CountTable, PerKeyCounts};
use crate::reader::RecordReader;
use crate::writer::write_profile;

// ── Public types ──────────────────────────────────────────────────────────────

/// Metadata produced alongside a profile.
#[derive(Debug, Clone)]
pub struct RunMetadata {
    /// ISO-8601 timestamp when the profile was generated.
    pub generated_at: String,
    /// Bucket granularity used, e.g. `"1m"`.
    pub bucket: String,
    /// Number of records folded into the count table.
    pub records_processed: u64,
    /// Number of distinct keys in the profile.
    pub keys: usize,
    /// Number of distinct (key, bucket) slots observed.
    pub buckets: usize,
    /// Wall-clock seconds spent reading and counting records.
    pub aggregate_time_seconds: f64,
}

/// Output of [`build_profile`].
#[derive(Debug, Clone)]
pub struct BaselineRun {
    pub profile: Profile,
    pub metadata: RunMetadata,
}

// ── Public functions ──────────────────────────────────────────────────────────

/// Summarise every key's counts into a [`Profile`].
pub fn summarize_counts(per_key: &PerKeyCounts) -> Profile {
    let keys = per_key
        .iter()
        .map(|(key, counts)| (key.clone(), summarize(counts)))
        .collect();
    Profile { keys }
}

/// Fold `records` into a profile.
///
/// Stops at the first record error; no profile is produced from a partially
/// read input.
pub fn build_profile<I>(records: I, bucket: BucketSize) -> Result<BaselineRun>
where
    I: IntoIterator<Item = Result<Record>>,
{
    let start = std::time::Instant::now();
    let mut table = CountTable::new(bucket);
    let mut records_processed = 0u64;

    for record in records {
        table.accumulate(&record?);
        records_processed += 1;
    }
    let aggregate_time = start.elapsed().as_secs_f64();

    let per_key = table.per_key_counts();
    let profile = summarize_counts(&per_key);

    debug!(
        "Counted {} records into {} slots across {} keys",
        records_processed,
        table.slot_count(),
        table.key_count()
    );

    let metadata = RunMetadata {
        generated_at: Utc::now().to_rfc3339(),
        bucket: bucket.to_string(),
        records_processed,
        keys: profile.len(),
        buckets: table.slot_count(),
        aggregate_time_seconds: aggregate_time,
    };

    Ok(BaselineRun { profile, metadata })
}

/// Run the full pipeline: read `input`, learn the baseline, write `output`.
pub fn run_baseline(input: &Path, output: &Path, bucket: BucketSize) -> Result<RunMetadata> {
    let reader = RecordReader::open(input)?;
    let BaselineRun { profile, metadata } = build_profile(reader, bucket)?;

    info!(
        "Learned baseline for {} keys from {} records ({} buckets, {:.3}s)",
        metadata.keys,
        metadata.records_processed,
        metadata.buckets,
        metadata.aggregate_time_seconds
    );

    write_profile(&profile, output)?;
    Ok(metadata)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
