use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use chrono::{DateTime, Duration, FixedOffset, NaiveDateTime, Timelike};
use tracing::warn;

use crate::error::BaselineError;

// ── Timestamp parsing ─────────────────────────────────────────────────────────

/// Offset-aware layouts accepted in addition to RFC 3339.
const OFFSET_FMTS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
];

/// Parse an ISO 8601 / RFC 3339 timestamp that carries an explicit offset.
///
/// A trailing `Z` is read as `+00:00`. Timestamps without any offset are
/// rejected rather than guessed at, so `None` is returned for them as well
/// as for empty or unrecognised strings.
pub fn parse_timestamp(s: &str) -> Option<DateTime<FixedOffset>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let normalised = match s.strip_suffix('Z').or_else(|| s.strip_suffix('z')) {
        Some(stripped) => format!("{}+00:00", stripped),
        None => s.to_string(),
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(&normalised) {
        return Some(dt);
    }

    for fmt in OFFSET_FMTS {
        if let Ok(dt) = DateTime::parse_from_str(&normalised, fmt) {
            return Some(dt);
        }
    }

    let naive = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .any(|fmt| NaiveDateTime::parse_from_str(s, fmt).is_ok());
    if naive {
        warn!("timestamp \"{}\" has no UTC offset", s);
    }
    None
}

// ── BucketSize ────────────────────────────────────────────────────────────────

/// Supported time-bucket granularities.
///
/// Only one-minute buckets exist today; a new granularity is a new variant
/// here, so an unsupported value can never reach the aggregation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BucketSize {
    #[default]
    OneMinute,
}

impl BucketSize {
    /// Map `ts` to the bucket that contains it.
    pub fn bucket(&self, ts: &DateTime<FixedOffset>) -> MinuteBucket {
        match self {
            BucketSize::OneMinute => MinuteBucket::containing(ts),
        }
    }

    /// The spelling used on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            BucketSize::OneMinute => "1m",
        }
    }
}

impl FromStr for BucketSize {
    type Err = BaselineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1m" => Ok(BucketSize::OneMinute),
            other => Err(BaselineError::UnsupportedBucket(other.to_string())),
        }
    }
}

impl fmt::Display for BucketSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── MinuteBucket ──────────────────────────────────────────────────────────────

/// A one-minute window identified by its start instant and UTC offset.
///
/// Two buckets are equal only when both the wall-clock minute and the offset
/// match: `10:00+00:00` and `11:00+01:00` are the same instant but distinct
/// buckets, mirroring their distinct canonical strings.
#[derive(Debug, Clone, Copy)]
pub struct MinuteBucket {
    start: DateTime<FixedOffset>,
}

impl MinuteBucket {
    /// Truncate `ts` to its minute, keeping the offset.
    pub fn containing(ts: &DateTime<FixedOffset>) -> Self {
        let start = *ts
            - Duration::seconds(i64::from(ts.second()))
            - Duration::nanoseconds(i64::from(ts.nanosecond()));
        Self { start }
    }

    /// First instant of the bucket.
    pub fn start(&self) -> DateTime<FixedOffset> {
        self.start
    }

    fn identity(&self) -> (NaiveDateTime, i32) {
        (self.start.naive_local(), self.start.offset().local_minus_utc())
    }
}

impl PartialEq for MinuteBucket {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for MinuteBucket {}

impl Hash for MinuteBucket {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

impl PartialOrd for MinuteBucket {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MinuteBucket {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.identity().cmp(&other.identity())
    }
}

impl fmt::Display for MinuteBucket {
    /// Canonical ISO-8601 form, e.g. `2024-01-01T10:00:00+00:00`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.start.format("%Y-%m-%dT%H:%M:%S%:z"))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
