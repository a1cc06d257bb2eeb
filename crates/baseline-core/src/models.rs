use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Label substituted for a record whose source is missing or blank.
pub const UNKNOWN_SOURCE: &str = "unknown";

/// Prefix of every grouping key.
pub const KEY_PREFIX: &str = "src=";

/// A single parsed log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Offset-aware instant at which the line was emitted.
    pub timestamp: DateTime<FixedOffset>,
    /// Emitting source, never empty.
    pub source: String,
    /// Free-text payload; not used for aggregation.
    pub message: String,
}

impl Record {
    /// Build a record, substituting [`UNKNOWN_SOURCE`] for a missing or
    /// blank source. Any other label is kept exactly as given.
    pub fn new(
        timestamp: DateTime<FixedOffset>,
        source: Option<&str>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            source: normalize_source(source),
            message: message.into(),
        }
    }
}

/// Use `source` verbatim, or [`UNKNOWN_SOURCE`] when it is missing or blank.
pub fn normalize_source(source: Option<&str>) -> String {
    match source {
        Some(s) if !s.trim().is_empty() => s.to_string(),
        _ => UNKNOWN_SOURCE.to_string(),
    }
}

/// Grouping identity of a record: `"src=" + source`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceKey(String);

impl SourceKey {
    pub fn from_source(source: &str) -> Self {
        Self(format!("{}{}", KEY_PREFIX, source))
    }

    pub fn from_record(record: &Record) -> Self {
        Self::from_source(&record.source)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-key baseline: mean and sample standard deviation of per-minute counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BaselineStats {
    pub mean: f64,
    pub std: f64,
}

/// The learned baseline for every key seen in one run.
///
/// Serialises as `{"keys": {"src=api": {"mean": .., "std": ..}, ..}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub keys: BTreeMap<SourceKey, BaselineStats>,
}

impl Profile {
    /// Number of distinct keys in the profile.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Look up the baseline for a key string such as `"src=api"`.
    pub fn get(&self, key: &str) -> Option<&BaselineStats> {
        self.keys.get(&SourceKey(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2024-01-01T10:00:05Z").unwrap()
    }

    #[test]
    fn test_record_keeps_source() {
        let r = Record::new(ts(), Some("api"), "msg1");
        assert_eq!(r.source, "api");
        assert_eq!(r.message, "msg1");
    }

    #[test]
    fn test_record_defaults_missing_source() {
        assert_eq!(Record::new(ts(), None, "").source, UNKNOWN_SOURCE);
    }

    #[test]
    fn test_record_defaults_empty_source() {
        assert_eq!(Record::new(ts(), Some(""), "").source, UNKNOWN_SOURCE);
    }

    #[test]
    fn test_padded_source_keeps_exact_key() {
        let padded = Record::new(ts(), Some(" api "), "");
        assert_eq!(padded.source, " api ");
        assert_eq!(SourceKey::from_record(&padded).as_str(), "src= api ");
        assert_ne!(
            SourceKey::from_record(&padded),
            SourceKey::from_record(&Record::new(ts(), Some("api"), ""))
        );
    }

    #[test]
    fn test_whitespace_only_source_is_unknown() {
        assert_eq!(normalize_source(Some("   ")), UNKNOWN_SOURCE);
    }

    #[test]
    fn test_source_key_format() {
        let r = Record::new(ts(), Some("api"), "");
        assert_eq!(SourceKey::from_record(&r).as_str(), "src=api");
        let unknown = Record::new(ts(), None, "");
        assert_eq!(SourceKey::from_record(&unknown).to_string(), "src=unknown");
    }

    #[test]
    fn test_profile_serialises_under_keys() {
        let mut profile = Profile::default();
        profile.keys.insert(
            SourceKey::from_source("api"),
            BaselineStats { mean: 1.5, std: 0.5 },
        );
        let value = serde_json::to_value(&profile).unwrap();
        assert_eq!(value["keys"]["src=api"]["mean"], 1.5);
        assert_eq!(value["keys"]["src=api"]["std"], 0.5);
        assert_eq!(profile.len(), 1);
        assert!(profile.get("src=api").is_some());
        assert!(profile.get("src=db").is_none());
    }

    #[test]
    fn test_empty_profile_serialises_to_empty_mapping() {
        let json = serde_json::to_string(&Profile::default()).unwrap();
        assert_eq!(json, r#"{"keys":{}}"#);
    }
}
