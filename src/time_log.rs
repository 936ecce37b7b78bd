use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimeLogError {
    #[error("index {index} out of range for log of length {len}")]
    OutOfRange { index: usize, len: usize },
}

/// Ordered record of solve durations in milliseconds. Insertion order is
/// chronological solve order; indices are 0-based and only stable until the
/// next mutation. Serializes transparently as a plain JSON array of
/// non-negative numbers, which is the on-disk format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeLog {
    entries: Vec<u64>,
}

impl TimeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, ms: u64) {
        self.entries.push(ms);
    }

    /// Remove the entry at `index`, shifting later entries down by one.
    /// The log is left untouched when the index is out of range.
    pub fn delete_at(&mut self, index: usize) -> Result<(), TimeLogError> {
        if index >= self.entries.len() {
            return Err(TimeLogError::OutOfRange {
                index,
                len: self.entries.len(),
            });
        }

        self.entries.remove(index);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Read-only view in chronological order.
    pub fn snapshot(&self) -> &[u64] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<u64>> for TimeLog {
    fn from(entries: Vec<u64>) -> Self {
        Self { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_preserves_order() {
        let mut log = TimeLog::new();
        log.append(3000);
        log.append(1000);
        log.append(2000);

        assert_eq!(log.snapshot(), &[3000, 1000, 2000]);
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn test_delete_at_shifts_later_entries() {
        let mut log = TimeLog::from(vec![10, 20, 30, 40]);

        log.delete_at(1).unwrap();

        assert_eq!(log.snapshot(), &[10, 30, 40]);
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn test_delete_at_first_and_last() {
        let mut log = TimeLog::from(vec![10, 20, 30]);

        log.delete_at(0).unwrap();
        assert_eq!(log.snapshot(), &[20, 30]);

        log.delete_at(1).unwrap();
        assert_eq!(log.snapshot(), &[20]);
    }

    #[test]
    fn test_delete_at_out_of_range() {
        let mut log = TimeLog::from(vec![10, 20]);

        // index == len is already out of range
        let err = log.delete_at(2).unwrap_err();
        assert_eq!(err, TimeLogError::OutOfRange { index: 2, len: 2 });

        // failed delete performs no mutation
        assert_eq!(log.snapshot(), &[10, 20]);
    }

    #[test]
    fn test_delete_at_empty_log() {
        let mut log = TimeLog::new();
        assert!(log.delete_at(0).is_err());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut log = TimeLog::from(vec![10, 20, 30]);

        log.clear();
        assert!(log.is_empty());
        assert_eq!(log.snapshot(), &[] as &[u64]);

        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn test_serializes_as_plain_json_array() {
        let log = TimeLog::from(vec![500, 1000, 1500]);

        let json = serde_json::to_string(&log).unwrap();
        assert_eq!(json, "[500,1000,1500]");

        let back: TimeLog = serde_json::from_str(&json).unwrap();
        assert_eq!(back, log);
    }

    #[test]
    fn test_deserialization_rejects_negative_durations() {
        assert!(serde_json::from_str::<TimeLog>("[1000, -5]").is_err());
    }

    #[test]
    fn test_error_display() {
        let err = TimeLogError::OutOfRange { index: 5, len: 3 };
        assert_eq!(err.to_string(), "index 5 out of range for log of length 3");
    }
}
