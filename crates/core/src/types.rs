/// Cut ids are server-assigned numeric ids.
pub type CutId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
