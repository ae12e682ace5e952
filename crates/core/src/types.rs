/// Calendar dates (analysis windows, image archive filters) are timezone-less.
pub type Date = chrono::NaiveDate;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Identifier for one detection run, handed back to the caller so the
/// export endpoint can reference an exact result set.
pub type RunId = uuid::Uuid;
