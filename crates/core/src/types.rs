/// All primary keys are UUIDs (v7, time-ordered when generated in-process).
pub type DbId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
