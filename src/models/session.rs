use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::record::MeasurementRecord;
use super::summary::Summary;

/// Response when a session is started.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionCreated {
    pub id: Uuid,
}

/// Everything the form needs to re-render: the detail list in entry order and
/// the derived per-species summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionView {
    pub id: Uuid,
    pub records: Vec<MeasurementRecord>,
    pub summary: Summary,
    /// Export is only offered once at least one record exists.
    pub can_export: bool,
}

/// Result of "add to list".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordAdded {
    pub record: MeasurementRecord,
    /// Transient confirmation shown to the user.
    pub notice: String,
}

/// Result of "clear list".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListCleared {
    /// How many records were dropped.
    pub removed: usize,
    pub notice: String,
}
