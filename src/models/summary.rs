use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::record::MeasurementRecord;

/// Total volume for one species.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesTotal {
    pub species: String,
    pub volume_m3: f64,
}

/// Per-species aggregate plus the grand total over a record list.
///
/// Derived on every render; with interactive record counts recomputing is
/// cheaper than keeping it in sync.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// One entry per distinct species, ascending by label (code-point order).
    pub species: Vec<SpeciesTotal>,
    /// Sum of every record's stored volume.
    pub grand_total_m3: f64,
}

impl Summary {
    pub fn from_records(records: &[MeasurementRecord]) -> Self {
        let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
        for record in records {
            *totals.entry(record.species.as_str()).or_insert(0.0) += record.volume_m3;
        }

        let species = totals
            .into_iter()
            .map(|(species, volume_m3)| SpeciesTotal {
                species: species.to_string(),
                volume_m3,
            })
            .collect();

        Self {
            species,
            grand_total_m3: records.iter().map(|r| r.volume_m3).sum(),
        }
    }

    /// Sum of the per-species rows, shown as the summary table's last row.
    pub fn aggregate_total(&self) -> f64 {
        self.species.iter().map(|s| s.volume_m3).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }
}
