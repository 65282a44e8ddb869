use serde::{Deserialize, Serialize};

/// Placeholder label used when a record is submitted without a species.
pub const UNNAMED_SPECIES: &str = "-";

/// Cubic centimeters in one cubic meter.
const CM3_PER_M3: f64 = 1_000_000.0;

/// One validated lumber batch.
///
/// `volume_m3` is derived once at creation time and rounded to 4 decimals.
/// Sums over records use this stored value, never the raw dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    pub species: String,
    pub count: u32,
    pub width_cm: f64,
    pub thickness_cm: f64,
    pub length_cm: f64,
    pub volume_m3: f64,
}

impl MeasurementRecord {
    /// Volume in cubic meters for `count` pieces of the given size in centimeters.
    pub fn volume_of(count: u32, width_cm: f64, thickness_cm: f64, length_cm: f64) -> f64 {
        round4(f64::from(count) * width_cm * thickness_cm * length_cm / CM3_PER_M3)
    }
}

/// Input for adding a record, as submitted by the form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRecordInput {
    /// Species label. Empty means "not given" and is stored as [`UNNAMED_SPECIES`].
    #[serde(default)]
    pub species: String,
    /// Number of pieces. Defaults to 1.
    #[serde(default = "default_count")]
    pub count: u32,
    pub width_cm: f64,
    pub thickness_cm: f64,
    pub length_cm: f64,
}

fn default_count() -> u32 {
    1
}

impl NewRecordInput {
    pub fn new(
        species: impl Into<String>,
        count: u32,
        width_cm: f64,
        thickness_cm: f64,
        length_cm: f64,
    ) -> Self {
        Self {
            species: species.into(),
            count,
            width_cm,
            thickness_cm,
            length_cm,
        }
    }
}

/// Round to 4 decimal places, half away from zero.
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Render a volume the way every table shows it: fixed 4 decimals.
pub fn format_volume(value: f64) -> String {
    format!("{:.4}", round4(value))
}
