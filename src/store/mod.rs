//! The session's ordered, append-only list of measurement records.

use thiserror::Error;

use crate::models::{MeasurementRecord, NewRecordInput, Summary, UNNAMED_SPECIES};

/// Why a submitted record was refused. The store is left untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} must be greater than zero (got {value})")]
    NonPositiveDimension { field: &'static str, value: f64 },

    #[error("{field} must be a finite number")]
    NonFiniteDimension { field: &'static str },

    #[error("count must be at least 1")]
    ZeroCount,

    #[error("volume is too large to represent")]
    VolumeOverflow,
}

/// Records entered during one session, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<MeasurementRecord>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `input`, derive its volume and append it.
    ///
    /// Every dimension must be finite and strictly positive and `count` must be
    /// at least 1. A blank species is stored as [`UNNAMED_SPECIES`].
    pub fn append(&mut self, input: NewRecordInput) -> Result<&MeasurementRecord, ValidationError> {
        check_dimension("width_cm", input.width_cm)?;
        check_dimension("thickness_cm", input.thickness_cm)?;
        check_dimension("length_cm", input.length_cm)?;
        if input.count == 0 {
            return Err(ValidationError::ZeroCount);
        }

        let species = match input.species.trim() {
            "" => UNNAMED_SPECIES.to_string(),
            s => s.to_string(),
        };

        let volume_m3 = MeasurementRecord::volume_of(
            input.count,
            input.width_cm,
            input.thickness_cm,
            input.length_cm,
        );
        if !volume_m3.is_finite() {
            return Err(ValidationError::VolumeOverflow);
        }

        self.records.push(MeasurementRecord {
            species,
            count: input.count,
            width_cm: input.width_cm,
            thickness_cm: input.thickness_cm,
            length_cm: input.length_cm,
            volume_m3,
        });

        Ok(&self.records[self.records.len() - 1])
    }

    /// Drop every record. Clearing an empty store is a no-op.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn list(&self) -> &[MeasurementRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn summary(&self) -> Summary {
        Summary::from_records(&self.records)
    }
}

fn check_dimension(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteDimension { field });
    }
    if value <= 0.0 {
        return Err(ValidationError::NonPositiveDimension { field, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_returns_the_stored_record() {
        let mut store = RecordStore::new();
        let record = store
            .append(NewRecordInput::new("Çam", 2, 10.0, 5.0, 400.0))
            .unwrap()
            .clone();

        assert_eq!(record.volume_m3, 0.04);
        assert_eq!(store.list(), &[record]);
    }

    #[test]
    fn nan_dimension_is_refused() {
        let mut store = RecordStore::new();
        let err = store
            .append(NewRecordInput::new("Çam", 1, f64::NAN, 5.0, 400.0))
            .unwrap_err();

        assert_eq!(err, ValidationError::NonFiniteDimension { field: "width_cm" });
        assert!(store.is_empty());
    }

    #[test]
    fn error_message_names_the_field() {
        let mut store = RecordStore::new();
        let err = store
            .append(NewRecordInput::new("Çam", 1, 10.0, 5.0, -1.0))
            .unwrap_err();

        assert_eq!(err.to_string(), "length_cm must be greater than zero (got -1)");
    }
}
