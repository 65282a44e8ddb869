//! Domain models for the lumber ledger.
//!
//! # Core Concepts
//!
//! - [`MeasurementRecord`]: one manually entered lumber batch with its derived
//!   volume in cubic meters. Records are only ever created through validation,
//!   so every stored record has strictly positive dimensions.
//! - [`NewRecordInput`]: the raw form submission a record is built from.
//! - [`Summary`]: per-species totals and the grand total, derived from the
//!   current record list on demand. Nothing derived is ever stored.
//! - [`SessionView`]: what a session's form re-renders from after every action.

mod record;
mod session;
mod species;
mod summary;

pub use record::*;
pub use session::*;
pub use species::*;
pub use summary::*;
