//! Lumber volume tally: per-session record lists, per-species summaries and
//! PDF export, served over HTTP for an interactive form.

pub mod api;
pub mod config;
pub mod models;
pub mod report;
pub mod sessions;
pub mod store;
