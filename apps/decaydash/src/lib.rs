//! decaydash core library.
//!
//! This crate renders a predictive data-decay dataset (repositories,
//! technology risk rows, alerts, summary counters) into a status panel.
//!
//! High-level modules:
//! - `classify`: Status, trend and risk-bar classification rules.
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Discovery and effective configuration resolution.
//! - `dataset`: Dataset loading and the embedded sample.
//! - `error`: Error and result types.
//! - `filter`: Repository and time-range selectors.
//! - `gate`: Simulated load gate with spinner.
//! - `models`: Dataset models and check report structs.
//! - `output`: Human/JSON printers for dashboard, check, and classify.
//! - `utils`: Supporting helpers.
//! - `validate`: Data-contract checks.
pub mod classify;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod filter;
pub mod gate;
pub mod models;
pub mod output;
pub mod utils;
pub mod validate;

pub use error::{DecayError, Result};
