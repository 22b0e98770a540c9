#![forbid(unsafe_code)]

//! Core domain model and classification logic for the body-shape analyzer.
//!
//! This crate provides:
//! - Domain types (measurements, BMI bands, body shapes, analysis records)
//! - The classifier (BMI, WHR, body-shape decision table)
//! - Workout catalog management
//! - Persistence (JSONL record store, history, CSV export)

pub mod types;
pub mod error;
pub mod classifier;
pub mod catalog;
pub mod validation;
pub mod config;
pub mod logging;
pub mod store;
pub mod history;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{get_default_catalog, WorkoutCatalog};
pub use classifier::{analyze, classify_body_shape, compute_bmi, compute_whr};
pub use config::Config;
pub use validation::ValidationLimits;
pub use store::{AnalysisSink, JsonlStore};
pub use history::{find_record, load_history};
pub use export::export_csv;
