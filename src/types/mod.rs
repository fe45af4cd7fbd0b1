//! Shortlink Visit Analyser - Type System
//!
//! - `common`: Shared types used across import and analysis (LinkCsvRow,
//!   VisitCsvRow, LinkDetails, Visit, VisitRecord, BucketUnit)
//! - `analysis_results`: Structured reports returned by the analysis engine
//! - `statistics`: Import run counters and timing
//! - `visualisation`: Plotly chart payload types

mod common;

pub mod analysis_results;
pub mod statistics;
pub mod visualisation;

// Re-export the shared types at the module root
pub use common::{BucketUnit, LinkCsvRow, LinkDetails, Visit, VisitCsvRow, VisitRecord};
pub use statistics::{ImportStats, TimingInfo};
