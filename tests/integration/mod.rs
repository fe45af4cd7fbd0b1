//! End-to-end suites exercising import and analysis together
//! across the import, storage and analysis layers.

pub mod cli_smoke_test;
pub mod import_pipeline;
