//! Unit Test Suites
//!
//! Focused tests for individual pipeline components.

pub mod importer;
