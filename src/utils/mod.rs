//! Shared utility functions
//!
//! Pure helpers with no database or I/O dependencies: timestamp handling
//! and display formatting.

pub mod format;
pub mod time;
