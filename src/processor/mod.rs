pub mod csv_import;
pub mod progress;

pub use csv_import::*;
pub use progress::*;
