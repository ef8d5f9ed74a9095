//! Streaming TSV import for sixcities.
//!
//! Files are read line by line into [`RawRow`]s, every row is validated and
//! the outcome is handed to a [`Reporter`]. Invalid rows never stop the run.
//!
//! [`RawRow`]: sixcities_core::RawRow

pub mod engine;
pub mod errors;
pub mod model;
pub mod parser;
pub mod reporter;

pub use engine::ImportEngine;
pub use errors::ImportError;
pub use model::ImportReport;
pub use parser::TsvParser;
pub use reporter::Reporter;
