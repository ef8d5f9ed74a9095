//! Core contracts for the sixcities offer pipeline.
//!
//! This crate defines the rental offer model, the fixed enumerations, the TSV
//! column layout and the row validator shared by the generator, the importer
//! and the CLI.

pub mod columns;
pub mod error;
pub mod model;
pub mod row;
pub mod types;
pub mod validation;

pub use columns::{AMENITY_SEPARATOR, IMAGE_COUNT, IMAGE_SEPARATOR, TSV_COLUMNS};
pub use error::{Error, Result};
pub use model::{RentalOffer, TemplateItem, round_to};
pub use row::RawRow;
pub use types::{Amenity, City, Coordinates, HomeType};
pub use validation::{ValidationIssue, ValidationResult, validate_row};
