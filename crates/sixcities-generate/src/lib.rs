//! Synthetic offer generation for sixcities.
//!
//! Templates are loaded from a [`TemplateSource`], expanded into randomized
//! offers one at a time and streamed to a TSV file with constant memory use.

pub mod engine;
pub mod errors;
pub mod generator;
pub mod model;
pub mod output;
pub mod templates;
pub mod writer;

pub use engine::GenerationEngine;
pub use errors::GenerationError;
pub use generator::{RecordGenerator, RecordStream, check_templates};
pub use model::{GenerateOptions, GenerationReport, WriteSummary};
pub use output::tsv::TsvEncoder;
pub use templates::{
    FileTemplateSource, HttpTemplateSource, StaticTemplateSource, TemplateSource, load_templates,
    template_source,
};
pub use writer::{StreamingWriter, parse_record_count};
