use thiserror::Error;

/// Errors emitted while generating offers.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("invalid template: {0}")]
    InvalidTemplate(String),
    #[error("template source error: {0}")]
    TemplateSource(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("generation task failed: {0}")]
    Task(String),
}
