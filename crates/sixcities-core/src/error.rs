use thiserror::Error;

/// Core error type shared across sixcities crates.
#[derive(Debug, Error)]
pub enum Error {
    /// A value does not belong to one of the fixed enumerations.
    #[error("unknown {kind}: '{value}'")]
    UnknownVariant { kind: &'static str, value: String },
}

/// Convenience alias for results returned by the core crate.
pub type Result<T> = std::result::Result<T, Error>;
