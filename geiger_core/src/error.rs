use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum GeigerError {
    #[error("display error: {0}")]
    Display(String),
    #[error("touch read error: {0}")]
    Touch(String),
    #[error("battery read error: {0}")]
    Battery(String),
    #[error("hardware error: {0}")]
    Hardware(String),
}

/// Wrap a boxed collaborator error into the given typed variant.
pub(crate) fn map_hw_error(
    variant: fn(String) -> GeigerError,
    e: &(dyn std::error::Error + 'static),
) -> eyre::Report {
    eyre::Report::new(variant(e.to_string()))
}

pub type Result<T> = eyre::Result<T>;
pub use eyre::Report;
