use thiserror::Error;

/// Errors surfaced by the dashboard's data and configuration layers.
///
/// An empty filter result is deliberately absent here: it is a normal
/// dashboard state, see [`crate::data::filter::FilteredView::is_empty`].
#[derive(Error, Debug)]
pub enum DashError {
    /// The dataset could not be provided (missing, unreadable or malformed).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The configuration is inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, DashError>;
