use thiserror::Error;

/// Errors raised at the engine boundary.
///
/// Queries never fail: empty corpora, empty queries and unmatched terms all
/// produce an empty result. Only caller-contract violations end up here.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, SearchError>;
