use thiserror::Error;

/// Faults raised while talking to the backing store.
///
/// None of these ever cross the tool boundary: the operations in
/// `crate::tools::sql` turn them into `QueryResult::Error` records.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed structured input (bad JSON, wrong JSON shape)
    #[error("{0}")]
    Decode(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("store task failed: {0}")]
    Task(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;
