use thiserror::Error;

/// Back-end store/retrieve failure reported by a repository port adapter.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("backend {name} failed during {operation}: {reason}")]
    Backend {
        name: String,
        operation: &'static str,
        reason: String,
    },
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{serializer} serialization failed: {reason}")]
    Serialization {
        serializer: &'static str,
        reason: String,
    },

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Aggregate raised after every registered serializer has been attempted
    /// for a batch. `failed` of `attempted` targets reported an error.
    #[error("{failed} of {attempted} fan-out targets failed for the batch: {summary}")]
    Fanout {
        attempted: usize,
        failed: usize,
        summary: String,
    },
}
