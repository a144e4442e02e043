use crate::Hash;

/// the crate's single error type.
///
/// every failure surfaced by the engine lands in one of these variants
/// `Storage` is the only variant with an open
/// payload: it carries whatever a storage-port implementation reports,
/// unchanged.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no changes to commit")]
    NoChangesToCommit,

    #[error("concurrent modification of ref {ref_name:?}")]
    ConcurrentModification { ref_name: String },

    #[error("{what} not found: {hash}")]
    NotFound { what: &'static str, hash: Hash },

    #[error("malformed object: {0}")]
    Malformed(String),

    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type Result<T> = std::result::Result<T, Error>;

/// opaque wrapper around a storage-port implementation's own error type.
///
/// the engine never inspects the contents; it exists so `BlobStorage`,
/// `TreeStorage`, `CommitStorage`, `RefStorage`, and `StagingStorage`
/// implementors can report I/O errors, database errors, network errors,
/// or anything else, without this crate naming a concrete backend.
#[derive(Debug, thiserror::Error)]
#[error("storage error: {0}")]
pub struct StorageError(#[source] Box<dyn std::error::Error + Send + Sync>);

impl StorageError {
    pub fn new(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self(Box::new(source))
    }

    pub fn from_message(message: impl Into<String>) -> Self {
        Self(Box::new(MessageError(message.into())))
    }
}

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct MessageError(String);
