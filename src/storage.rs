//! L2: storage ports.
//!
//! five narrow async traits the engine consumes and never implements
//! itself. every method may suspend and may fail; failures propagate
//! through [`crate::error::StorageError`] unchanged.

use async_trait::async_trait;

use crate::error::StorageError;
use crate::hash::Hash;
use crate::object::{Commit, Ref, StagingItem, TreeNode};
use crate::object::blob::Blob;

#[async_trait]
pub trait BlobStorage: Send + Sync {
    async fn load(&self, hash: &Hash) -> Result<Option<Blob>, StorageError>;
    /// idempotent by hash: saving a blob already present is a no-op.
    async fn save(&self, blob: &Blob) -> Result<(), StorageError>;
    async fn delete(&self, hash: &Hash) -> Result<(), StorageError>;
    async fn list_all(&self) -> Result<Vec<Hash>, StorageError>;
}

#[async_trait]
pub trait TreeStorage: Send + Sync {
    async fn load(&self, hash: &Hash) -> Result<Option<TreeNode>, StorageError>;
    /// idempotent by hash.
    async fn save(&self, node: &TreeNode) -> Result<(), StorageError>;
    async fn delete(&self, hash: &Hash) -> Result<(), StorageError>;
    async fn list_all(&self) -> Result<Vec<Hash>, StorageError>;
}

#[async_trait]
pub trait CommitStorage: Send + Sync {
    async fn load(&self, hash: &Hash) -> Result<Option<Commit>, StorageError>;
    /// idempotent by hash.
    async fn save(&self, commit: &Commit) -> Result<(), StorageError>;
    async fn delete(&self, hash: &Hash) -> Result<(), StorageError>;
    async fn list_all(&self) -> Result<Vec<Hash>, StorageError>;
}

#[async_trait]
pub trait RefStorage: Send + Sync {
    async fn load(&self, name: &str) -> Result<Option<Ref>, StorageError>;
    /// unconditional replace, used by `reset`.
    async fn save(&self, r: &Ref) -> Result<(), StorageError>;
    async fn delete(&self, name: &str) -> Result<(), StorageError>;
    async fn list_all(&self) -> Result<Vec<String>, StorageError>;

    /// atomically update `r` iff the ref's current `commit_ref` equals
    /// `expected`. `expected == None` means "the ref must not currently
    /// exist". returns `true` on success. must be linearizable - this is
    /// the engine's only atomicity requirement of a storage port.
    async fn compare_and_swap(
        &self,
        r: &Ref,
        expected: Option<&Hash>,
    ) -> Result<bool, StorageError>;
}

#[async_trait]
pub trait StagingStorage: Send + Sync {
    async fn load(&self) -> Result<Vec<StagingItem>, StorageError>;
    /// replaces any existing entry at the same path.
    async fn add(&self, item: StagingItem) -> Result<(), StorageError>;
    async fn remove(&self, path: &[String]) -> Result<(), StorageError>;
    async fn clear(&self) -> Result<(), StorageError>;
}
