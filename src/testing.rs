//! in-memory storage-port implementations used by this crate's own test
//! suite. not a recommended storage backend: no durability, no
//! persistence across a process, lock-step `std::sync::Mutex` access.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::StorageError;
use crate::hash::Hash;
use crate::object::{Blob, Commit, Ref, StagingItem, TreeNode};
use crate::storage::{BlobStorage, CommitStorage, RefStorage, StagingStorage, TreeStorage};

#[derive(Default)]
pub struct InMemoryBlobStorage {
    data: Mutex<HashMap<Hash, Blob>>,
}

impl InMemoryBlobStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlobStorage for InMemoryBlobStorage {
    async fn load(&self, hash: &Hash) -> Result<Option<Blob>, StorageError> {
        Ok(self.data.lock().unwrap().get(hash).cloned())
    }

    async fn save(&self, blob: &Blob) -> Result<(), StorageError> {
        self.data
            .lock()
            .unwrap()
            .entry(blob.hash())
            .or_insert_with(|| blob.clone());
        Ok(())
    }

    async fn delete(&self, hash: &Hash) -> Result<(), StorageError> {
        self.data.lock().unwrap().remove(hash);
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Hash>, StorageError> {
        Ok(self.data.lock().unwrap().keys().copied().collect())
    }
}

/// tracks every hash loaded, so tests can assert an untouched subtree
/// was never read (see `builder::tests`).
#[derive(Default)]
pub struct InMemoryTreeStorage {
    data: Mutex<HashMap<Hash, TreeNode>>,
    reads: Mutex<Vec<Hash>>,
}

impl InMemoryTreeStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read_log(&self) -> Vec<Hash> {
        self.reads.lock().unwrap().clone()
    }

    pub fn reset_read_log(&self) {
        self.reads.lock().unwrap().clear();
    }
}

#[async_trait]
impl TreeStorage for InMemoryTreeStorage {
    async fn load(&self, hash: &Hash) -> Result<Option<TreeNode>, StorageError> {
        self.reads.lock().unwrap().push(*hash);
        Ok(self.data.lock().unwrap().get(hash).cloned())
    }

    async fn save(&self, node: &TreeNode) -> Result<(), StorageError> {
        self.data
            .lock()
            .unwrap()
            .entry(node.hash())
            .or_insert_with(|| node.clone());
        Ok(())
    }

    async fn delete(&self, hash: &Hash) -> Result<(), StorageError> {
        self.data.lock().unwrap().remove(hash);
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Hash>, StorageError> {
        Ok(self.data.lock().unwrap().keys().copied().collect())
    }
}

#[derive(Default)]
pub struct InMemoryCommitStorage {
    data: Mutex<HashMap<Hash, Commit>>,
}

impl InMemoryCommitStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CommitStorage for InMemoryCommitStorage {
    async fn load(&self, hash: &Hash) -> Result<Option<Commit>, StorageError> {
        Ok(self.data.lock().unwrap().get(hash).cloned())
    }

    async fn save(&self, commit: &Commit) -> Result<(), StorageError> {
        self.data
            .lock()
            .unwrap()
            .entry(commit.hash())
            .or_insert_with(|| commit.clone());
        Ok(())
    }

    async fn delete(&self, hash: &Hash) -> Result<(), StorageError> {
        self.data.lock().unwrap().remove(hash);
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Hash>, StorageError> {
        Ok(self.data.lock().unwrap().keys().copied().collect())
    }
}

#[derive(Default)]
pub struct InMemoryRefStorage {
    data: Mutex<HashMap<String, Ref>>,
}

impl InMemoryRefStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RefStorage for InMemoryRefStorage {
    async fn load(&self, name: &str) -> Result<Option<Ref>, StorageError> {
        Ok(self.data.lock().unwrap().get(name).cloned())
    }

    async fn save(&self, r: &Ref) -> Result<(), StorageError> {
        self.data.lock().unwrap().insert(r.name.clone(), r.clone());
        Ok(())
    }

    async fn delete(&self, name: &str) -> Result<(), StorageError> {
        self.data.lock().unwrap().remove(name);
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<String>, StorageError> {
        Ok(self.data.lock().unwrap().keys().cloned().collect())
    }

    async fn compare_and_swap(
        &self,
        r: &Ref,
        expected: Option<&Hash>,
    ) -> Result<bool, StorageError> {
        let mut data = self.data.lock().unwrap();
        let current = data.get(&r.name).map(|existing| existing.commit_ref);
        let matches = match expected {
            Some(hash) => current == Some(*hash),
            None => current.is_none(),
        };
        if matches {
            data.insert(r.name.clone(), r.clone());
        }
        Ok(matches)
    }
}

#[derive(Default)]
pub struct InMemoryStagingStorage {
    items: Mutex<Vec<StagingItem>>,
}

impl InMemoryStagingStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StagingStorage for InMemoryStagingStorage {
    async fn load(&self) -> Result<Vec<StagingItem>, StorageError> {
        Ok(self.items.lock().unwrap().clone())
    }

    async fn add(&self, item: StagingItem) -> Result<(), StorageError> {
        let mut items = self.items.lock().unwrap();
        items.retain(|existing| existing.path_key() != item.path_key());
        items.push(item);
        Ok(())
    }

    async fn remove(&self, path: &[String]) -> Result<(), StorageError> {
        let key = path.join("/");
        self.items.lock().unwrap().retain(|item| item.path_key() != key);
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        self.items.lock().unwrap().clear();
        Ok(())
    }
}
