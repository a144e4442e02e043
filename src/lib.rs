//! objgraph - a content-addressed version-control core
//!
//! a Git-like object graph - blobs, trees, commits, refs - plus the
//! tree-mutation builder and commit protocol that make editing it safe
//! under concurrent writers. the engine owns no storage of its own; it
//! is generic over five storage traits (`storage`) supplied by the
//! embedding application.
//!
//! # Core concepts
//!
//! - **Blob**: content-addressed byte data, hashed by SHA-1.
//! - **TreeNode**: a leaf (file) or internal node (directory), hashed
//!   by content and, for internal nodes, by the sorted hashes of its
//!   children.
//! - **Commit**: a snapshot pointing at a root tree and a parent commit.
//! - **Ref**: a named mutable pointer to a commit, updated only by
//!   compare-and-swap (`commit`) or unconditional replace (`reset`).
//!
//! # Example usage
//!
//! ```no_run
//! # async fn run() -> objgraph::Result<()> {
//! use objgraph::{ops, Engine};
//! use objgraph::object::{Blob, StagingItem};
//! use objgraph::testing::{
//!     InMemoryBlobStorage, InMemoryCommitStorage, InMemoryRefStorage,
//!     InMemoryStagingStorage, InMemoryTreeStorage,
//! };
//!
//! let engine = Engine::new(
//!     InMemoryBlobStorage::new(),
//!     InMemoryTreeStorage::new(),
//!     InMemoryCommitStorage::new(),
//!     InMemoryRefStorage::new(),
//!     InMemoryStagingStorage::new(),
//! );
//!
//! let item = StagingItem::write(vec!["hello.txt".into()], Blob::new(b"hi".to_vec()));
//! ops::add(&engine, "main", item).await?;
//! ops::commit(&engine, "main", "initial commit").await?;
//! # Ok(())
//! # }
//! ```

mod builder;
mod engine;
mod error;
mod hash;

pub mod object;
pub mod ops;
pub mod storage;
pub mod testing;

pub use engine::Engine;
pub use error::{Error, Result, StorageError};
pub use hash::Hash;
