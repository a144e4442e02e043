//! L4 collaborator wiring: the `Engine` struct ties the five storage
//! ports together. the actual public operations (`add`, `commit`, `log`,
//! ...) live in `ops`, as free functions over `&Engine`/`&mut Engine`,
//! following the teacher's own split between a plain collaborator struct
//! and free-function operations in `ops/`.

use crate::storage::{BlobStorage, CommitStorage, RefStorage, StagingStorage, TreeStorage};

pub struct Engine<B, T, C, R, S>
where
    B: BlobStorage,
    T: TreeStorage,
    C: CommitStorage,
    R: RefStorage,
    S: StagingStorage,
{
    pub(crate) blobs: B,
    pub(crate) trees: T,
    pub(crate) commits: C,
    pub(crate) refs: R,
    pub(crate) staging: S,
}

impl<B, T, C, R, S> Engine<B, T, C, R, S>
where
    B: BlobStorage,
    T: TreeStorage,
    C: CommitStorage,
    R: RefStorage,
    S: StagingStorage,
{
    pub fn new(blobs: B, trees: T, commits: C, refs: R, staging: S) -> Self {
        Self {
            blobs,
            trees,
            commits,
            refs,
            staging,
        }
    }

    pub fn blobs(&self) -> &B {
        &self.blobs
    }

    pub fn trees(&self) -> &T {
        &self.trees
    }

    pub fn commits(&self) -> &C {
        &self.commits
    }

    pub fn refs(&self) -> &R {
        &self.refs
    }

    pub fn staging(&self) -> &S {
        &self.staging
    }
}
