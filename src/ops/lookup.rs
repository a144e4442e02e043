//! `tree_lookup`, `get_commit`, `get_commit_from_ref`: pure reads.

use crate::engine::Engine;
use crate::error::Result;
use crate::hash::Hash;
use crate::object::{Commit, TreeNode};
use crate::storage::{BlobStorage, CommitStorage, RefStorage, StagingStorage, TreeStorage};

use super::common::resolve_path;

pub async fn tree_lookup<B, T, C, R, S>(
    engine: &Engine<B, T, C, R, S>,
    tree_hash: Hash,
    path: &[String],
) -> Result<Option<TreeNode>>
where
    B: BlobStorage,
    T: TreeStorage,
    C: CommitStorage,
    R: RefStorage,
    S: StagingStorage,
{
    resolve_path(engine.trees(), Some(tree_hash), path).await
}

pub async fn get_commit<B, T, C, R, S>(
    engine: &Engine<B, T, C, R, S>,
    hash: Hash,
) -> Result<Option<Commit>>
where
    B: BlobStorage,
    T: TreeStorage,
    C: CommitStorage,
    R: RefStorage,
    S: StagingStorage,
{
    Ok(engine.commits().load(&hash).await?)
}

pub async fn get_commit_from_ref<B, T, C, R, S>(
    engine: &Engine<B, T, C, R, S>,
    ref_name: &str,
) -> Result<Option<Commit>>
where
    B: BlobStorage,
    T: TreeStorage,
    C: CommitStorage,
    R: RefStorage,
    S: StagingStorage,
{
    let Some(r) = engine.refs().load(ref_name).await? else {
        return Ok(None);
    };
    Ok(engine.commits().load(&r.commit_ref).await?)
}
