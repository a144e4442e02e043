//! mark-and-sweep reachability from every ref.

use std::collections::HashSet;

use crate::engine::Engine;
use crate::error::Result;
use crate::hash::Hash;
use crate::object::TreeNode;
use crate::storage::{BlobStorage, CommitStorage, RefStorage, StagingStorage, TreeStorage};

/// counts of objects deleted by one `gc` pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GcCounts {
    pub commits: usize,
    pub trees: usize,
    pub blobs: usize,
}

#[tracing::instrument(skip(engine))]
pub async fn gc<B, T, C, R, S>(engine: &Engine<B, T, C, R, S>) -> Result<GcCounts>
where
    B: BlobStorage,
    T: TreeStorage,
    C: CommitStorage,
    R: RefStorage,
    S: StagingStorage,
{
    let mut reachable_commits = HashSet::new();
    let mut reachable_trees = HashSet::new();
    let mut reachable_blobs = HashSet::new();

    for ref_name in engine.refs().list_all().await? {
        let Some(r) = engine.refs().load(&ref_name).await? else {
            continue;
        };
        mark_commit_chain(engine, r.commit_ref, &mut reachable_commits).await?;
    }

    for commit_hash in &reachable_commits {
        let commit = engine
            .commits()
            .load(commit_hash)
            .await?
            .expect("commit marked reachable must exist");
        if let Some(tree_ref) = commit.tree_ref {
            mark_tree(engine, tree_ref, &mut reachable_trees, &mut reachable_blobs).await?;
        }
    }

    let mut counts = GcCounts::default();

    for hash in engine.commits().list_all().await? {
        if !reachable_commits.contains(&hash) {
            engine.commits().delete(&hash).await?;
            counts.commits += 1;
        }
    }
    for hash in engine.trees().list_all().await? {
        if !reachable_trees.contains(&hash) {
            engine.trees().delete(&hash).await?;
            counts.trees += 1;
        }
    }
    for hash in engine.blobs().list_all().await? {
        if !reachable_blobs.contains(&hash) {
            engine.blobs().delete(&hash).await?;
            counts.blobs += 1;
        }
    }

    tracing::info!(
        deleted_commits = counts.commits,
        deleted_trees = counts.trees,
        deleted_blobs = counts.blobs,
        "gc complete"
    );

    Ok(counts)
}

async fn mark_commit_chain<B, T, C, R, S>(
    engine: &Engine<B, T, C, R, S>,
    start: Hash,
    reachable: &mut HashSet<Hash>,
) -> Result<()>
where
    B: BlobStorage,
    T: TreeStorage,
    C: CommitStorage,
    R: RefStorage,
    S: StagingStorage,
{
    let mut next = Some(start);
    while let Some(hash) = next {
        if !reachable.insert(hash) {
            break;
        }
        next = engine
            .commits()
            .load(&hash)
            .await?
            .and_then(|commit| commit.previous_commit_ref);
    }
    Ok(())
}

fn mark_tree<'a, B, T, C, R, S>(
    engine: &'a Engine<B, T, C, R, S>,
    hash: Hash,
    reachable_trees: &'a mut HashSet<Hash>,
    reachable_blobs: &'a mut HashSet<Hash>,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<()>> + Send + 'a>>
where
    B: BlobStorage,
    T: TreeStorage,
    C: CommitStorage,
    R: RefStorage,
    S: StagingStorage,
{
    Box::pin(async move {
        if !reachable_trees.insert(hash) {
            return Ok(());
        }
        let Some(node) = engine.trees().load(&hash).await? else {
            return Ok(());
        };
        match node {
            TreeNode::Leaf(leaf) => {
                reachable_blobs.insert(leaf.blob_ref);
            }
            TreeNode::Internal(internal) => {
                for child_hash in internal.children_refs {
                    mark_tree(engine, child_hash, reachable_trees, reachable_blobs).await?;
                }
            }
        }
        Ok(())
    })
}
