//! shared helpers used by more than one operation.

use crate::engine::Engine;
use crate::error::{Error, Result};
use crate::hash::Hash;
use crate::object::TreeNode;
use crate::storage::{BlobStorage, CommitStorage, RefStorage, StagingStorage, TreeStorage};

/// the root tree hash of the commit currently pointed at by `ref_name`,
/// or `None` if the ref doesn't exist or points at an empty tree.
pub(crate) async fn head_tree_hash<B, T, C, R, S>(
    engine: &Engine<B, T, C, R, S>,
    ref_name: &str,
) -> Result<Option<Hash>>
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
    let commit = engine
        .commits()
        .load(&r.commit_ref)
        .await?
        .ok_or_else(|| Error::Malformed(format!("ref {ref_name:?} points at missing commit {}", r.commit_ref)))?;
    Ok(commit.tree_ref)
}

/// walk from `root` (if any) following `path` one component at a time,
/// loading each internal node's children to find the one named by that
/// component. children are addressed only by hash in their
/// parent, so resolving a name requires loading the candidate.
pub(crate) async fn resolve_path(
    trees: &dyn TreeStorage,
    root: Option<Hash>,
    path: &[String],
) -> Result<Option<TreeNode>> {
    let Some(root_hash) = root else {
        return Ok(None);
    };
    let mut current = trees
        .load(&root_hash)
        .await?
        .ok_or_else(|| Error::Malformed(format!("tree root {root_hash} missing")))?;

    for component in path {
        let TreeNode::Internal(internal) = &current else {
            // a leaf before exhausting the path: nothing to find.
            return Ok(None);
        };

        let mut found = None;
        for child_hash in &internal.children_refs {
            let child = trees
                .load(child_hash)
                .await?
                .ok_or_else(|| Error::Malformed(format!("tree node {child_hash} missing")))?;
            if child.name() == component {
                found = Some(child);
                break;
            }
        }

        match found {
            Some(child) => current = child,
            None => return Ok(None),
        }
    }

    Ok(Some(current))
}
