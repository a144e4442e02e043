//! the commit protocol: stage, build, persist, CAS.

use crate::builder::TreeBuilder;
use crate::engine::Engine;
use crate::error::{Error, Result};
use crate::object::{Commit, Ref, StagingChangeType};
use crate::storage::{BlobStorage, CommitStorage, RefStorage, StagingStorage, TreeStorage};

use super::lookup::get_commit_from_ref;
use super::staging::get_staging_changes;

#[tracing::instrument(skip(engine, message), fields(ref_name = %ref_name))]
pub async fn commit<B, T, C, R, S>(
    engine: &Engine<B, T, C, R, S>,
    ref_name: &str,
    message: &str,
) -> Result<()>
where
    B: BlobStorage,
    T: TreeStorage,
    C: CommitStorage,
    R: RefStorage,
    S: StagingStorage,
{
    let changes = get_staging_changes(engine, ref_name).await?;
    if changes.is_empty() {
        return Err(Error::NoChangesToCommit);
    }

    let head_commit = get_commit_from_ref(engine, ref_name).await?;
    let expected_commit_hash = head_commit.as_ref().map(Commit::hash);

    let mut builder = match &head_commit {
        Some(commit) => match commit.tree_ref {
            Some(tree_hash) => {
                let root = engine
                    .trees()
                    .load(&tree_hash)
                    .await?
                    .ok_or_else(|| Error::Malformed(format!("head tree {tree_hash} missing")))?;
                let internal = root.as_internal().ok_or_else(|| {
                    Error::InvariantViolation("head root is not an internal node".into())
                })?;
                TreeBuilder::from_existing(internal.clone())
            }
            None => TreeBuilder::create_root(),
        },
        None => TreeBuilder::create_root(),
    };

    for change in &changes {
        match change.change_type {
            StagingChangeType::Add | StagingChangeType::Update => {
                let blob = change
                    .item
                    .blob
                    .as_ref()
                    .ok_or_else(|| Error::InvariantViolation("add/update without blob".into()))?;
                engine.blobs().save(blob).await?;
                builder
                    .save(&change.item.path, blob.hash(), engine.trees())
                    .await?;
            }
            StagingChangeType::Remove => {
                builder.remove(&change.item.path, engine.trees()).await?;
            }
            StagingChangeType::Unchanged => unreachable!("pruned by get_staging_changes"),
        }
    }

    let new_tree_ref = builder.persist(engine.trees()).await?;

    let new_commit = Commit::new(
        message,
        new_tree_ref,
        head_commit.as_ref().map(Commit::hash),
    );
    engine.commits().save(&new_commit).await?;

    let new_ref = Ref::new(ref_name, new_commit.hash());
    let succeeded = engine
        .refs()
        .compare_and_swap(&new_ref, expected_commit_hash.as_ref())
        .await?;

    if !succeeded {
        tracing::warn!(ref_name, "concurrent modification, CAS rejected");
        return Err(Error::ConcurrentModification {
            ref_name: ref_name.to_string(),
        });
    }

    engine.staging().clear().await?;
    Ok(())
}
