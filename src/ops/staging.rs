//! `add`, `remove`, `clear`, `get_staging_changes`.

use crate::engine::Engine;
use crate::error::{Error, Result};
use crate::object::{classify, StagingChange, StagingChangeType, StagingItem};
use crate::storage::{BlobStorage, CommitStorage, RefStorage, StagingStorage, TreeStorage};

use super::common::{head_tree_hash, resolve_path};

/// stage `item` against `ref_name`'s current tree, dropping it
/// immediately if it would be classified `Unchanged`.
pub async fn add<B, T, C, R, S>(
    engine: &Engine<B, T, C, R, S>,
    ref_name: &str,
    item: StagingItem,
) -> Result<()>
where
    B: BlobStorage,
    T: TreeStorage,
    C: CommitStorage,
    R: RefStorage,
    S: StagingStorage,
{
    if item.path.is_empty() {
        return Err(Error::InvariantViolation("path empty".into()));
    }

    let tree_hash = head_tree_hash(engine, ref_name).await?;
    let existing = resolve_path(engine.trees(), tree_hash, &item.path).await?;

    if classify(existing.as_ref(), &item) == StagingChangeType::Unchanged {
        return Ok(());
    }

    engine.staging().add(item).await?;
    Ok(())
}

pub async fn remove<B, T, C, R, S>(engine: &Engine<B, T, C, R, S>, path: Vec<String>) -> Result<()>
where
    B: BlobStorage,
    T: TreeStorage,
    C: CommitStorage,
    R: RefStorage,
    S: StagingStorage,
{
    if path.is_empty() {
        return Err(Error::InvariantViolation("path empty".into()));
    }
    engine.staging().remove(&path).await?;
    Ok(())
}

pub async fn clear<B, T, C, R, S>(engine: &Engine<B, T, C, R, S>) -> Result<()>
where
    B: BlobStorage,
    T: TreeStorage,
    C: CommitStorage,
    R: RefStorage,
    S: StagingStorage,
{
    engine.staging().clear().await?;
    Ok(())
}

/// load all staged items, classify each against `ref_name`'s current
/// tree, self-prune any that turn out `Unchanged`, and return the rest.
pub async fn get_staging_changes<B, T, C, R, S>(
    engine: &Engine<B, T, C, R, S>,
    ref_name: &str,
) -> Result<Vec<StagingChange>>
where
    B: BlobStorage,
    T: TreeStorage,
    C: CommitStorage,
    R: RefStorage,
    S: StagingStorage,
{
    let items = engine.staging().load().await?;
    let tree_hash = head_tree_hash(engine, ref_name).await?;

    let mut changes = Vec::new();
    for item in items {
        let existing = resolve_path(engine.trees(), tree_hash, &item.path).await?;
        let change_type = classify(existing.as_ref(), &item);

        if change_type == StagingChangeType::Unchanged {
            engine.staging().remove(&item.path).await?;
        } else {
            changes.push(StagingChange { item, change_type });
        }
    }

    Ok(changes)
}
