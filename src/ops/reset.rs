//! `reset`: unconditional ref rewrite, no CAS.

use crate::engine::Engine;
use crate::error::{Error, Result};
use crate::hash::Hash;
use crate::object::Ref;
use crate::storage::{BlobStorage, CommitStorage, RefStorage, StagingStorage, TreeStorage};

pub async fn reset<B, T, C, R, S>(
    engine: &Engine<B, T, C, R, S>,
    ref_name: &str,
    commit_hash: Hash,
) -> Result<()>
where
    B: BlobStorage,
    T: TreeStorage,
    C: CommitStorage,
    R: RefStorage,
    S: StagingStorage,
{
    if engine.commits().load(&commit_hash).await?.is_none() {
        return Err(Error::NotFound {
            what: "commit",
            hash: commit_hash,
        });
    }
    engine.refs().save(&Ref::new(ref_name, commit_hash)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Engine;
    use crate::hash::Hash;
    use crate::object::{Blob, StagingItem};
    use crate::ops::{add, commit, get_commit_from_ref, tree_lookup};
    use crate::testing::{
        InMemoryBlobStorage, InMemoryCommitStorage, InMemoryRefStorage, InMemoryStagingStorage,
        InMemoryTreeStorage,
    };

    fn fresh_engine() -> Engine<
        InMemoryBlobStorage,
        InMemoryTreeStorage,
        InMemoryCommitStorage,
        InMemoryRefStorage,
        InMemoryStagingStorage,
    > {
        Engine::new(
            InMemoryBlobStorage::new(),
            InMemoryTreeStorage::new(),
            InMemoryCommitStorage::new(),
            InMemoryRefStorage::new(),
            InMemoryStagingStorage::new(),
        )
    }

    #[tokio::test]
    async fn reset_to_missing_commit_fails() {
        let engine = fresh_engine();
        let err = reset(&engine, "main", Hash::of(b"nope")).await;
        assert!(matches!(err, Err(Error::NotFound { .. })));
    }

    #[tokio::test]
    async fn reset_to_prior_commit_scenario() {
        let engine = fresh_engine();
        add(
            &engine,
            "main",
            StagingItem::write(vec!["file.txt".into()], Blob::new(b"v1".to_vec())),
        )
        .await
        .unwrap();
        commit(&engine, "main", "Commit 1").await.unwrap();
        let first = get_commit_from_ref(&engine, "main").await.unwrap().unwrap();

        add(
            &engine,
            "main",
            StagingItem::write(vec!["file.txt".into()], Blob::new(b"v2".to_vec())),
        )
        .await
        .unwrap();
        commit(&engine, "main", "Commit 2").await.unwrap();

        reset(&engine, "main", first.hash()).await.unwrap();

        let head = get_commit_from_ref(&engine, "main").await.unwrap().unwrap();
        assert_eq!(head.message, "Commit 1");
        let leaf = tree_lookup(&engine, head.tree_ref.unwrap(), &["file.txt".into()])
            .await
            .unwrap()
            .unwrap();
        assert_eq!(leaf.as_leaf().unwrap().blob_ref, Hash::of(b"v1"));
    }

    #[tokio::test]
    async fn reset_creates_ref_if_absent() {
        let engine = fresh_engine();
        add(
            &engine,
            "main",
            StagingItem::write(vec!["a".into()], Blob::new(b"x".to_vec())),
        )
        .await
        .unwrap();
        commit(&engine, "main", "m").await.unwrap();
        let head = get_commit_from_ref(&engine, "main").await.unwrap().unwrap();

        reset(&engine, "dev", head.hash()).await.unwrap();
        let dev_head = get_commit_from_ref(&engine, "dev").await.unwrap().unwrap();
        assert_eq!(dev_head, head);
    }
}
