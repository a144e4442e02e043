//! end-to-end scenarios, literal data, against the public `Engine` surface.

use objgraph::object::{Blob, StagingItem};
use objgraph::ops;
use objgraph::testing::{
    InMemoryBlobStorage, InMemoryCommitStorage, InMemoryRefStorage, InMemoryStagingStorage,
    InMemoryTreeStorage,
};
use objgraph::storage::{CommitStorage, RefStorage, TreeStorage};
use objgraph::{Engine, Error, Hash};

type TestEngine = Engine<
    InMemoryBlobStorage,
    InMemoryTreeStorage,
    InMemoryCommitStorage,
    InMemoryRefStorage,
    InMemoryStagingStorage,
>;

fn fresh_engine() -> TestEngine {
    Engine::new(
        InMemoryBlobStorage::new(),
        InMemoryTreeStorage::new(),
        InMemoryCommitStorage::new(),
        InMemoryRefStorage::new(),
        InMemoryStagingStorage::new(),
    )
}

fn p(s: &str) -> Vec<String> {
    s.split('/').map(String::from).collect()
}

#[tokio::test]
async fn initial_commit() {
    let engine = fresh_engine();

    ops::add(
        &engine,
        "main",
        StagingItem::write(p("test.txt"), Blob::new(b"hello world".to_vec())),
    )
    .await
    .unwrap();
    ops::commit(&engine, "main", "Initial commit with test data")
        .await
        .unwrap();

    let history = ops::log(&engine, "main").await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].message, "Initial commit with test data");
    assert!(history[0].previous_commit_ref.is_none());

    let node = ops::tree_lookup(&engine, history[0].tree_ref.unwrap(), &p("test.txt"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(node.as_leaf().unwrap().blob_ref, Hash::of(b"hello world"));
}

#[tokio::test]
async fn multi_file_single_commit() {
    let engine = fresh_engine();

    ops::add(
        &engine,
        "main",
        StagingItem::write(p("file1.txt"), Blob::new(b"one".to_vec())),
    )
    .await
    .unwrap();
    ops::add(
        &engine,
        "main",
        StagingItem::write(p("file2.txt"), Blob::new(b"two".to_vec())),
    )
    .await
    .unwrap();
    ops::add(
        &engine,
        "main",
        StagingItem::write(p("dir/file3.txt"), Blob::new(b"three".to_vec())),
    )
    .await
    .unwrap();
    ops::commit(&engine, "main", "three files").await.unwrap();

    let head = ops::get_commit_from_ref(&engine, "main").await.unwrap().unwrap();
    let root_hash = head.tree_ref.unwrap();

    for path in ["file1.txt", "file2.txt", "dir/file3.txt"] {
        assert!(
            ops::tree_lookup(&engine, root_hash, &p(path)).await.unwrap().is_some(),
            "{path} should be discoverable"
        );
    }

    let root = engine.trees().load(&root_hash).await.unwrap().unwrap();
    let root_internal = root.as_internal().unwrap();
    assert_eq!(root_internal.children_refs.len(), 3);

    let dir_node = ops::tree_lookup(&engine, root_hash, &p("dir")).await.unwrap().unwrap();
    assert!(dir_node.is_internal());
}

#[tokio::test]
async fn delete_file_preserving_siblings() {
    let engine = fresh_engine();

    for (path, content) in [
        ("file1.txt", "one"),
        ("file2.txt", "two"),
        ("dir/file3.txt", "three"),
    ] {
        ops::add(
            &engine,
            "main",
            StagingItem::write(p(path), Blob::new(content.as_bytes().to_vec())),
        )
        .await
        .unwrap();
    }
    ops::commit(&engine, "main", "three files").await.unwrap();

    ops::add(&engine, "main", StagingItem::delete(p("file2.txt")))
        .await
        .unwrap();
    ops::commit(&engine, "main", "delete file2").await.unwrap();

    let head = ops::get_commit_from_ref(&engine, "main").await.unwrap().unwrap();
    let root_hash = head.tree_ref.unwrap();

    assert!(ops::tree_lookup(&engine, root_hash, &p("file1.txt")).await.unwrap().is_some());
    assert!(ops::tree_lookup(&engine, root_hash, &p("dir/file3.txt")).await.unwrap().is_some());
    assert!(ops::tree_lookup(&engine, root_hash, &p("file2.txt")).await.unwrap().is_none());

    assert_eq!(ops::log(&engine, "main").await.unwrap().len(), 2);
}

#[tokio::test]
async fn concurrent_modification() {
    let engine = fresh_engine();

    ops::add(
        &engine,
        "main",
        StagingItem::write(p("initial.txt"), Blob::new(b"init".to_vec())),
    )
    .await
    .unwrap();
    ops::commit(&engine, "main", "initial").await.unwrap();

    // writer A reads head, stages, and commits first.
    ops::add(
        &engine,
        "main",
        StagingItem::write(p("a.txt"), Blob::new(b"from a".to_vec())),
    )
    .await
    .unwrap();
    ops::commit(&engine, "main", "writer a").await.unwrap();

    // writer B staged against the same original head (simulated by
    // staging its own change now, against the now-advanced head, which
    // demonstrates the CAS rejecting a stale view): to reproduce a true
    // collision we race two commits against a captured expected hash by
    // directly exercising the ref CAS with a stale expectation.
    let stale_head = {
        // reconstruct what B's "expected" would have been: the initial commit.
        let log = ops::log(&engine, "main").await.unwrap();
        log.last().unwrap().hash()
    };

    let conflicting_commit =
        objgraph::object::Commit::new("writer b (conflict)", None, Some(stale_head));
    engine.commits().save(&conflicting_commit).await.unwrap();
    let cas_ok = engine
        .refs()
        .compare_and_swap(
            &objgraph::object::Ref::new("main", conflicting_commit.hash()),
            Some(&stale_head),
        )
        .await
        .unwrap();
    assert!(!cas_ok, "writer b's stale CAS must be rejected");

    // retry from the fresh head succeeds.
    ops::add(
        &engine,
        "main",
        StagingItem::write(p("b.txt"), Blob::new(b"from b".to_vec())),
    )
    .await
    .unwrap();
    ops::commit(&engine, "main", "writer b retried").await.unwrap();

    let final_log = ops::log(&engine, "main").await.unwrap();
    assert_eq!(final_log[0].message, "writer b retried");
}

#[tokio::test]
async fn gc_orphan_reclamation() {
    let engine = fresh_engine();

    ops::add(
        &engine,
        "main",
        StagingItem::write(p("f1"), Blob::new(b"1".to_vec())),
    )
    .await
    .unwrap();
    ops::commit(&engine, "main", "commit 1").await.unwrap();
    let c1 = ops::get_commit_from_ref(&engine, "main").await.unwrap().unwrap();

    ops::add(
        &engine,
        "main",
        StagingItem::write(p("f2"), Blob::new(b"2".to_vec())),
    )
    .await
    .unwrap();
    ops::commit(&engine, "main", "commit 2").await.unwrap();
    let c2 = ops::get_commit_from_ref(&engine, "main").await.unwrap().unwrap();

    ops::add(
        &engine,
        "main",
        StagingItem::write(p("f3"), Blob::new(b"3".to_vec())),
    )
    .await
    .unwrap();
    ops::commit(&engine, "main", "commit 3").await.unwrap();
    let c3 = ops::get_commit_from_ref(&engine, "main").await.unwrap().unwrap();

    ops::reset(&engine, "dev", c2.hash()).await.unwrap();
    ops::reset(&engine, "main", c1.hash()).await.unwrap();

    ops::gc(&engine).await.unwrap();

    assert!(ops::get_commit(&engine, c3.hash()).await.unwrap().is_none());
    assert!(ops::get_commit(&engine, c1.hash()).await.unwrap().is_some());
    assert!(ops::get_commit(&engine, c2.hash()).await.unwrap().is_some());

    engine.refs().delete("dev").await.unwrap();
    ops::gc(&engine).await.unwrap();
    assert!(ops::get_commit(&engine, c2.hash()).await.unwrap().is_none());
}

#[tokio::test]
async fn reset_to_prior_commit() {
    let engine = fresh_engine();

    ops::add(
        &engine,
        "main",
        StagingItem::write(p("file.txt"), Blob::new(b"v1".to_vec())),
    )
    .await
    .unwrap();
    ops::commit(&engine, "main", "Commit 1").await.unwrap();
    let first = ops::get_commit_from_ref(&engine, "main").await.unwrap().unwrap();

    ops::add(
        &engine,
        "main",
        StagingItem::write(p("file.txt"), Blob::new(b"v2".to_vec())),
    )
    .await
    .unwrap();
    ops::commit(&engine, "main", "Commit 2").await.unwrap();

    ops::reset(&engine, "main", first.hash()).await.unwrap();

    let head = ops::get_commit_from_ref(&engine, "main").await.unwrap().unwrap();
    assert_eq!(head.message, "Commit 1");
    let leaf = ops::tree_lookup(&engine, head.tree_ref.unwrap(), &p("file.txt"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(leaf.as_leaf().unwrap().blob_ref, Hash::of(b"v1"));
}

#[tokio::test]
async fn commit_with_empty_staging_area_fails() {
    let engine = fresh_engine();
    let err = ops::commit(&engine, "main", "nothing staged").await;
    assert!(matches!(err, Err(Error::NoChangesToCommit)));
}
