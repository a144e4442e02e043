//! the tree-mutation builder.
//!
//! an in-memory mutable overlay over an existing immutable tree. accepts
//! a batch of path-scoped writes and deletes, then emits the minimal set
//! of new persisted nodes on `persist`, structurally sharing every
//! subtree no write or delete ever descended into.
//!
//! there is no direct teacher analog for this algorithm - the teacher
//! rebuilds its whole tree from a filesystem walk on every commit rather
//! than diffing a staged batch against a base tree - so the shape here is
//! original, grounded in the teacher's own recursive, bottom-up tree
//! construction (`object::tree`) generalized into an overlay with lazy
//! loading. see `DESIGN.md`.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::hash::Hash;
use crate::object::tree::{InternalNode, LeafNode, TreeNode};
use crate::storage::TreeStorage;

const ROOT_NAME: &str = "root";

enum NodeState {
    Leaf {
        blob_ref: Hash,
    },
    Internal {
        /// set when this overlay is backed by a persisted node whose
        /// children haven't necessarily been touched. cleared only in
        /// the sense that once `children` is populated we stop trusting
        /// `existing` alone and recompute through the children map.
        existing: Option<(Hash, Vec<Hash>)>,
        /// `None` until `ensure_children_loaded` runs. a `None` internal
        /// overlay with `existing` set is an untouched subtree: persist
        /// returns `existing`'s hash without any storage read.
        children: Option<BTreeMap<String, OverlayNode>>,
    },
}

struct OverlayNode {
    name: String,
    state: NodeState,
}

impl OverlayNode {
    fn from_existing(node: TreeNode) -> Self {
        match node {
            TreeNode::Leaf(leaf) => OverlayNode {
                name: leaf.name,
                state: NodeState::Leaf {
                    blob_ref: leaf.blob_ref,
                },
            },
            TreeNode::Internal(internal) => {
                let hash = internal.hash();
                OverlayNode {
                    name: internal.name,
                    state: NodeState::Internal {
                        existing: Some((hash, internal.children_refs)),
                        children: None,
                    },
                }
            }
        }
    }

    fn new_empty_internal(name: impl Into<String>) -> Self {
        OverlayNode {
            name: name.into(),
            state: NodeState::Internal {
                existing: None,
                children: Some(BTreeMap::new()),
            },
        }
    }

    async fn ensure_children_loaded(&mut self, trees: &dyn TreeStorage) -> Result<()> {
        let (existing, children) = match &mut self.state {
            NodeState::Internal { existing, children } => (existing, children),
            NodeState::Leaf { .. } => {
                return Err(Error::InvariantViolation(
                    "cannot add to non-internal node".into(),
                ))
            }
        };

        if children.is_some() {
            return Ok(());
        }

        let mut map = BTreeMap::new();
        if let Some((_, refs)) = existing {
            for child_hash in refs.iter() {
                let node = trees.load(child_hash).await?.ok_or_else(|| {
                    Error::Malformed(format!("tree node {child_hash} referenced but missing"))
                })?;
                let overlay = OverlayNode::from_existing(node);
                map.insert(overlay.name.clone(), overlay);
            }
        }
        *children = Some(map);
        Ok(())
    }

    /// apply a write at `path` (relative to this node, which must be
    /// internal). creates missing internal nodes along the way.
    async fn save(&mut self, path: &[String], blob_ref: Hash, trees: &dyn TreeStorage) -> Result<()> {
        self.ensure_children_loaded(trees).await?;
        let children = match &mut self.state {
            NodeState::Internal { children, .. } => children.as_mut().unwrap(),
            NodeState::Leaf { .. } => unreachable!("ensure_children_loaded would have errored"),
        };

        let (head, rest) = path.split_first().expect("non-empty path");

        if rest.is_empty() {
            if let Some(existing_child) = children.get(head) {
                if matches!(existing_child.state, NodeState::Internal { .. }) {
                    return Err(Error::InvariantViolation(
                        "cannot add blob to non-leaf node".into(),
                    ));
                }
            }
            children.insert(
                head.clone(),
                OverlayNode {
                    name: head.clone(),
                    state: NodeState::Leaf { blob_ref },
                },
            );
            return Ok(());
        }

        let child = match children.get_mut(head) {
            Some(child) => child,
            None => {
                children.insert(head.clone(), OverlayNode::new_empty_internal(head.clone()));
                children.get_mut(head).unwrap()
            }
        };

        if matches!(child.state, NodeState::Leaf { .. }) {
            return Err(Error::InvariantViolation(
                "cannot add to non-internal node".into(),
            ));
        }

        Box::pin(child.save(rest, blob_ref, trees)).await
    }

    /// remove whatever sits at `path`. a no-op if nothing is there.
    /// returns `true` if, after removal, this node itself has become an
    /// empty internal node (the caller should drop it).
    async fn remove(&mut self, path: &[String], trees: &dyn TreeStorage) -> Result<bool> {
        self.ensure_children_loaded(trees).await?;
        let children = match &mut self.state {
            NodeState::Internal { children, .. } => children.as_mut().unwrap(),
            NodeState::Leaf { .. } => unreachable!("ensure_children_loaded would have errored"),
        };

        let (head, rest) = path.split_first().expect("non-empty path");

        if rest.is_empty() {
            children.remove(head);
            return Ok(children.is_empty());
        }

        let Some(child) = children.get_mut(head) else {
            // non-existent path: silently successful no-op.
            return Ok(false);
        };

        if matches!(child.state, NodeState::Leaf { .. }) {
            // descending through a leaf with more path left: nothing
            // there to remove either, still a silent no-op.
            return Ok(false);
        }

        let child_now_empty = Box::pin(child.remove(rest, trees)).await?;
        if child_now_empty {
            children.remove(head);
        }
        Ok(children.is_empty())
    }

    /// recursively persist this subtree bottom-up. returns `None` for an
    /// internal node with no children (the parent drops the reference).
    async fn persist(&self, trees: &dyn TreeStorage) -> Result<Option<Hash>> {
        match &self.state {
            NodeState::Leaf { blob_ref } => {
                let node = TreeNode::Leaf(LeafNode::new(self.name.clone(), *blob_ref));
                let hash = node.hash();
                if trees.load(&hash).await?.is_none() {
                    trees.save(&node).await?;
                }
                Ok(Some(hash))
            }
            NodeState::Internal { existing, children } => match children {
                None => {
                    // untouched subtree: reuse verbatim, no storage read.
                    Ok(existing.as_ref().map(|(hash, _)| *hash))
                }
                Some(map) => {
                    let mut child_hashes = Vec::with_capacity(map.len());
                    for child in map.values() {
                        if let Some(hash) = Box::pin(child.persist(trees)).await? {
                            child_hashes.push(hash);
                        }
                    }
                    if child_hashes.is_empty() {
                        return Ok(None);
                    }
                    let node = TreeNode::Internal(InternalNode::new(self.name.clone(), child_hashes));
                    let hash = node.hash();
                    if trees.load(&hash).await?.is_none() {
                        trees.save(&node).await?;
                    }
                    Ok(Some(hash))
                }
            },
        }
    }
}

/// the tree-mutation builder itself: an overlay rooted at a synthetic
/// internal node named `"root"`.
pub struct TreeBuilder {
    root: OverlayNode,
}

impl TreeBuilder {
    /// start from an existing (already-loaded) root. callers must have
    /// verified it is internal before seeding.
    pub fn from_existing(root: InternalNode) -> Self {
        TreeBuilder {
            root: OverlayNode::from_existing(TreeNode::Internal(root)),
        }
    }

    /// start from an empty repository.
    pub fn create_root() -> Self {
        TreeBuilder {
            root: OverlayNode::new_empty_internal(ROOT_NAME),
        }
    }

    pub async fn save(
        &mut self,
        path: &[String],
        blob_ref: Hash,
        trees: &dyn TreeStorage,
    ) -> Result<()> {
        if path.is_empty() {
            return Err(Error::InvariantViolation("path empty".into()));
        }
        self.root.save(path, blob_ref, trees).await
    }

    pub async fn remove(&mut self, path: &[String], trees: &dyn TreeStorage) -> Result<()> {
        if path.is_empty() {
            return Err(Error::InvariantViolation("path empty".into()));
        }
        self.root.remove(path, trees).await?;
        Ok(())
    }

    /// persist every touched node bottom-up; `None` means the repository
    /// is now empty of files (root persisted as null).
    pub async fn persist(&self, trees: &dyn TreeStorage) -> Result<Option<Hash>> {
        self.root.persist(trees).await
    }
}
