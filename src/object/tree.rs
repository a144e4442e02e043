//! `TreeNode` - the two-shape tagged union that makes up the directory graph.
//!
//! a leaf represents a file at one path component; an internal node
//! represents a directory and lists its children by hash only (not by
//! name - the name of a child lives inside the child node itself, so
//! resolving an entry by name requires loading it; see `builder`).

use serde::{Deserialize, Serialize};

use crate::hash::{hex_or_empty, Hash};

/// a file at a single path component.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeafNode {
    pub name: String,
    pub blob_ref: Hash,
}

impl LeafNode {
    pub fn new(name: impl Into<String>, blob_ref: Hash) -> Self {
        Self {
            name: name.into(),
            blob_ref,
        }
    }

    /// `SHA-1("leaf:" + name + ":" + blob_ref)`.
    pub fn hash(&self) -> Hash {
        Hash::of_str(&format!("leaf:{}:{}", self.name, self.blob_ref))
    }
}

/// a directory: a name plus the hashes of its children, sorted by hash
/// string. the sort is the observable protocol: it is by hash, never by
/// name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternalNode {
    pub name: String,
    pub children_refs: Vec<Hash>,
}

impl InternalNode {
    /// builds an internal node, sorting `children_refs` by hash string.
    /// an internal node with no children has no valid persisted form -
    /// callers that reach an empty children list must drop the node
    /// instead of constructing one.
    pub fn new(name: impl Into<String>, mut children_refs: Vec<Hash>) -> Self {
        children_refs.sort_by(|a, b| a.to_hex().cmp(&b.to_hex()));
        Self {
            name: name.into(),
            children_refs,
        }
    }

    /// `SHA-1("internal:" + name + ":" + children_refs.joined(","))`.
    pub fn hash(&self) -> Hash {
        let joined = self
            .children_refs
            .iter()
            .map(Hash::to_hex)
            .collect::<Vec<_>>()
            .join(",");
        Hash::of_str(&format!("internal:{}:{}", self.name, joined))
    }
}

/// a tagged union over the two tree-node shapes.
///
/// the `type` tag is part of the wire contract: deserializing an
/// unrecognized tag is a hard error, never a silent default, which is
/// exactly what serde's internally-tagged representation gives us for
/// free.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TreeNode {
    Leaf(LeafNode),
    Internal(InternalNode),
}

impl TreeNode {
    pub fn name(&self) -> &str {
        match self {
            TreeNode::Leaf(l) => &l.name,
            TreeNode::Internal(i) => &i.name,
        }
    }

    pub fn hash(&self) -> Hash {
        match self {
            TreeNode::Leaf(l) => l.hash(),
            TreeNode::Internal(i) => i.hash(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, TreeNode::Leaf(_))
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, TreeNode::Internal(_))
    }

    pub fn as_internal(&self) -> Option<&InternalNode> {
        match self {
            TreeNode::Internal(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_leaf(&self) -> Option<&LeafNode> {
        match self {
            TreeNode::Leaf(l) => Some(l),
            _ => None,
        }
    }
}

/// render an optional tree hash per the commit-hashing wire contract:
/// present as hex, absent as the empty string.
pub fn tree_ref_component(hash: Option<&Hash>) -> String {
    hex_or_empty(hash)
}
