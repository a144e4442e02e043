//! `StagingItem` and its derived classification against the current tree.
//!
//! staging items never enter the object graph; they are a pending,
//! path-scoped edit buffer consumed (and pruned) by `commit`.

use crate::hash::Hash;
use crate::object::blob::Blob;
use crate::object::tree::TreeNode;

/// a pending edit at a path. `blob` present means "write this content
/// here"; absent means "delete whatever is at this path".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StagingItem {
    pub path: Vec<String>,
    pub blob: Option<Blob>,
}

impl StagingItem {
    pub fn write(path: Vec<String>, blob: Blob) -> Self {
        Self {
            path,
            blob: Some(blob),
        }
    }

    pub fn delete(path: Vec<String>) -> Self {
        Self { path, blob: None }
    }

    /// the path joined by `/`, used as the staging store's key.
    pub fn path_key(&self) -> String {
        self.path.join("/")
    }
}

/// derived classification of a `StagingItem` against the node currently
/// present at its path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StagingChangeType {
    Add,
    Update,
    Remove,
    Unchanged,
}

/// a staging item paired with its classification, as returned by
/// `get_staging_changes`. `Unchanged` entries never appear here - they are
/// pruned before this type is constructed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StagingChange {
    pub item: StagingItem,
    pub change_type: StagingChangeType,
}

/// classify `item` against whatever node (if any) currently sits at its
/// path in the tree.
pub fn classify(existing: Option<&TreeNode>, item: &StagingItem) -> StagingChangeType {
    match (&item.blob, existing) {
        (Some(_), None) => StagingChangeType::Add,
        (Some(blob), Some(TreeNode::Leaf(leaf))) => {
            if leaf.blob_ref == blob.hash() {
                StagingChangeType::Unchanged
            } else {
                StagingChangeType::Update
            }
        }
        (Some(_), Some(TreeNode::Internal(_))) => StagingChangeType::Update,
        (None, None) => StagingChangeType::Unchanged,
        (None, Some(_)) => StagingChangeType::Remove,
    }
}

/// convenience used by tests and by staging self-pruning: the blob's hash
/// as it would appear as a leaf's `blob_ref` if this item were applied.
pub fn item_blob_hash(item: &StagingItem) -> Option<Hash> {
    item.blob.as_ref().map(Blob::hash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::tree::LeafNode;

    #[test]
    fn add_when_nothing_exists_and_blob_present() {
        let item = StagingItem::write(vec!["a".into()], Blob::new(b"x".to_vec()));
        assert_eq!(classify(None, &item), StagingChangeType::Add);
    }

    #[test]
    fn update_when_existing_leaf_differs() {
        let item = StagingItem::write(vec!["a".into()], Blob::new(b"new".to_vec()));
        let existing = TreeNode::Leaf(LeafNode::new("a", Hash::of(b"old")));
        assert_eq!(classify(Some(&existing), &item), StagingChangeType::Update);
    }

    #[test]
    fn unchanged_when_existing_leaf_matches() {
        let blob = Blob::new(b"same".to_vec());
        let item = StagingItem::write(vec!["a".into()], blob.clone());
        let existing = TreeNode::Leaf(LeafNode::new("a", blob.hash()));
        assert_eq!(
            classify(Some(&existing), &item),
            StagingChangeType::Unchanged
        );
    }

    #[test]
    fn remove_when_existing_and_no_blob() {
        let item = StagingItem::delete(vec!["a".into()]);
        let existing = TreeNode::Leaf(LeafNode::new("a", Hash::of(b"x")));
        assert_eq!(classify(Some(&existing), &item), StagingChangeType::Remove);
    }

    #[test]
    fn unchanged_when_absent_and_no_blob() {
        let item = StagingItem::delete(vec!["a".into()]);
        assert_eq!(classify(None, &item), StagingChangeType::Unchanged);
    }

    #[test]
    fn path_key_joins_with_slash() {
        let item = StagingItem::delete(vec!["dir".into(), "file.txt".into()]);
        assert_eq!(item.path_key(), "dir/file.txt");
    }
}
