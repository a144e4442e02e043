//! `Commit` - a hashed snapshot pointing at a root tree and a parent.

use serde::{Deserialize, Serialize};

use crate::hash::{hex_or_empty, Hash};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub message: String,
    /// absent when the repository is empty of files.
    pub tree_ref: Option<Hash>,
    /// absent for the initial commit on a ref.
    pub previous_commit_ref: Option<Hash>,
}

impl Commit {
    pub fn new(
        message: impl Into<String>,
        tree_ref: Option<Hash>,
        previous_commit_ref: Option<Hash>,
    ) -> Self {
        Self {
            message: message.into(),
            tree_ref,
            previous_commit_ref,
        }
    }

    /// `SHA-1(message + ":" + tree_ref_or_empty + ":" + previous_commit_ref_or_empty)`.
    pub fn hash(&self) -> Hash {
        Hash::of_str(&format!(
            "{}:{}:{}",
            self.message,
            hex_or_empty(self.tree_ref.as_ref()),
            hex_or_empty(self.previous_commit_ref.as_ref()),
        ))
    }

    pub fn is_root(&self) -> bool {
        self.previous_commit_ref.is_none()
    }
}
