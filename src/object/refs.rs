//! `Ref` - a named mutable pointer to a commit.

use serde::{Deserialize, Serialize};

use crate::hash::Hash;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ref {
    pub name: String,
    pub commit_ref: Hash,
}

impl Ref {
    pub fn new(name: impl Into<String>, commit_ref: Hash) -> Self {
        Self {
            name: name.into(),
            commit_ref,
        }
    }
}
