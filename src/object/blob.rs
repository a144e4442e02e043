//! `Blob` - an opaque, content-addressed byte sequence.

use crate::hash::Hash;

/// an immutable byte sequence, identified by `SHA-1(content)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Blob {
    content: Vec<u8>,
    hash: Hash,
}

impl Blob {
    pub fn new(content: impl Into<Vec<u8>>) -> Self {
        let content = content.into();
        let hash = Hash::of(&content);
        Self { content, hash }
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn hash(&self) -> Hash {
        self.hash
    }

    pub fn into_content(self) -> Vec<u8> {
        self.content
    }
}
