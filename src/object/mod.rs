//! L1: the object model. typed records, each carrying its own content
//! hash and canonical serialization.

pub mod blob;
pub mod commit;
pub mod refs;
pub mod staging;
pub mod tree;

pub use blob::Blob;
pub use commit::Commit;
pub use refs::Ref;
pub use staging::{classify, StagingChange, StagingChangeType, StagingItem};
pub use tree::{InternalNode, LeafNode, TreeNode};
