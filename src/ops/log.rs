//! `log`: walk the commit chain from a ref, newest first.

use crate::engine::Engine;
use crate::error::{Error, Result};
use crate::object::Commit;
use crate::storage::{BlobStorage, CommitStorage, RefStorage, StagingStorage, TreeStorage};

/// the chain terminates exactly when `previous_commit_ref` is absent;
/// the chain is already newest-first by construction, so unlike the
/// teacher's own `log` (which re-sorts by a timestamp this object model
/// doesn't carry) no extra sort step is needed.
pub async fn log<B, T, C, R, S>(engine: &Engine<B, T, C, R, S>, ref_name: &str) -> Result<Vec<Commit>>
where
    B: BlobStorage,
    T: TreeStorage,
    C: CommitStorage,
    R: RefStorage,
    S: StagingStorage,
{
    let Some(r) = engine.refs().load(ref_name).await? else {
        return Ok(Vec::new());
    };

    let mut chain = Vec::new();
    let mut next = Some(r.commit_ref);
    while let Some(hash) = next {
        let commit = engine
            .commits()
            .load(&hash)
            .await?
            .ok_or_else(|| Error::Malformed(format!("commit {hash} missing from chain")))?;
        next = commit.previous_commit_ref;
        chain.push(commit);
    }

    Ok(chain)
}
