//! Repository context and git history access.
//!
//! All interaction with the underlying repository goes through
//! [`RepoContext`], which captures the discovered repository once at startup
//! and is threaded through the locator and the replayer. The context exposes
//! exactly the operations the derivation needs: head resolution, the list of
//! commits touching a path, file content at a commit, and the chronological
//! commit range after an anchor.

use std::path::PathBuf;

use anyhow::{
    Context,
    Result,
};
use bstr::ByteSlice;
use gix::ObjectId;

/// A commit identifier paired with its full message text.
#[derive(Debug, Clone)]
pub struct CommitInfo {
    /// Commit object id.
    pub id: ObjectId,
    /// Full commit message, lossily decoded to UTF-8.
    pub message: String,
}

/// Handle to the repository the derivation runs against.
///
/// Treats the repository as a point-in-time snapshot: every walk is
/// reconstructed from scratch and nothing is cached across calls.
pub struct RepoContext {
    repo: gix::Repository,
}

impl RepoContext {
    /// Discover the repository containing `path`, searching upward.
    pub fn discover(path: impl Into<PathBuf>) -> Result<Self, gix::discover::Error> {
        let repo = gix::discover(path.into())?;
        Ok(RepoContext { repo })
    }

    /// Resolve HEAD to a commit id.
    ///
    /// Returns `None` when the repository has no commits yet (unborn HEAD),
    /// which doubles as the "does any commit exist" probe.
    pub fn head_commit(&self) -> Result<Option<ObjectId>> {
        let head = self.repo.head().context("Failed to read HEAD")?;
        Ok(head.id().map(|id| id.detach()))
    }

    /// List the commits that touched `path`, most recent first.
    ///
    /// A commit touches the path when its tree entry for the path differs
    /// from the first parent's (root commits compare against an empty tree),
    /// so both content changes and deletions qualify.
    pub fn commits_touching_path(&self, path: &str) -> Result<Vec<ObjectId>> {
        let Some(head) = self.head_commit()? else {
            return Ok(Vec::new());
        };

        let mut touched = Vec::new();
        for info_result in self.repo.rev_walk([head]).all()? {
            let info = info_result.context("Failed to walk commit history")?;
            let id = info.id().detach();

            let commit = self
                .repo
                .find_object(id)
                .context("Failed to find commit object")?
                .try_into_commit()
                .context("Object is not a commit")?;

            let entry = self.entry_id_at(id, path)?;
            let parent_entry = match commit.parent_ids().next() {
                Some(parent) => self.entry_id_at(parent.detach(), path)?,
                None => None,
            };

            if entry != parent_entry {
                touched.push(id);
            }
        }

        Ok(touched)
    }

    /// Fetch the content of `path` as it existed at `commit`.
    ///
    /// Returns `None` when the path is absent at that commit (or is not a
    /// regular blob there), so deleted override files read as missing rather
    /// than erroring.
    pub fn file_content_at(&self, commit: ObjectId, path: &str) -> Result<Option<String>> {
        let tree = self
            .repo
            .find_object(commit)
            .context("Failed to find commit object")?
            .try_into_commit()
            .context("Object is not a commit")?
            .tree()
            .context("Failed to get commit tree")?;

        let Some(entry) = tree
            .lookup_entry_by_path(path)
            .context("Failed to lookup path in commit tree")?
        else {
            return Ok(None);
        };

        let object = entry
            .object()
            .context("Failed to read object for tree entry")?;
        let Ok(blob) = object.try_into_blob() else {
            return Ok(None);
        };

        Ok(Some(blob.data.to_str_lossy().into_owned()))
    }

    /// List the commits strictly after `anchor` up to and including `head`,
    /// oldest first, with full message text.
    ///
    /// With no anchor the entire history reachable from `head` is returned.
    pub fn commits_after(
        &self,
        anchor: Option<ObjectId>,
        head: ObjectId,
    ) -> Result<Vec<CommitInfo>> {
        let mut commits = Vec::new();

        for info_result in self.repo.rev_walk([head]).all()? {
            let info = info_result.context("Failed to walk commit history")?;
            let id = info.id().detach();

            if anchor == Some(id) {
                break;
            }

            let commit = self
                .repo
                .find_object(id)
                .context("Failed to find commit object")?
                .try_into_commit()
                .context("Object is not a commit")?;
            let message_raw = commit
                .message_raw()
                .context("Failed to read raw commit message")?;
            let message = String::from_utf8_lossy(message_raw.as_ref()).into_owned();

            commits.push(CommitInfo { id, message });
        }

        // The walk yields newest first; replay wants chronological order.
        commits.reverse();
        Ok(commits)
    }

    /// Tree entry object id for `path` at `commit`, if the path exists there.
    fn entry_id_at(&self, commit: ObjectId, path: &str) -> Result<Option<ObjectId>> {
        let tree = self
            .repo
            .find_object(commit)
            .context("Failed to find commit object")?
            .try_into_commit()
            .context("Object is not a commit")?
            .tree()
            .context("Failed to get commit tree")?;

        let entry = tree
            .lookup_entry_by_path(path)
            .context("Failed to lookup path in commit tree")?;
        Ok(entry.map(|e| e.id().detach()))
    }
}
