//! Commit replay rules.
//!
//! Starting from the anchor's version, every commit after the anchor is
//! visited exactly once in chronological order and the first matching rule
//! for its message is applied. The fold has no other state: no backtracking,
//! no lookahead.

use anyhow::Result;
use gix::ObjectId;

use crate::anchor::Anchor;
use crate::history::RepoContext;
use crate::version::Version;

/// Marker that bumps the major component.
pub const MAJOR_MARKER: &str = "[major]";
/// Marker that bumps the minor component.
pub const MINOR_MARKER: &str = "[minor]";

/// Replay the commits after `anchor` up to `head` and return the final
/// version.
///
/// When the anchor commit is `head` itself, its declared version is already
/// authoritative for the current state and is returned without walking.
pub fn replay(ctx: &RepoContext, anchor: &Anchor, head: ObjectId) -> Result<Version> {
    if let Anchor::Override { commit, version } = anchor
        && *commit == head
    {
        return Ok(*version);
    }

    let (mut version, stop) = match anchor {
        Anchor::Root => (Version::ZERO, None),
        Anchor::Override { commit, version } => (*version, Some(*commit)),
    };

    for commit in ctx.commits_after(stop, head)? {
        version = bump_for_message(version, &commit.message);
    }

    Ok(version)
}

/// Apply the first matching increment rule for a commit message.
///
/// Plain case-sensitive substring tests, major before minor, default patch.
/// A message carrying both markers triggers only the major rule.
fn bump_for_message(version: Version, message: &str) -> Version {
    if message.contains(MAJOR_MARKER) {
        version.bump_major()
    } else if message.contains(MINOR_MARKER) {
        version.bump_minor()
    } else {
        version.bump_patch()
    }
}
