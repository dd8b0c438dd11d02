//! Version derivation entry point.
//!
//! Composes the anchor locator and the commit replayer into the single
//! operation the CLI (and any embedding build script) calls.

use anyhow::Result;

use crate::anchor::locate_anchor;
use crate::history::RepoContext;
use crate::replay::replay;
use crate::version::Version;

/// Derive the version for the repository's current HEAD.
///
/// A repository with no commits derives exactly `0.0.0` without scanning or
/// replaying anything. Otherwise the latest valid override in history anchors
/// a chronological replay of every commit after it.
pub fn derive_version(ctx: &RepoContext) -> Result<Version> {
    let Some(head) = ctx.head_commit()? else {
        return Ok(Version::ZERO);
    };

    let anchor = locate_anchor(ctx)?;
    replay(ctx, &anchor, head)
}
