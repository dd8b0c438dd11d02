//! Override anchor location.
//!
//! The repository may carry an explicit version declaration in a tracked file
//! at the repository root. The locator scans the commits that touched that
//! file, most recent first, and the first one holding a syntactically valid
//! declaration anchors the replay. Malformed declarations, deleted files and
//! out-of-range numbers are skipped silently; the scan just moves on to older
//! history. Leniency here is contractual, so none of the skips are reported.

use anyhow::Result;
use gix::ObjectId;
use regex::Regex;

use crate::history::RepoContext;
use crate::version::Version;

/// Tracked file holding the version override declaration, relative to the
/// repository root.
pub const OVERRIDE_FILE: &str = ".version-override";

/// The point replay starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// No valid override anywhere in history: replay the entire history
    /// starting from version 0.0.0.
    Root,
    /// The most recent commit whose tree holds a valid override declaration.
    Override {
        /// Commit the declaration is authoritative for.
        commit: ObjectId,
        /// Declared version.
        version: Version,
    },
}

/// Locate the anchor for the given repository.
///
/// Scans the commits that touched [`OVERRIDE_FILE`], most recent first, and
/// returns the first valid declaration as an [`Anchor::Override`]. Returns
/// [`Anchor::Root`] when no commit carries one, including when the file was
/// never tracked at all.
pub fn locate_anchor(ctx: &RepoContext) -> Result<Anchor> {
    for commit in ctx.commits_touching_path(OVERRIDE_FILE)? {
        let Some(content) = ctx.file_content_at(commit, OVERRIDE_FILE)? else {
            continue;
        };
        if let Some(version) = parse_override(&content) {
            return Ok(Anchor::Override { commit, version });
        }
    }
    Ok(Anchor::Root)
}

/// Parse an override declaration out of file content.
///
/// A valid line, after trimming surrounding whitespace, is exactly
/// `version-at-commit: <major>.<minor>.<patch>` with no leading zeros in any
/// component. The first matching line in file order wins; everything else in
/// the file is ignored.
fn parse_override(content: &str) -> Option<Version> {
    let re = Regex::new(
        r"^version-at-commit:\s*(0|[1-9][0-9]*)\.(0|[1-9][0-9]*)\.(0|[1-9][0-9]*)$",
    )
    .ok()?;

    for line in content.lines() {
        let Some(caps) = re.captures(line.trim()) else {
            continue;
        };
        // A matching line whose numbers overflow is skipped like any other
        // malformed line, and scanning continues.
        let (Ok(major), Ok(minor), Ok(patch)) = (
            caps[1].parse::<u32>(),
            caps[2].parse::<u32>(),
            caps[3].parse::<u32>(),
        ) else {
            continue;
        };
        return Some(Version::new(major, minor, patch));
    }
    None
}
