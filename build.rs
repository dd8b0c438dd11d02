//! Build script that stamps the binary's own version.
//!
//! This sets CARGO_PKG_VERSION to the computed version based on:
//! 1. BUILD_VERSION env var (CI workflows)
//! 2. Cargo.toml version + git SHA
//! 3. Git SHA fallback: 0.0.0-dev-<short-sha>

use std::env;
use std::path::PathBuf;

fn main() {
    let version = compute_version_string(".").unwrap_or_else(|e| {
        eprintln!(
            "cargo:warning=Version computation failed: {}, using fallback",
            e
        );
        "0.0.0-dev-unknown".to_string()
    });

    println!("cargo:rustc-env=CARGO_PKG_VERSION={}", version);
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs");
    println!("cargo:rerun-if-env-changed=BUILD_VERSION");
}

fn compute_version_string(
    repo_path: impl Into<PathBuf>,
) -> Result<String, Box<dyn std::error::Error>> {
    let repo_root: PathBuf = repo_path.into();

    // Explicit override first (CI workflow should set BUILD_VERSION)
    let env_version = env::var("BUILD_VERSION")
        .ok()
        .filter(|v| !v.trim().is_empty());
    if let Some(version) = env_version {
        return Ok(version);
    }

    // Manifest version (cargo provides it to build scripts), optionally with
    // the SHA appended when a repository is available
    if let Ok(manifest_version) = env::var("CARGO_PKG_VERSION") {
        let trimmed = manifest_version.trim();
        if !trimmed.is_empty() && trimmed != "0.0.0" {
            let version_with_sha = short_sha(&repo_root)
                .map(|sha| format!("{trimmed}-{sha}"))
                .unwrap_or_else(|| trimmed.to_string());
            return Ok(version_with_sha);
        }
    }

    // Final fallback: git SHA for local dev
    let repo = gix::discover(&repo_root)
        .map_err(|e| format!("Failed to discover git repository: {}", e))?;

    let head = repo
        .head()
        .map_err(|e| format!("Failed to read HEAD: {}", e))?;
    let commit_id = head
        .id()
        .ok_or_else(|| "HEAD does not point to a commit".to_string())?;
    let short_sha = commit_id
        .shorten()
        .map_err(|e| format!("Failed to shorten commit SHA: {}", e))?;

    Ok(format!("0.0.0-dev-{}", short_sha))
}

fn short_sha(repo_path: &PathBuf) -> Option<String> {
    let repo = gix::discover(repo_path).ok()?;
    let head = repo.head().ok()?;
    let commit_id = head.id()?;
    let short = commit_id.shorten().ok()?;
    Some(short.to_string())
}
