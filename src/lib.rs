#![doc = include_str!("../README.md")]

/// Override anchor location.
pub mod anchor;
/// Version derivation entry point.
///
/// # Example: Using in `build.rs` to set `CARGO_PKG_VERSION`
///
/// Add `commit-semver` as a build dependency in your `Cargo.toml`:
///
/// ```toml
/// [build-dependencies]
/// commit-semver = "0.0.1"
/// ```
///
/// Then in your `build.rs`:
///
/// ```no_run
/// use commit_semver::derive::derive_version;
/// use commit_semver::history::RepoContext;
///
/// fn main() {
///     if let Ok(ctx) = RepoContext::discover(".")
///         && let Ok(version) = derive_version(&ctx)
///     {
///         println!("cargo:rustc-env=CARGO_PKG_VERSION={}", version);
///         println!("cargo:rerun-if-changed=.git/HEAD");
///         println!("cargo:rerun-if-changed=.git/refs");
///     }
/// }
/// ```
pub mod derive;
/// Repository context and history access.
pub mod history;
/// Commit replay rules.
pub mod replay;
/// Version helpers.
pub mod version;
