//! Derive a semantic version purely from git commit history.
//!
//! The version is a deterministic function of the repository's history: the
//! most recent valid `version-at-commit` override anchors the result, and
//! every commit after it bumps the version according to its message
//! (`[major]`, `[minor]`, or a patch bump by default).
//!
//! ```bash
//! # Print the derived version for the repository containing the cwd
//! commit-semver
//!
//! # Derive for another checkout
//! commit-semver --repo-path /path/to/repo
//!
//! # JSON output
//! commit-semver --format json
//!
//! # Use in GitHub Actions
//! commit-semver --format github-actions
//! ```

use std::path::PathBuf;

use anyhow::{
    Context,
    Result,
};
use clap::Parser;
use commit_semver::derive::derive_version;
use commit_semver::history::RepoContext;
use commit_semver::version::Version;

/// Derive a semantic version purely from git commit history.
#[derive(Parser, Debug)]
#[command(name = "commit-semver", version)]
struct Args {
    /// Path to the git repository.
    ///
    /// Defaults to the current directory. Discovery searches upward from this
    /// path, so any subdirectory of a working tree works.
    #[arg(long, default_value = ".")]
    repo_path: PathBuf,

    /// Output format for the derived version.
    ///
    /// - `version`: Print just the version number (e.g., "0.1.2")
    /// - `json`: Print JSON with version, major, minor, and patch fields
    /// - `github-actions`: Write to GITHUB_OUTPUT file in GitHub Actions
    ///   format
    #[arg(long, default_value = "version")]
    format: String,

    /// Path to GitHub Actions output file.
    ///
    /// Only used when `--format github-actions` is specified.
    /// Defaults to the `GITHUB_OUTPUT` environment variable or stdout.
    #[arg(long, env = "GITHUB_OUTPUT")]
    github_output: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let ctx = match RepoContext::discover(&args.repo_path) {
        Ok(ctx) => ctx,
        Err(_) => {
            println!(
                "commit-semver: no git repository found at or above {}",
                args.repo_path.display()
            );
            println!("Run commit-semver from inside a git working tree, or pass --repo-path.");
            std::process::exit(1);
        }
    };

    let version = derive_version(&ctx)?;
    print_version(&args, version)
}

fn print_version(args: &Args, version: Version) -> Result<()> {
    match args.format.as_str() {
        "version" => println!("{}", version),
        "json" => println!(
            "{{\"version\":\"{}\",\"major\":{},\"minor\":{},\"patch\":{}}}",
            version, version.major, version.minor, version.patch
        ),
        "github-actions" => {
            let output_file = args.github_output.as_deref().unwrap_or("/dev/stdout");
            let output = format!("version={}\n", version);
            std::fs::write(output_file, output)
                .with_context(|| format!("Failed to write to {}", output_file))?;
        }
        _ => anyhow::bail!("Invalid format: {}", args.format),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::NamedTempFile;

    use super::*;

    fn args_with_format(format: &str, github_output: Option<String>) -> Args {
        Args {
            repo_path: ".".into(),
            format: format.to_string(),
            github_output,
        }
    }

    #[test]
    fn test_print_version_plain() {
        let args = args_with_format("version", None);
        assert!(print_version(&args, Version::new(0, 1, 2)).is_ok());
    }

    #[test]
    fn test_print_version_json() {
        let args = args_with_format("json", None);
        assert!(print_version(&args, Version::new(1, 2, 3)).is_ok());
    }

    #[test]
    fn test_print_version_github_actions() {
        let output_file = NamedTempFile::new().unwrap();
        let args = args_with_format(
            "github-actions",
            Some(output_file.path().to_string_lossy().to_string()),
        );
        print_version(&args, Version::new(2, 0, 1)).unwrap();

        let content = std::fs::read_to_string(output_file.path()).unwrap();
        assert_eq!(content, "version=2.0.1\n");
    }

    #[test]
    fn test_print_version_invalid_format() {
        let args = args_with_format("invalid", None);
        assert!(print_version(&args, Version::ZERO).is_err());
    }
}
