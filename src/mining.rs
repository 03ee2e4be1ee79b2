// ⛏️ Git History Miner - unique (name, email) pairs of authors and committers
//
// Shells out to the `git` executable. Remote URLs are cloned bare into a
// scratch directory that is removed once the log has been read.

use crate::error::MiningError;
use crate::identity::RawIdentity;
use std::collections::BTreeSet;
use std::path::Path;
use std::process::Command;
use tracing::{debug, info};

/// One line per identity: author line then committer line per commit
const LOG_FORMAT: &str = "--format=%an%x00%ae%n%cn%x00%ce";

pub struct GitMiner {
    git: String,
}

impl GitMiner {
    pub fn new() -> Self {
        GitMiner {
            git: "git".to_string(),
        }
    }

    /// Use a specific git executable
    pub fn with_executable(git: impl Into<String>) -> Self {
        GitMiner { git: git.into() }
    }

    /// Mine a local repository path or a remote URL.
    ///
    /// Returns the deduplicated population sorted by (name, email).
    pub fn mine(&self, source: &str) -> Result<Vec<RawIdentity>, MiningError> {
        info!(source, "Fetching developers from repository");
        self.check_available()?;

        let identities = if is_remote(source) {
            let scratch = tempfile::Builder::new()
                .prefix("dev-alias-clone")
                .tempdir()
                .map_err(MiningError::Scratch)?;
            let target = scratch.path().join("repo.git");
            self.clone_bare(source, &target)?;
            self.read_log(&target)?
            // scratch dropped here, clone removed
        } else {
            self.read_log(Path::new(source))?
        };

        if identities.is_empty() {
            return Err(MiningError::EmptyPopulation {
                source_id: source.to_string(),
            });
        }

        info!(count = identities.len(), "Found unique developer entries");
        Ok(identities)
    }

    fn check_available(&self) -> Result<(), MiningError> {
        match Command::new(&self.git).arg("--version").output() {
            Ok(output) if output.status.success() => Ok(()),
            Ok(output) => Err(MiningError::CommandFailed {
                command: format!("{} --version", self.git),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }),
            Err(_) => Err(MiningError::GitNotFound),
        }
    }

    fn clone_bare(&self, url: &str, target: &Path) -> Result<(), MiningError> {
        debug!(url, target = %target.display(), "Cloning repository");
        let target_arg = target.to_string_lossy();
        self.run(&["clone", "--bare", "--quiet", url, &*target_arg], None)
            .map(|_| ())
    }

    fn read_log(&self, repo: &Path) -> Result<Vec<RawIdentity>, MiningError> {
        let stdout = self.run(&["log", LOG_FORMAT], Some(repo))?;
        Ok(parse_log_output(&stdout))
    }

    fn run(&self, args: &[&str], dir: Option<&Path>) -> Result<String, MiningError> {
        let command_line = format!("{} {}", self.git, args.join(" "));

        let mut command = Command::new(&self.git);
        command.args(args);
        if let Some(dir) = dir {
            command.current_dir(dir);
        }

        let output = command.output().map_err(|e| MiningError::CommandFailed {
            command: command_line.clone(),
            message: e.to_string(),
        })?;

        if !output.status.success() {
            return Err(MiningError::CommandFailed {
                command: command_line,
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for GitMiner {
    fn default() -> Self {
        Self::new()
    }
}

/// `scheme://...` or scp-like `user@host:path`
pub fn is_remote(source: &str) -> bool {
    if source.contains("://") {
        return true;
    }
    match (source.find('@'), source.find(':')) {
        (Some(at), Some(colon)) => at < colon && !Path::new(source).exists(),
        _ => false,
    }
}

/// Parse `name NUL email` lines into a sorted, deduplicated population
pub fn parse_log_output(stdout: &str) -> Vec<RawIdentity> {
    stdout
        .lines()
        .filter_map(|line| line.split_once('\0'))
        .map(|(name, email)| RawIdentity::new(name, email))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_output_dedups_and_sorts() {
        let stdout = "Maija\0maija@meikalainen.com\n\
                      Erkki Esimerkki\0erkki.esimerkki@kuukkel.com\n\
                      Erkki Taas\0erkki.esimerkki@kuukel.com\n\
                      Tiina Tossavainen\0tiinat@yritys.fi\n\
                      Maija\0maija@meikalainen.com\n";

        let devs = parse_log_output(stdout);

        assert_eq!(
            devs,
            vec![
                RawIdentity::new("Erkki Esimerkki", "erkki.esimerkki@kuukkel.com"),
                RawIdentity::new("Erkki Taas", "erkki.esimerkki@kuukel.com"),
                RawIdentity::new("Maija", "maija@meikalainen.com"),
                RawIdentity::new("Tiina Tossavainen", "tiinat@yritys.fi"),
            ]
        );
    }

    #[test]
    fn test_parse_log_output_skips_garbage() {
        assert!(parse_log_output("").is_empty());
        assert!(parse_log_output("no separator here\n").is_empty());
        assert_eq!(parse_log_output("\0\n").len(), 1);
    }

    #[test]
    fn test_is_remote() {
        assert!(is_remote("https://github.com/rust-lang/rust"));
        assert!(is_remote("ssh://git@example.com/repo.git"));
        assert!(is_remote("git@github.com:rust-lang/rust.git"));
        assert!(!is_remote("."));
        assert!(!is_remote("/home/me/project"));
    }

    #[test]
    fn test_missing_executable() {
        let miner = GitMiner::with_executable("definitely-not-a-git-binary");
        assert!(matches!(miner.mine("."), Err(MiningError::GitNotFound)));
    }

    #[test]
    fn test_invalid_local_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("doesnt-exist");

        let result = GitMiner::new().mine(&missing.to_string_lossy());
        assert!(matches!(
            result,
            Err(MiningError::CommandFailed { .. }) | Err(MiningError::GitNotFound)
        ));
    }
}
