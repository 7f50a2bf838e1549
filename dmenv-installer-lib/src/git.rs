use crate::error::BumpError;
use std::path::{Path, PathBuf};
use std::process::Command;

pub trait GitClient {
    /// Short name of the checked-out branch.
    fn current_branch(&self) -> Result<String, BumpError>;

    /// Output of `git status --porcelain`; empty when the worktree is clean.
    fn status_porcelain(&self) -> Result<String, BumpError>;

    /// Commits on the upstream branch missing from HEAD, one hash per line.
    fn commits_behind_upstream(&self) -> Result<String, BumpError>;
}

/// Runs the `git` executable inside a repository.
pub struct SystemGitClient {
    repo_dir: PathBuf,
}

impl SystemGitClient {
    pub fn new(repo_dir: &Path) -> Self {
        Self {
            repo_dir: repo_dir.to_path_buf(),
        }
    }

    fn run_captured(&self, args: &[&str]) -> Result<String, BumpError> {
        let output = Command::new("git")
            .current_dir(&self.repo_dir)
            .args(args)
            .output()
            .map_err(|e| BumpError::Git(format!("failed to execute git {}: {}", args.join(" "), e)))?;

        if !output.status.success() {
            return Err(BumpError::Git(format!(
                "git {} failed in {:?}. Reason: {}",
                args.join(" "),
                self.repo_dir,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout)
            .trim_end_matches('\n')
            .to_string())
    }
}

impl GitClient for SystemGitClient {
    fn current_branch(&self) -> Result<String, BumpError> {
        self.run_captured(&["rev-parse", "--abbrev-ref", "HEAD"])
    }

    fn status_porcelain(&self) -> Result<String, BumpError> {
        self.run_captured(&["status", "--porcelain"])
    }

    fn commits_behind_upstream(&self) -> Result<String, BumpError> {
        self.run_captured(&["rev-list", "HEAD..@{upstream}"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn git(dir: &Path, args: &[&str]) -> anyhow::Result<()> {
        let status = Command::new("git")
            .current_dir(dir)
            .args(["-c", "user.email=test@example.com", "-c", "user.name=test"])
            .args(args)
            .status()?;
        anyhow::ensure!(status.success(), "git {:?} failed", args);
        Ok(())
    }

    #[test]
    fn test_system_git_client_local_repo() -> anyhow::Result<()> {
        let tmp_dir = TempDir::new()?;
        let repo = tmp_dir.path();

        git(repo, &["init"])?;
        git(repo, &["checkout", "-b", "release-prep"])?;
        fs::write(repo.join("hello.txt"), "world")?;
        git(repo, &["add", "."])?;
        git(repo, &["commit", "-m", "initial commit"])?;

        let client = SystemGitClient::new(repo);
        assert_eq!(client.current_branch()?, "release-prep");
        assert_eq!(client.status_porcelain()?, "");

        fs::write(repo.join("hello.txt"), "changed")?;
        assert!(client.status_porcelain()?.contains("hello.txt"));

        // No upstream configured
        assert!(matches!(
            client.commits_behind_upstream(),
            Err(BumpError::Git(_))
        ));
        Ok(())
    }
}
