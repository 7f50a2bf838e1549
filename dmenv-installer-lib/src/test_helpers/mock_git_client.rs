use crate::error::BumpError;
use crate::git::GitClient;

/// Answers git queries with fixed output.
pub struct MockGitClient {
    branch: String,
    status: String,
    behind: String,
}

impl MockGitClient {
    pub fn new(branch: &str, status: &str, behind: &str) -> Self {
        Self {
            branch: branch.to_string(),
            status: status.to_string(),
            behind: behind.to_string(),
        }
    }
}

impl GitClient for MockGitClient {
    fn current_branch(&self) -> Result<String, BumpError> {
        Ok(self.branch.clone())
    }

    fn status_porcelain(&self) -> Result<String, BumpError> {
        Ok(self.status.clone())
    }

    fn commits_behind_upstream(&self) -> Result<String, BumpError> {
        Ok(self.behind.clone())
    }
}
