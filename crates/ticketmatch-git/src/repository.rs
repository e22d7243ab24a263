//! Git repository wrapper.

use std::fmt::Write;
use std::path::Path;

use git2::{Oid, Repository as Git2Repo, Sort};
use tracing::debug;

use crate::{GitError, GitResult};

/// A Git repository wrapper.
pub struct Repository {
    inner: Git2Repo,
}

impl Repository {
    /// Opens a repository at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not a valid Git repository.
    pub fn open(path: impl AsRef<Path>) -> GitResult<Self> {
        let path = path.as_ref();
        let inner = Git2Repo::open(path).map_err(|_| GitError::NotARepo(path.to_path_buf()))?;
        Ok(Self { inner })
    }

    /// Discovers the repository from the current directory.
    ///
    /// # Errors
    ///
    /// Returns an error if no repository is found.
    pub fn discover() -> GitResult<Self> {
        let inner = Git2Repo::discover(".").map_err(|_| {
            GitError::NotARepo(std::env::current_dir().unwrap_or_else(|_| ".".into()))
        })?;
        Ok(Self { inner })
    }

    /// Returns the repository root path.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.inner.workdir().unwrap_or_else(|| self.inner.path())
    }

    /// Returns the commits in `from..to` as one `<short-hash> <subject>` line each.
    ///
    /// Merge commits are left out and the newest commit comes first, like
    /// `git log --no-merges --oneline from..to`.
    ///
    /// # Errors
    ///
    /// Returns an error if either revision cannot be resolved or the history
    /// cannot be walked.
    pub fn oneline_log(&self, from: &str, to: &str) -> GitResult<String> {
        let from_oid = self.resolve(from)?;
        let to_oid = self.resolve(to)?;

        let mut revwalk = self.inner.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push(to_oid)?;
        revwalk.hide(from_oid)?;

        let mut log = String::new();
        let mut merges = 0usize;
        for oid in revwalk {
            let commit = self.inner.find_commit(oid?)?;
            if commit.parent_count() > 1 {
                merges += 1;
                continue;
            }

            let short_id = commit.as_object().short_id()?;
            let hash = short_id.as_str().unwrap_or_default();
            let subject = String::from_utf8_lossy(commit.summary_bytes().unwrap_or_default());
            _ = writeln!(log, "{hash} {subject}");
        }

        debug!(%from, %to, lines = log.lines().count(), merges, "read git log");
        Ok(log)
    }

    /// Resolves a revision (branch, tag, hash, expression) to a commit id.
    fn resolve(&self, rev: &str) -> GitResult<Oid> {
        self.inner
            .revparse_single(rev)
            .and_then(|object| object.peel_to_commit())
            .map(|commit| commit.id())
            .map_err(|_| GitError::RevisionNotFound(rev.to_string()))
    }
}
