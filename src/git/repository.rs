use super::{UpstreamState, VersionControl};
use crate::error::CliError;
use git2::{BranchType, Config, IndexAddOption, Repository, StatusOptions, StatusShow};
use semver::Version;
use std::cmp::Ordering;
use std::env;
use std::path::{Path, PathBuf};

pub fn discover_repository() -> Result<Repository, CliError> {
    let current_dir = env::current_dir()?;
    discover_repository_from(&current_dir)
}

pub fn discover_repository_from(start: &Path) -> Result<Repository, CliError> {
    log::debug!("Starting repository discovery from: {start:?}");

    match Repository::discover(start) {
        Ok(repo) => {
            let repo_path = repo
                .path()
                .parent()
                .and_then(|p| p.canonicalize().ok())
                .ok_or_else(|| {
                    CliError::GitError(git2::Error::from_str(
                        "Could not determine repository root directory",
                    ))
                })?;

            match Repository::open(&repo_path) {
                Ok(new_repo) => Ok(new_repo),
                Err(e) => {
                    log::error!("Failed to open repository at {repo_path:?}: {e}");
                    Err(CliError::GitError(e))
                }
            }
        }
        Err(e) => {
            log::error!("Failed to discover repository from {start:?}: {e}");
            Err(CliError::GitError(git2::Error::from_str(
                "Could not find Git repository in current directory or any parent directories",
            )))
        }
    }
}

fn get_config_value(config: &Config, key: &str) -> Option<String> {
    match config.get_string(key) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        _ => None,
    }
}

/// Orders tag names by version when both parse, by name otherwise.
pub fn compare_tag_names(a: &str, b: &str) -> Ordering {
    match (
        Version::parse(a.trim_start_matches('v')),
        Version::parse(b.trim_start_matches('v')),
    ) {
        (Ok(a_version), Ok(b_version)) => a_version.cmp(&b_version),
        _ => a.cmp(b),
    }
}

/// [`VersionControl`] on a local repository through libgit2.
pub struct Git2Repository {
    repo: Repository,
}

impl Git2Repository {
    pub fn discover() -> Result<Self, CliError> {
        Ok(Git2Repository {
            repo: discover_repository()?,
        })
    }

    pub fn workdir(&self) -> Option<PathBuf> {
        self.repo.workdir().map(Path::to_path_buf)
    }

    pub fn validate_git_config(&self) -> Result<(), CliError> {
        let config = self.repo.config()?;

        if get_config_value(&config, "user.name").is_none() {
            return Err(CliError::ConfigError("git user.name is not set".to_string()));
        }
        if get_config_value(&config, "user.email").is_none() {
            return Err(CliError::ConfigError("git user.email is not set".to_string()));
        }

        Ok(())
    }

    fn head_branch_name(&self) -> Result<String, CliError> {
        let head = self.repo.head()?;
        if !head.is_branch() {
            return Err(CliError::Generic(
                "HEAD is detached, check out a branch first".to_string(),
            ));
        }
        head.shorthand()
            .map(String::from)
            .ok_or_else(|| CliError::Generic("Failed to get current branch".to_string()))
    }
}

impl VersionControl for Git2Repository {
    fn staged_files(&self) -> Result<Vec<String>, CliError> {
        let mut opts = StatusOptions::new();
        opts.include_ignored(false)
            .include_untracked(false)
            .include_unmodified(false)
            .exclude_submodules(true)
            .show(StatusShow::Index);

        let statuses = self.repo.statuses(Some(&mut opts))?;
        let mut files = Vec::new();

        for entry in statuses.iter() {
            let status = entry.status();
            if !(status.is_index_new()
                || status.is_index_modified()
                || status.is_index_deleted()
                || status.is_index_renamed()
                || status.is_index_typechange())
            {
                continue;
            }
            let path = entry
                .head_to_index()
                .and_then(|delta| delta.new_file().path().map(|p| p.to_string_lossy().into_owned()))
                .or_else(|| entry.path().map(String::from));
            if let Some(path) = path {
                files.push(path);
            }
        }

        Ok(files)
    }

    fn stage_all(&self) -> Result<(), CliError> {
        let mut index = self.repo.index()?;
        index.add_all(["*"].iter(), IndexAddOption::DEFAULT, None)?;
        // add_all does not record removals
        index.update_all(["*"].iter(), None)?;
        index.write()?;
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<String, CliError> {
        let signature = self.repo.signature()?;
        let mut index = self.repo.index()?;
        let oid = index.write_tree()?;
        let tree = self.repo.find_tree(oid)?;

        let parent_commit = match self.repo.head() {
            Ok(head) => Some(head.peel_to_commit()?),
            Err(_) => None,
        };
        let parents = parent_commit.as_ref().map(|c| vec![c]).unwrap_or_default();

        let commit_id = self.repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &parents,
        )?;

        let short = self.repo.find_object(commit_id, None)?.short_id()?;
        Ok(short.as_str().unwrap_or_default().to_string())
    }

    fn latest_tag(&self) -> Result<Option<String>, CliError> {
        let names = self.repo.tag_names(None)?;
        let mut latest: Option<(i64, String)> = None;

        for name in names.iter().flatten() {
            let commit = match self
                .repo
                .revparse_single(&format!("refs/tags/{}", name))
                .and_then(|obj| obj.peel_to_commit())
            {
                Ok(commit) => commit,
                Err(e) => {
                    log::debug!("Skipping tag {} that does not point at a commit: {}", name, e);
                    continue;
                }
            };
            let time = commit.time().seconds();

            let newer = match &latest {
                None => true,
                Some((latest_time, latest_name)) => {
                    time > *latest_time
                        || (time == *latest_time
                            && compare_tag_names(name, latest_name) == Ordering::Greater)
                }
            };
            if newer {
                latest = Some((time, name.to_string()));
            }
        }

        log::debug!("Latest tag: {:?}", latest.as_ref().map(|(_, name)| name));
        Ok(latest.map(|(_, name)| name))
    }

    fn create_annotated_tag(&self, name: &str, message: &str) -> Result<(), CliError> {
        let head = self.repo.head()?.peel_to_commit()?;
        let signature = self.repo.signature()?;
        self.repo
            .tag(name, head.as_object(), &signature, message, false)?;
        Ok(())
    }

    fn current_branch(&self) -> Result<String, CliError> {
        self.head_branch_name()
    }

    fn local_branches(&self) -> Result<Vec<String>, CliError> {
        let mut branches = Vec::new();
        for branch in self.repo.branches(Some(BranchType::Local))? {
            let (branch, _) = branch?;
            if let Some(name) = branch.name()? {
                branches.push(name.to_string());
            }
        }
        Ok(branches)
    }

    fn is_dirty(&self) -> Result<bool, CliError> {
        let mut opts = StatusOptions::new();
        opts.include_ignored(false)
            .include_untracked(true)
            .exclude_submodules(true)
            .show(StatusShow::IndexAndWorkdir);
        Ok(!self.repo.statuses(Some(&mut opts))?.is_empty())
    }

    fn upstream_state(&self) -> Result<UpstreamState, CliError> {
        let name = self.head_branch_name()?;
        let branch = self.repo.find_branch(&name, BranchType::Local)?;
        let upstream = branch.upstream().map_err(|_| {
            CliError::Generic(format!("Branch {} has no upstream branch", name))
        })?;

        let local = branch
            .get()
            .target()
            .ok_or_else(|| CliError::Generic(format!("Branch {} has no commit", name)))?;
        let remote = upstream
            .get()
            .target()
            .ok_or_else(|| CliError::Generic(format!("Upstream of {} has no commit", name)))?;

        if local == remote {
            return Ok(UpstreamState::default());
        }

        // Diverged branches need neither; the merge step reports them
        let base = self.repo.merge_base(local, remote)?;
        Ok(UpstreamState {
            needs_pull: local == base,
            needs_push: remote == base,
        })
    }
}
