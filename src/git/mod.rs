mod commit;
mod merge;
mod repository;
mod tag;

pub use commit::{crop, wrap, CommitComposer, CommitDraft, CommitPresets, CommitRequest};
pub use merge::BranchMerger;
pub use repository::{compare_tag_names, discover_repository, Git2Repository};
pub use tag::{default_description, BumpKind, ReleaseVersion, TagDraft, TagGenerator, TagOptions};

use crate::error::CliError;

/// How the current branch relates to its upstream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpstreamState {
    /// Upstream has commits and the local branch has none of its own.
    pub needs_pull: bool,
    /// Local branch has commits that are not on the upstream.
    pub needs_push: bool,
}

/// Local repository operations the recipes rely on.
#[cfg_attr(test, mockall::automock)]
pub trait VersionControl {
    /// Paths with staged changes.
    fn staged_files(&self) -> Result<Vec<String>, CliError>;

    /// Stage new, modified and deleted files.
    fn stage_all(&self) -> Result<(), CliError>;

    /// Commit the index with `message`, returning the short commit id.
    fn commit(&self, message: &str) -> Result<String, CliError>;

    /// The tag on the most recently committed tagged commit.
    fn latest_tag(&self) -> Result<Option<String>, CliError>;

    fn create_annotated_tag(&self, name: &str, message: &str) -> Result<(), CliError>;

    fn current_branch(&self) -> Result<String, CliError>;

    fn local_branches(&self) -> Result<Vec<String>, CliError>;

    /// True when `git status -s` would print anything.
    fn is_dirty(&self) -> Result<bool, CliError>;

    fn upstream_state(&self) -> Result<UpstreamState, CliError>;
}
