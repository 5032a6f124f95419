use super::VersionControl;
use crate::context::Context;
use crate::error::CliError;
use crate::input::{Prompter, TextPrompt};
use crate::logger;
use crate::shell::CommandRunner;
use chrono::{DateTime, Utc};
use log::{debug, info};
use regex::Regex;
use semver::Version;
use std::fmt;
use std::str::FromStr;

const RELEASE_TAG_REGEX: &str = r"^(v?)([0-9]+)\.([0-9]+)\.([0-9]+)$";

/// RFC 850 date, e.g. `Saturday, 17-Oct-26 09:30:00 UTC`.
const RFC850_FORMAT: &str = "%A, %d-%b-%y %H:%M:%S UTC";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BumpKind {
    Patch,
    Minor,
    Major,
}

impl BumpKind {
    pub const ALL: [BumpKind; 3] = [BumpKind::Patch, BumpKind::Minor, BumpKind::Major];

    pub fn label(&self) -> &'static str {
        match self {
            BumpKind::Patch => "Patch",
            BumpKind::Minor => "Minor",
            BumpKind::Major => "Major",
        }
    }
}

impl FromStr for BumpKind {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "patch" => Ok(BumpKind::Patch),
            "minor" => Ok(BumpKind::Minor),
            "major" => Ok(BumpKind::Major),
            other => Err(CliError::InputError(format!(
                "Unknown release type '{}', expected patch, minor or major",
                other
            ))),
        }
    }
}

/// A release tag split into its optional `v` prefix and version numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseVersion {
    pub prefix: String,
    pub version: Version,
}

impl ReleaseVersion {
    /// Parse `[v]MAJOR.MINOR.PATCH`. Anything else, including shorter tags
    /// such as `v1.2`, is rejected.
    pub fn parse(tag: &str) -> Result<Self, CliError> {
        let pattern = Regex::new(RELEASE_TAG_REGEX)?;
        let captures = pattern
            .captures(tag.trim())
            .ok_or_else(|| CliError::TagFormat(tag.to_string()))?;

        let number = |index: usize| -> Result<u64, CliError> {
            captures[index]
                .parse::<u64>()
                .map_err(|e| CliError::SemVerError(format!("{} in tag '{}'", e, tag)))
        };

        Ok(ReleaseVersion {
            prefix: captures[1].to_string(),
            version: Version::new(number(2)?, number(3)?, number(4)?),
        })
    }

    pub fn bump(&self, kind: BumpKind) -> Result<Self, CliError> {
        let overflow = || {
            CliError::SemVerError(format!("{} bump of {} overflows", kind.label(), self))
        };
        let current = &self.version;
        let version = match kind {
            BumpKind::Patch => Version::new(
                current.major,
                current.minor,
                current.patch.checked_add(1).ok_or_else(overflow)?,
            ),
            BumpKind::Minor => Version::new(
                current.major,
                current.minor.checked_add(1).ok_or_else(overflow)?,
                0,
            ),
            BumpKind::Major => {
                Version::new(current.major.checked_add(1).ok_or_else(overflow)?, 0, 0)
            }
        };
        debug!("Bumped {} ({}) to {}", self.version, kind.label(), version);
        Ok(ReleaseVersion {
            prefix: self.prefix.clone(),
            version,
        })
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}.{}.{}",
            self.prefix, self.version.major, self.version.minor, self.version.patch
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagDraft {
    pub name: String,
    pub description: String,
}

pub fn default_description(now: DateTime<Utc>) -> String {
    format!("Deployment on {}", now.format(RFC850_FORMAT))
}

#[derive(Debug, Clone, Default)]
pub struct TagOptions {
    /// Explicit tag name; skips version computation.
    pub name: Option<String>,
    pub bump: Option<BumpKind>,
    pub description: Option<String>,
    /// Push tags and create the hosted release.
    pub publish: bool,
    pub dry_run: bool,
    /// Resolved path of the release tool, when installed.
    pub release_tool: Option<String>,
}

/// Computes the next release tag and publishes it.
pub struct TagGenerator<'a> {
    ctx: &'a Context,
    git: &'a dyn VersionControl,
    runner: &'a dyn CommandRunner,
    prompter: &'a dyn Prompter,
    options: TagOptions,
}

impl<'a> TagGenerator<'a> {
    pub fn new(
        ctx: &'a Context,
        git: &'a dyn VersionControl,
        runner: &'a dyn CommandRunner,
        prompter: &'a dyn Prompter,
        options: TagOptions,
    ) -> Self {
        TagGenerator {
            ctx,
            git,
            runner,
            prompter,
            options,
        }
    }

    fn interactive(&self) -> bool {
        !self.ctx.non_interactive
    }

    /// Next tag name: the explicit one, a bump of the latest tag, or a free
    /// answer when the repository has no tag yet.
    pub fn next_tag_name(&self) -> Result<String, CliError> {
        if let Some(name) = &self.options.name {
            return Ok(name.trim().to_string());
        }

        let Some(latest) = self.git.latest_tag()? else {
            debug!("No tag found, asking for a name");
            if !self.interactive() {
                return Err(CliError::InputError(
                    "No tag exists yet, pass --name in non-interactive mode".to_string(),
                ));
            }
            return self
                .prompter
                .text(&TextPrompt::new("Please enter a tag name").required())?
                .ok_or_else(|| CliError::InputError("A tag name is required".to_string()));
        };

        let current = ReleaseVersion::parse(&latest)?;
        let kind = match self.options.bump {
            Some(kind) => kind,
            None if self.interactive() => {
                let options = BumpKind::ALL
                    .iter()
                    .map(|k| k.label().to_string())
                    .collect::<Vec<_>>();
                let index = self.prompter.select(
                    &format!("Latest tag is {}. Choose type of release", latest),
                    &options,
                    0,
                )?;
                BumpKind::ALL.get(index).copied().ok_or_else(|| {
                    CliError::InputError(format!("No release type at position {}", index))
                })?
            }
            None => {
                return Err(CliError::InputError(
                    "In non-interactive mode, --bump or --name is required".to_string(),
                ))
            }
        };

        Ok(current.bump(kind)?.to_string())
    }

    fn description(&self, now: DateTime<Utc>) -> Result<String, CliError> {
        let default = default_description(now);
        if let Some(description) = &self.options.description {
            return Ok(description.clone());
        }
        if !self.interactive() {
            return Ok(default);
        }
        Ok(self
            .prompter
            .text(&TextPrompt::new("Add a description for the tag").with_default(default.as_str()))?
            .unwrap_or(default))
    }

    pub fn run(&self) -> Result<TagDraft, CliError> {
        info!("🚀 Starting tag generation process");
        let name = self.next_tag_name()?;
        let description = self.description(Utc::now())?;
        let draft = TagDraft { name, description };
        info!("🆕 New tag: {}", draft.name);

        if self.options.dry_run {
            info!("🧪 Dry run: New tag would be {}", draft.name);
            return Ok(draft);
        }

        self.git.create_annotated_tag(&draft.name, &draft.description)?;
        logger::success(&format!("Tag {} created", draft.name));

        if !self.options.publish {
            debug!("Publishing disabled, tag stays local");
            return Ok(draft);
        }

        let push = self.ctx.command("push_tags", &[])?;
        logger::progress(&format!("Pushing tags: {}", push));
        self.runner.run(&push)?;

        if let Some(tool) = &self.options.release_tool {
            let release = self.ctx.command(
                "release",
                &[("tag", draft.name.as_str()), ("release_tool", tool.as_str())],
            )?;
            logger::progress(&format!("Creating release: {}", release));
            self.runner.run(&release)?;
        } else {
            logger::warning("Release tool not found, skipping hosted release");
        }

        Ok(draft)
    }
}
