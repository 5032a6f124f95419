use crate::cli::Command;
use crate::context::Context;
use crate::error::CliError;
use crate::git::{CommitComposer, CommitPresets, CommitRequest, Git2Repository};
use crate::input::InquirePrompter;
use log::debug;
use structopt::StructOpt;

#[derive(Debug, StructOpt, Default)]
pub struct CommitCommand {
    #[structopt(long = "type", help = "Commit type label from the configured catalog")]
    commit_type: Option<String>,

    #[structopt(short, long, help = "Short, imperative description of the change")]
    message: Option<String>,

    #[structopt(long, help = "Longer description of the change")]
    long_message: Option<String>,

    #[structopt(long, help = "Describe breaking changes")]
    breaking: Option<String>,

    #[structopt(long, help = "Issue references, e.g. \"fix #123\"")]
    issues: Option<String>,

    #[structopt(short, long, help = "Stage all files when nothing is staged")]
    all: bool,

    #[structopt(long, help = "Print the commit instead of creating it")]
    dry_run: bool,
}

impl CommitCommand {
    fn request(&self, ctx: &Context) -> CommitRequest {
        CommitRequest {
            presets: CommitPresets {
                commit_type: self.commit_type.clone(),
                short_description: self.message.clone(),
                long_description: self.long_message.clone(),
                breaking_change: self.breaking.clone(),
                issue_references: self.issues.clone(),
            },
            stage_all: self.all,
            interactive: !ctx.non_interactive,
            dry_run: self.dry_run,
        }
    }
}

impl Command for CommitCommand {
    fn execute(&self, ctx: &Context) -> Result<(), CliError> {
        // Catalog problems surface before any question is asked
        let catalog = ctx.config.catalog()?;

        let git = Git2Repository::discover()?;
        git.validate_git_config()?;

        let composer = CommitComposer::new(&catalog, ctx.config.wrap_width);
        let message = composer.run(&git, &InquirePrompter, &self.request(ctx))?;
        debug!("Commit message:\n{}", message);
        Ok(())
    }
}
