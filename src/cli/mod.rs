pub mod commands;

use self::commands::{commit, merge, run, tag};
use crate::context::Context;
use crate::error::CliError;
use structopt::StructOpt;

pub trait Command {
    fn execute(&self, ctx: &Context) -> Result<(), CliError>;
}

#[derive(StructOpt)]
pub enum CliCommand {
    #[structopt(about = "Compose a commit message and commit the staged changes")]
    Commit(commit::CommitCommand),
    #[structopt(about = "Create the next release tag and publish it")]
    Tag(tag::TagCommand),
    #[structopt(about = "Fast-forward another branch to the current one and push it")]
    Merge(merge::MergeCommand),
    #[structopt(about = "Run a task together with the tasks it depends on")]
    Run(run::RunCommand),
}

impl CliCommand {
    pub fn execute(&self, ctx: &Context) -> Result<(), CliError> {
        match self {
            CliCommand::Commit(cmd) => cmd.execute(ctx),
            CliCommand::Tag(cmd) => cmd.execute(ctx),
            CliCommand::Merge(cmd) => cmd.execute(ctx),
            CliCommand::Run(cmd) => cmd.execute(ctx),
        }
    }
}
