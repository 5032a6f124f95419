use crate::cli::Command;
use crate::context::Context;
use crate::error::CliError;
use crate::git::{BranchMerger, Git2Repository};
use crate::input::InquirePrompter;
use crate::shell::ProcessRunner;
use structopt::StructOpt;

#[derive(Debug, StructOpt, Default)]
pub struct MergeCommand {
    #[structopt(short, long, help = "Branch to merge the current branch into")]
    target: Option<String>,
}

impl Command for MergeCommand {
    fn execute(&self, ctx: &Context) -> Result<(), CliError> {
        let git = Git2Repository::discover()?;
        let runner = match git.workdir() {
            Some(dir) => ProcessRunner::in_dir(dir),
            None => ProcessRunner::new(),
        };

        BranchMerger::new(ctx, &git, &runner, &InquirePrompter).run(self.target.as_deref())?;
        Ok(())
    }
}
