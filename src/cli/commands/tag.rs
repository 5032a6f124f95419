use crate::cli::Command;
use crate::context::Context;
use crate::error::CliError;
use crate::git::{BumpKind, Git2Repository, TagGenerator, TagOptions};
use crate::input::InquirePrompter;
use crate::shell::{which, ProcessRunner};
use log::debug;
use structopt::StructOpt;

#[derive(Debug, StructOpt, Default)]
pub struct TagCommand {
    #[structopt(short, long, help = "Use this tag name instead of bumping the latest tag")]
    name: Option<String>,

    #[structopt(
        short,
        long,
        possible_values = &["patch", "minor", "major"],
        case_insensitive = true,
        help = "Release type to bump the latest tag by"
    )]
    bump: Option<BumpKind>,

    #[structopt(short, long, help = "Tag description")]
    description: Option<String>,

    #[structopt(long, help = "Do not push the tag or create a release")]
    not_publish: bool,

    #[structopt(long, help = "Show the next tag without creating it")]
    dry_run: bool,
}

impl TagCommand {
    fn options(&self, ctx: &Context) -> TagOptions {
        let release_tool = if self.not_publish {
            None
        } else {
            which(&ctx.config.release_tool).map(|path| path.to_string_lossy().into_owned())
        };
        debug!("Release tool: {:?}", release_tool);

        TagOptions {
            name: self.name.clone(),
            bump: self.bump,
            description: self.description.clone(),
            publish: !self.not_publish,
            dry_run: self.dry_run,
            release_tool,
        }
    }
}

impl Command for TagCommand {
    fn execute(&self, ctx: &Context) -> Result<(), CliError> {
        let git = Git2Repository::discover()?;
        let runner = match git.workdir() {
            Some(dir) => ProcessRunner::in_dir(dir),
            None => ProcessRunner::new(),
        };

        let draft =
            TagGenerator::new(ctx, &git, &runner, &InquirePrompter, self.options(ctx)).run()?;
        println!("{}", draft.name);
        Ok(())
    }
}
