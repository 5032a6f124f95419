use super::{commit::CommitCommand, merge::MergeCommand, tag::TagCommand};
use crate::cli::Command;
use crate::context::Context;
use crate::error::CliError;
use crate::logger;
use crate::task::{Action, TaskGraph};
use log::info;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
pub struct RunCommand {
    #[structopt(help = "Task to run, e.g. release or git:tag")]
    task: String,

    #[structopt(long, help = "Only print the tasks in run order")]
    plan: bool,
}

impl Command for RunCommand {
    fn execute(&self, ctx: &Context) -> Result<(), CliError> {
        let graph = TaskGraph::from_config(&ctx.config)?;
        let plan = graph.plan(&self.task)?;

        if self.plan {
            for task in &plan {
                println!("{}", task);
            }
            return Ok(());
        }

        for task in plan {
            let Some(action) = task.action else {
                continue;
            };
            logger::progress(&format!("Task {}", task));
            match action {
                Action::Commit => CommitCommand::default().execute(ctx)?,
                Action::Tag => TagCommand::default().execute(ctx)?,
                Action::Merge => MergeCommand::default().execute(ctx)?,
            }
        }

        info!("Task {} done", self.task);
        Ok(())
    }
}
