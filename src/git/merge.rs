use super::VersionControl;
use crate::context::Context;
use crate::error::CliError;
use crate::input::Prompter;
use crate::logger;
use crate::shell::CommandRunner;
use log::debug;

/// Fast-forwards another local branch to the current one and pushes it.
pub struct BranchMerger<'a> {
    ctx: &'a Context,
    git: &'a dyn VersionControl,
    runner: &'a dyn CommandRunner,
    prompter: &'a dyn Prompter,
}

impl<'a> BranchMerger<'a> {
    pub fn new(
        ctx: &'a Context,
        git: &'a dyn VersionControl,
        runner: &'a dyn CommandRunner,
        prompter: &'a dyn Prompter,
    ) -> Self {
        BranchMerger {
            ctx,
            git,
            runner,
            prompter,
        }
    }

    fn step(&self, name: &str, extra: &[(&str, &str)]) -> Result<String, CliError> {
        let command = self.ctx.command(name, extra)?;
        logger::progress(&command.render());
        self.runner.run(&command)
    }

    fn choose_target(&self, current: &str, target: Option<&str>) -> Result<String, CliError> {
        let candidates: Vec<String> = self
            .git
            .local_branches()?
            .into_iter()
            .filter(|b| b != current)
            .collect();

        if let Some(target) = target {
            if target == current {
                return Err(CliError::InputError(format!(
                    "Cannot merge {} into itself",
                    current
                )));
            }
            if !candidates.iter().any(|b| b == target) {
                return Err(CliError::InputError(format!(
                    "Unknown local branch '{}'",
                    target
                )));
            }
            return Ok(target.to_string());
        }

        if candidates.is_empty() {
            return Err(CliError::InputError(format!(
                "There is no other local branch to merge {} into",
                current
            )));
        }
        if self.ctx.non_interactive {
            return Err(CliError::InputError(
                "In non-interactive mode, --target is required".to_string(),
            ));
        }

        let index = self
            .prompter
            .select(&format!("Merge {} to:", current), &candidates, 0)?;
        candidates
            .get(index)
            .cloned()
            .ok_or_else(|| CliError::InputError(format!("No branch at position {}", index)))
    }

    /// Returns the branch that was merged into.
    pub fn run(&self, target: Option<&str>) -> Result<String, CliError> {
        let current = self.git.current_branch()?;
        let target = self.choose_target(&current, target)?;

        logger::writebox(&format!("Merge {} » {}", current, target));
        self.step("remote_update", &[])?;

        let state = self.git.upstream_state()?;
        debug!("Upstream state of {}: {:?}", current, state);

        let stashed = self.git.is_dirty()?;
        if stashed {
            self.step("stash", &[])?;
        }

        if state.needs_pull {
            self.step("pull", &[])?;
        }
        if state.needs_push {
            self.step("push", &[])?;
        }

        self.step("checkout", &[("branch", target.as_str())])?;
        self.step("pull", &[])?;
        self.step("merge", &[("source", current.as_str())])?;
        self.step("push", &[])?;
        self.step("checkout", &[("branch", current.as_str())])?;
        if stashed {
            self.step("stash_pop", &[])?;
        }

        logger::success(&format!("Merged {} into {}", current, target));
        Ok(target)
    }
}
