use super::template::{resolve, TemplateValues};
use crate::error::CliError;
use log::debug;
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// A program and its fully resolved arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandLine {
    pub fn new<S: Into<String>>(program: S, args: Vec<String>) -> Self {
        CommandLine {
            program: program.into(),
            args,
        }
    }

    /// Resolves each template argument on its own, so a value with spaces
    /// stays a single argument.
    pub fn from_template<S: AsRef<str>>(
        template: &[S],
        values: &TemplateValues,
    ) -> Result<Self, CliError> {
        let mut resolved = template
            .iter()
            .map(|part| resolve(part.as_ref(), values))
            .collect::<Result<Vec<_>, _>>()?;
        if resolved.is_empty() || resolved[0].trim().is_empty() {
            return Err(CliError::Template(
                "command template has no program".to_string(),
            ));
        }
        let program = resolved.remove(0);
        Ok(CommandLine::new(program, resolved))
    }

    /// Shell-style rendering for logs and dry runs.
    pub fn render(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .map(quote_argument)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

pub fn escape_double_quotes(input: &str) -> String {
    input.replace('\\', "\\\\").replace('"', "\\\"")
}

fn quote_argument(argument: &str) -> String {
    let plain = !argument.is_empty()
        && argument
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=@%+,#".contains(c));
    if plain {
        argument.to_string()
    } else {
        format!("\"{}\"", escape_double_quotes(argument))
    }
}

/// Executes already resolved command lines.
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner {
    /// Runs the command and returns its trimmed standard output.
    fn run(&self, command: &CommandLine) -> Result<String, CliError>;
}

/// Runs commands as child processes, without a shell in between.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
    cwd: Option<PathBuf>,
}

impl ProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_dir(cwd: impl AsRef<Path>) -> Self {
        ProcessRunner {
            cwd: Some(cwd.as_ref().to_path_buf()),
        }
    }

    fn command(&self, command: &CommandLine) -> Command {
        let mut process = Command::new(&command.program);
        process.args(&command.args).stdin(Stdio::inherit());
        if let Some(cwd) = &self.cwd {
            process.current_dir(cwd);
        }
        process
    }
}

impl CommandRunner for ProcessRunner {
    fn run(&self, command: &CommandLine) -> Result<String, CliError> {
        debug!("Running {}", command);
        let output = self.command(command).output().map_err(|e| {
            CliError::CommandFailed {
                command: command.render(),
                status: -1,
                stderr: e.to_string(),
            }
        })?;

        if !output.status.success() {
            return Err(CliError::CommandFailed {
                command: command.render(),
                status: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

/// Locates `program` the way a shell would, returning its full path.
pub fn which(program: &str) -> Option<PathBuf> {
    if program.is_empty() {
        return None;
    }
    let candidate = Path::new(program);
    if candidate.components().count() > 1 {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }
    let paths = env::var_os("PATH")?;
    env::split_paths(&paths)
        .map(|dir| dir.join(program))
        .find(|path| path.is_file())
}
