//! Two-stage command pipeline: pure `{{placeholder}}` resolution, then
//! execution of the resolved argument vector without a shell.

mod command;
mod template;

pub use command::{escape_double_quotes, which, CommandLine, CommandRunner, ProcessRunner};
#[cfg(test)]
pub use command::MockCommandRunner;
pub use template::{resolve, TemplateValues};

/// Built-in command templates, overridable through `[commands]` in the config.
pub const BUILTIN_COMMANDS: &[(&str, &[&str])] = &[
    ("push_tags", &["git", "push", "{{remote}}", "--tags"]),
    (
        "release",
        &["{{release_tool}}", "release", "create", "{{tag}}", "--generate-notes"],
    ),
    ("remote_update", &["git", "remote", "update"]),
    ("stash", &["git", "stash", "--all"]),
    ("stash_pop", &["git", "stash", "pop"]),
    ("pull", &["git", "pull"]),
    ("push", &["git", "push"]),
    ("checkout", &["git", "checkout", "{{branch}}"]),
    ("merge", &["git", "merge", "--ff-only", "{{source}}"]),
];

pub fn builtin_template(name: &str) -> Option<&'static [&'static str]> {
    BUILTIN_COMMANDS
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, template)| *template)
}
