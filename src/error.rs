use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Git error: {0}")]
    GitError(#[from] git2::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Input error: {0}")]
    InputError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Aborted: {0}")]
    UserAbort(String),

    #[error("Command `{command}` failed with status {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: i32,
        stderr: String,
    },

    #[error("Template error: {0}")]
    Template(String),

    #[error("Tag '{0}' is not of the form [v]MAJOR.MINOR.PATCH, pass --name to tag explicitly")]
    TagFormat(String),

    #[error("Version error: {0}")]
    SemVerError(String),

    #[error("Regex error: {0}")]
    RegexError(String),

    #[error("Unknown task '{0}'")]
    UnknownTask(String),

    #[error("Task dependency cycle between: {0}")]
    TaskCycle(String),

    #[error("No staged changes found")]
    NoStagedChanges,

    #[error("{0}")]
    Generic(String),
}

impl From<inquire::InquireError> for CliError {
    fn from(error: inquire::InquireError) -> Self {
        CliError::InputError(error.to_string())
    }
}

impl From<toml::de::Error> for CliError {
    fn from(error: toml::de::Error) -> Self {
        CliError::ConfigError(error.to_string())
    }
}

impl From<semver::Error> for CliError {
    fn from(error: semver::Error) -> Self {
        CliError::SemVerError(error.to_string())
    }
}

impl From<regex::Error> for CliError {
    fn from(error: regex::Error) -> Self {
        CliError::RegexError(error.to_string())
    }
}
