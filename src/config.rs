use crate::error::CliError;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Column after which every paragraph below the subject line is wrapped.
pub const WRAP_WIDTH: usize = 100;

/// The subject line crop keeps two characters more than the wrap width.
pub const CROP_OFFSET: usize = 2;

pub const BREAKING_TYPE: &str = "Breaking:";

pub const CONFIG_FILE_NAME: &str = "gitrecipe.toml";

pub const DEFAULT_REMOTE: &str = "origin";

pub const DEFAULT_RELEASE_TOOL: &str = "gh";

const DEFAULT_COMMIT_TYPES: &[(&str, &str)] = &[
    ("Fix", "A bug fix"),
    ("Update", "A backwards-compatible enhancement"),
    ("Breaking", "A backwards-incompatible enhancement"),
    ("Docs", "Documentation change"),
    ("Build", "Build process update"),
    ("New", "A new feature implementation"),
    ("Upgrade", "Dependency upgrade"),
    ("Chore", "Other changes (e.g.: refactoring)"),
];

const DEFAULT_TASK_GROUPS: &[(&str, &[&str])] = &[("release", &["git:commit", "git:tag"])];

/// Runtime configuration, handed explicitly to every command.
///
/// Every field has a default so a missing or partial `gitrecipe.toml` still
/// yields a usable configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Ordered table of commit type label to description.
    pub commit_types: toml::Table,

    pub wrap_width: usize,

    pub remote: String,

    /// Program used to create hosted releases when it is found on `PATH`.
    pub release_tool: String,

    /// Overrides for the built-in command templates, keyed by command name.
    pub commands: BTreeMap<String, Vec<String>>,

    /// Group tasks: task name to the list of tasks that run before it.
    pub tasks: toml::Table,
}

impl Default for Config {
    fn default() -> Self {
        let mut commit_types = toml::Table::new();
        for (label, description) in DEFAULT_COMMIT_TYPES {
            commit_types.insert(
                label.to_string(),
                toml::Value::String(description.to_string()),
            );
        }

        let mut tasks = toml::Table::new();
        for (name, predecessors) in DEFAULT_TASK_GROUPS {
            tasks.insert(
                name.to_string(),
                toml::Value::Array(
                    predecessors
                        .iter()
                        .map(|p| toml::Value::String(p.to_string()))
                        .collect(),
                ),
            );
        }

        Config {
            commit_types,
            wrap_width: WRAP_WIDTH,
            remote: DEFAULT_REMOTE.to_string(),
            release_tool: DEFAULT_RELEASE_TOOL.to_string(),
            commands: BTreeMap::new(),
            tasks,
        }
    }
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self, CliError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CliError> {
        if self.wrap_width == 0 {
            return Err(CliError::ConfigError(
                "`wrap_width` must be greater than zero".to_string(),
            ));
        }
        if self.remote.trim().is_empty() {
            return Err(CliError::ConfigError("`remote` must not be empty".to_string()));
        }
        self.catalog()?;
        self.task_groups()?;
        Ok(())
    }

    pub fn catalog(&self) -> Result<CommitTypeCatalog, CliError> {
        CommitTypeCatalog::from_table(&self.commit_types)
    }

    /// Declared group tasks in declaration order.
    pub fn task_groups(&self) -> Result<Vec<(String, Vec<String>)>, CliError> {
        self.tasks
            .iter()
            .map(|(name, value)| {
                let predecessors = value
                    .as_array()
                    .and_then(|items| {
                        items
                            .iter()
                            .map(|item| item.as_str().map(String::from))
                            .collect::<Option<Vec<_>>>()
                    })
                    .ok_or_else(|| {
                        CliError::ConfigError(format!(
                            "task `{}` should be a list of task names",
                            name
                        ))
                    })?;
                Ok((name.clone(), predecessors))
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitType {
    pub label: String,
    pub description: String,
}

impl CommitType {
    /// The token written in front of the short description, e.g. `Fix:`.
    pub fn prefix(&self) -> String {
        format!("{}:", self.label)
    }
}

/// Ordered, non-empty set of commit types offered to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitTypeCatalog {
    entries: Vec<CommitType>,
}

impl CommitTypeCatalog {
    pub fn from_table(table: &toml::Table) -> Result<Self, CliError> {
        if table.is_empty() {
            return Err(CliError::ConfigError(
                "`commit_types` should be a table and not empty".to_string(),
            ));
        }

        let entries = table
            .iter()
            .map(|(label, value)| {
                let label = label.trim();
                if label.is_empty() {
                    return Err(CliError::ConfigError(
                        "`commit_types` contains an empty label".to_string(),
                    ));
                }
                let description = value.as_str().ok_or_else(|| {
                    CliError::ConfigError(format!(
                        "`commit_types.{}` should be a description string",
                        label
                    ))
                })?;
                Ok(CommitType {
                    label: label.to_string(),
                    description: description.to_string(),
                })
            })
            .collect::<Result<Vec<_>, CliError>>()?;

        Ok(CommitTypeCatalog { entries })
    }

    pub fn get(&self, index: usize) -> Option<&CommitType> {
        self.entries.get(index)
    }

    pub fn find(&self, label: &str) -> Option<&CommitType> {
        let label = label.trim().trim_end_matches(':');
        self.entries.iter().find(|t| t.label == label)
    }

    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|t| t.label.as_str()).collect()
    }

    /// Labels padded to a common width and followed by their description.
    pub fn menu_options(&self) -> Vec<String> {
        let width = self
            .entries
            .iter()
            .map(|t| t.label.chars().count())
            .max()
            .unwrap_or(0);
        self.entries
            .iter()
            .map(|t| format!("{:<width$}  {}", t.label, t.description, width = width))
            .collect()
    }
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("gitrecipe").join("config.toml"))
}

/// Loads configuration from file or returns defaults.
///
/// Lookup order:
/// 1. `config_path` when given (must exist)
/// 2. `gitrecipe.toml` in the current directory
/// 3. `gitrecipe/config.toml` in the user config directory
/// 4. Built-in defaults
pub fn load_config(config_path: Option<&Path>) -> Result<Config, CliError> {
    let path = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None if Path::new(CONFIG_FILE_NAME).exists() => Some(PathBuf::from(CONFIG_FILE_NAME)),
        None => user_config_path().filter(|p| p.exists()),
    };

    match path {
        Some(path) => {
            log::debug!("Loading configuration from {}", path.display());
            let content = fs::read_to_string(&path).map_err(|e| {
                CliError::ConfigError(format!("cannot read {}: {}", path.display(), e))
            })?;
            Config::from_toml_str(&content)
        }
        None => {
            log::debug!("No configuration file found, using defaults");
            Ok(Config::default())
        }
    }
}
