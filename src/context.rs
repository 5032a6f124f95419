use crate::config::Config;
use crate::error::CliError;
use crate::shell::{builtin_template, CommandLine, TemplateValues};

/// Configuration and template values for one invocation.
///
/// Commands receive the context explicitly; nothing reads configuration from
/// global state.
#[derive(Debug, Clone)]
pub struct Context {
    pub config: Config,
    pub values: TemplateValues,
    pub non_interactive: bool,
}

impl Context {
    pub fn new(config: Config, non_interactive: bool) -> Self {
        let mut values = TemplateValues::new();
        values.insert("remote".to_string(), config.remote.clone());
        values.insert("release_tool".to_string(), config.release_tool.clone());
        Context {
            config,
            values,
            non_interactive,
        }
    }

    pub fn with_value(mut self, key: &str, value: impl Into<String>) -> Self {
        self.values.insert(key.to_string(), value.into());
        self
    }

    /// Resolves the named command template, preferring a configured override
    /// over the built-in one. `extra` values shadow the context values.
    pub fn command(&self, name: &str, extra: &[(&str, &str)]) -> Result<CommandLine, CliError> {
        let mut values = self.values.clone();
        for (key, value) in extra {
            values.insert(key.to_string(), value.to_string());
        }

        match self.config.commands.get(name) {
            Some(template) => CommandLine::from_template(template, &values),
            None => {
                let template = builtin_template(name).ok_or_else(|| {
                    CliError::ConfigError(format!("no command template named `{}`", name))
                })?;
                CommandLine::from_template(template, &values)
            }
        }
    }
}
