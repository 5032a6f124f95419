use crate::error::CliError;
use regex::Regex;
use std::collections::BTreeMap;

/// Values available to `{{key}}` placeholders.
pub type TemplateValues = BTreeMap<String, String>;

const PLACEHOLDER_REGEX: &str = r"\{\{\s*([A-Za-z0-9_./-]+)\s*\}\}";

/// Replaces every `{{key}}` in `template` with its value.
///
/// Resolution is a pure string operation: nothing is executed and the result
/// is never re-scanned, so a value containing braces stays literal. Unknown
/// keys are an error rather than an empty substitution.
pub fn resolve(template: &str, values: &TemplateValues) -> Result<String, CliError> {
    let pattern = Regex::new(PLACEHOLDER_REGEX)?;
    let mut resolved = String::with_capacity(template.len());
    let mut last = 0;

    for captures in pattern.captures_iter(template) {
        let (Some(whole), Some(key)) = (captures.get(0), captures.get(1)) else {
            continue;
        };
        let value = values.get(key.as_str()).ok_or_else(|| {
            CliError::Template(format!(
                "no value for placeholder `{{{{{}}}}}` in `{}`",
                key.as_str(),
                template
            ))
        })?;
        resolved.push_str(&template[last..whole.start()]);
        resolved.push_str(value);
        last = whole.end();
    }
    resolved.push_str(&template[last..]);

    Ok(resolved)
}
