mod prompts;
pub mod validation;

#[cfg(test)]
pub use prompts::MockPrompter;
pub use prompts::{InquirePrompter, Prompter, TextPrompt};
