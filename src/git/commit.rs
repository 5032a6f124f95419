use super::VersionControl;
use crate::config::{CommitTypeCatalog, BREAKING_TYPE, CROP_OFFSET};
use crate::error::CliError;
use crate::input::validation::{normalize_answer, suggest_commit_type};
use crate::input::{Prompter, TextPrompt};
use crate::logger;
use crate::shell::CommandLine;
use log::{debug, info};

/// First `limit` characters of `text`.
pub fn crop(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

/// Wrap `text` at `width` columns, breaking only at spaces.
///
/// Existing line breaks are kept. A word longer than `width` is never split
/// and ends up on a line of its own. Spaces at a break are dropped, so a
/// line created by wrapping never starts or ends with one.
pub fn wrap(text: &str, width: usize) -> String {
    text.split('\n')
        .map(|line| wrap_line(line, width))
        .collect::<Vec<_>>()
        .join("\n")
}

fn wrap_line(line: &str, width: usize) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut current: Option<(String, usize)> = None;

    for word in line.split(' ') {
        let word_len = word.chars().count();
        match current.as_mut() {
            Some((text, len)) if *len + 1 + word_len <= width => {
                text.push(' ');
                text.push_str(word);
                *len += 1 + word_len;
            }
            Some(_) if word.is_empty() => {}
            _ => {
                if let Some((done, _)) = current.replace((word.to_string(), word_len)) {
                    lines.push(done.trim_end_matches(' ').to_string());
                }
            }
        }
    }
    if let Some((done, _)) = current {
        lines.push(done);
    }

    lines.join("\n")
}

/// Answers collected for one commit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitDraft {
    /// Type prefix including its colon, e.g. `Fix:`.
    pub commit_type: String,
    pub short_description: String,
    pub long_description: Option<String>,
    pub breaking_change: Option<String>,
    pub issue_references: Option<String>,
}

impl CommitDraft {
    pub fn is_breaking_type(&self) -> bool {
        self.commit_type == BREAKING_TYPE
    }

    /// Build the final message: the cropped subject line, then each optional
    /// paragraph wrapped at `width` and separated by one blank line.
    pub fn compose(&self, width: usize) -> String {
        let mut message = crop(
            &format!("{} {}", self.commit_type, self.short_description),
            width + CROP_OFFSET,
        );

        let paragraphs = [
            self.long_description.clone(),
            self.breaking_change
                .as_ref()
                .map(|note| format!("BREAKING CHANGE: {}", note)),
            self.issue_references.clone(),
        ];
        for paragraph in paragraphs.iter().flatten() {
            message.push_str("\n\n");
            message.push_str(&wrap(paragraph, width));
        }

        message
    }
}

/// Answers given up front, e.g. from command line flags.
#[derive(Debug, Clone, Default)]
pub struct CommitPresets {
    pub commit_type: Option<String>,
    pub short_description: Option<String>,
    pub long_description: Option<String>,
    pub breaking_change: Option<String>,
    pub issue_references: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CommitRequest {
    pub presets: CommitPresets,
    /// Stage everything without asking when nothing is staged.
    pub stage_all: bool,
    pub interactive: bool,
    /// Print the commit invocation instead of committing.
    pub dry_run: bool,
}

/// Turns a short question session into one commit.
pub struct CommitComposer<'a> {
    catalog: &'a CommitTypeCatalog,
    width: usize,
}

impl<'a> CommitComposer<'a> {
    pub fn new(catalog: &'a CommitTypeCatalog, width: usize) -> Self {
        CommitComposer { catalog, width }
    }

    /// Make sure something is staged, asking to stage everything otherwise.
    pub fn ensure_staged(
        &self,
        git: &dyn VersionControl,
        prompter: &dyn Prompter,
        request: &CommitRequest,
    ) -> Result<(), CliError> {
        if !git.staged_files()?.is_empty() {
            return Ok(());
        }

        let stage = if request.stage_all {
            true
        } else if !request.interactive {
            return Err(CliError::NoStagedChanges);
        } else {
            println!();
            prompter.confirm(
                "There are no files staged. Do you want to add all files?",
                false,
            )?
        };

        if !stage {
            return Err(CliError::UserAbort("no files staged".to_string()));
        }

        if request.dry_run {
            info!("Dry run: would stage all files");
        } else {
            git.stage_all()?;
            debug!("Staged all files");
        }
        Ok(())
    }

    fn resolve_type(
        &self,
        prompter: &dyn Prompter,
        preset: Option<&str>,
        interactive: bool,
    ) -> Result<String, CliError> {
        if let Some(requested) = preset {
            return match self.catalog.find(requested) {
                Some(commit_type) => Ok(commit_type.prefix()),
                None => {
                    let labels = self.catalog.labels();
                    let hint = match suggest_commit_type(requested, &labels) {
                        Some(suggestion) => format!("Did you mean '{}'?", suggestion),
                        None => format!("Valid types are: {}", labels.join(", ")),
                    };
                    Err(CliError::InputError(format!(
                        "Invalid commit type '{}'. {}",
                        requested, hint
                    )))
                }
            };
        }

        if !interactive {
            return Err(CliError::InputError(
                "In non-interactive mode, --type is required".to_string(),
            ));
        }

        let index = prompter.select(
            "Select the type of change that you're committing",
            &self.catalog.menu_options(),
            0,
        )?;
        let commit_type = self
            .catalog
            .get(index)
            .ok_or_else(|| CliError::InputError(format!("No commit type at position {}", index)))?;
        Ok(commit_type.prefix())
    }

    /// Collect every answer, asking only for what the presets leave open.
    pub fn draft(
        &self,
        prompter: &dyn Prompter,
        presets: &CommitPresets,
        interactive: bool,
    ) -> Result<CommitDraft, CliError> {
        let commit_type = self.resolve_type(prompter, presets.commit_type.as_deref(), interactive)?;

        let short_description = match presets.short_description.as_deref().and_then(normalize_answer) {
            Some(short) => short,
            None if interactive => prompter
                .text(
                    &TextPrompt::new("Write a short, imperative tense description of the change:")
                        .required()
                        .with_prefix(commit_type.as_str()),
                )?
                .ok_or_else(|| CliError::InputError("A short description is required".to_string()))?,
            None => {
                return Err(CliError::InputError(
                    "In non-interactive mode, --message is required".to_string(),
                ))
            }
        };

        let long_description = match &presets.long_description {
            Some(long) => normalize_answer(long),
            None if interactive => prompter.text(&TextPrompt::new(
                "Provide a longer description of the change: (press enter to skip)",
            ))?,
            None => None,
        };

        let mut draft = CommitDraft {
            commit_type,
            short_description,
            long_description,
            ..Default::default()
        };

        draft.breaking_change = match &presets.breaking_change {
            Some(note) => normalize_answer(note),
            None if interactive && !draft.is_breaking_type() => prompter.confirm_then_text(
                "Are there any breaking changes?",
                "Describe the breaking changes:",
            )?,
            None => None,
        };

        draft.issue_references = match &presets.issue_references {
            Some(issues) => normalize_answer(issues),
            None if interactive => prompter.confirm_then_text(
                "Does this change affect any open issues?",
                "Add issue references (e.g. \"fix #123\", \"re #123\".):",
            )?,
            None => None,
        };

        Ok(draft)
    }

    /// Run the whole session and commit. Returns the composed message.
    pub fn run(
        &self,
        git: &dyn VersionControl,
        prompter: &dyn Prompter,
        request: &CommitRequest,
    ) -> Result<String, CliError> {
        self.ensure_staged(git, prompter, request)?;

        if request.interactive {
            logger::writebox(&format!(
                "Line 1 will be cropped at {width} characters. <br>All other lines will be wrapped after {width} characters.",
                width = self.width
            ));
        }

        let draft = self.draft(prompter, &request.presets, request.interactive)?;
        let message = draft.compose(self.width);
        let invocation = CommandLine::new(
            "git",
            vec!["commit".to_string(), "-m".to_string(), message.clone()],
        );

        if request.dry_run {
            println!("{}", invocation.render());
            return Ok(message);
        }

        debug!("Committing: {}", invocation.render());
        let commit_id = git.commit(&message)?;
        logger::success(&format!("Committed {}", commit_id));
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::git::MockVersionControl;
    use crate::input::MockPrompter;
    use mockall::predicate::*;

    fn catalog() -> CommitTypeCatalog {
        Config::default().catalog().unwrap()
    }

    fn draft(commit_type: &str, short: &str) -> CommitDraft {
        CommitDraft {
            commit_type: commit_type.to_string(),
            short_description: short.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_subject_line_crop_boundaries() {
        // "Fix: " is five characters, so the short text fills the rest
        for (short_len, expected_len) in [(96, 101), (97, 102), (98, 102)] {
            let short = "a".repeat(short_len);
            let message = draft("Fix:", &short).compose(100);
            let expected: String = format!("Fix: {}", short).chars().take(102).collect();
            assert_eq!(message, expected);
            assert_eq!(message.chars().count(), expected_len);
        }
    }

    #[test]
    fn test_subject_crop_counts_characters() {
        let short = "é".repeat(200);
        let message = draft("Docs:", &short).compose(100);
        assert_eq!(message.chars().count(), 102);
        assert!(message.starts_with("Docs: é"));
    }

    #[test]
    fn test_wrap_never_splits_words() {
        let text = "lorem ipsum dolor sit amet consectetur adipiscing elit ".repeat(12);
        let wrapped = wrap(text.trim(), 100);
        for line in wrapped.lines() {
            assert!(line.chars().count() <= 100, "line too long: {line}");
        }
        let rejoined = wrapped.replace('\n', " ");
        assert_eq!(rejoined, text.trim());
    }

    #[test]
    fn test_wrap_keeps_overlong_token_whole() {
        let token = "x".repeat(130);
        let wrapped = wrap(&format!("short {} tail", token), 100);
        assert_eq!(wrapped, format!("short\n{}\ntail", token));
    }

    #[test]
    fn test_wrap_fills_up_to_width() {
        let text = format!("{} {}", "a".repeat(50), "b".repeat(49));
        assert_eq!(wrap(&text, 100), text);
        let text = format!("{} {}", "a".repeat(50), "b".repeat(50));
        assert_eq!(wrap(&text, 100), format!("{}\n{}", "a".repeat(50), "b".repeat(50)));
    }

    #[test]
    fn test_wrap_drops_spaces_at_a_break() {
        let text = format!("{}  tail", "a".repeat(100));
        assert_eq!(wrap(&text, 100), format!("{}\ntail", "a".repeat(100)));
        assert_eq!(wrap("one   two", 5), "one\ntwo");
        // Spaces inside a line are kept
        assert_eq!(wrap("one  two", 100), "one  two");
    }

    #[test]
    fn test_wrap_keeps_existing_line_breaks() {
        assert_eq!(wrap("one\ntwo three", 5), "one\ntwo\nthree");
        assert_eq!(wrap("", 100), "");
    }

    #[test]
    fn test_compose_full_message() {
        let draft = CommitDraft {
            commit_type: "Update:".to_string(),
            short_description: "Add tag generator".to_string(),
            long_description: Some("Computes the next version.".to_string()),
            breaking_change: Some("Tags now require three parts.".to_string()),
            issue_references: Some("fix #12".to_string()),
        };
        assert_eq!(
            draft.compose(100),
            "Update: Add tag generator\n\nComputes the next version.\n\n\
             BREAKING CHANGE: Tags now require three parts.\n\nfix #12"
        );
    }

    #[test]
    fn test_compose_skips_missing_paragraphs() {
        let mut draft = draft("Fix:", "Typo");
        draft.issue_references = Some("re #4".to_string());
        assert_eq!(draft.compose(100), "Fix: Typo\n\nre #4");
    }

    #[test]
    fn test_breaking_note_is_wrapped_with_its_label() {
        let mut draft = draft("Fix:", "Typo");
        draft.breaking_change = Some("word ".repeat(30).trim().to_string());
        let message = draft.compose(100);
        let paragraph = message.split("\n\n").nth(1).unwrap();
        assert!(paragraph.starts_with("BREAKING CHANGE: word"));
        assert!(paragraph.lines().all(|l| l.chars().count() <= 100));
        assert!(paragraph.lines().count() > 1);
    }

    #[test]
    fn test_interactive_session_builds_draft() {
        let catalog = catalog();
        let composer = CommitComposer::new(&catalog, 100);
        let mut prompter = MockPrompter::new();
        prompter
            .expect_select()
            .withf(|_, options, default| options.len() == 8 && *default == 0)
            .times(1)
            .returning(|_, _, _| Ok(1));
        prompter
            .expect_text()
            .withf(|p| p.required && p.prefix.as_deref() == Some("Update:"))
            .times(1)
            .returning(|_| Ok(Some("Add \"quoted\" support".to_string())));
        prompter
            .expect_text()
            .withf(|p| !p.required)
            .times(1)
            .returning(|_| Ok(None));
        prompter
            .expect_confirm_then_text()
            .with(eq("Are there any breaking changes?"), always())
            .times(1)
            .returning(|_, _| Ok(Some("Drops the old flag".to_string())));
        prompter
            .expect_confirm_then_text()
            .with(eq("Does this change affect any open issues?"), always())
            .times(1)
            .returning(|_, _| Ok(None));

        let draft = composer
            .draft(&prompter, &CommitPresets::default(), true)
            .unwrap();
        assert_eq!(draft.commit_type, "Update:");
        assert_eq!(draft.short_description, "Add \"quoted\" support");
        assert_eq!(draft.long_description, None);
        assert_eq!(draft.breaking_change.as_deref(), Some("Drops the old flag"));
        assert_eq!(draft.issue_references, None);
    }

    #[test]
    fn test_breaking_type_never_asks_about_breaking_changes() {
        let catalog = catalog();
        let composer = CommitComposer::new(&catalog, 100);
        let mut prompter = MockPrompter::new();
        // "Breaking" is the third configured type
        prompter.expect_select().returning(|_, _, _| Ok(2));
        prompter
            .expect_text()
            .returning(|p| Ok(if p.required { Some("Drop v1 API".to_string()) } else { None }));
        prompter
            .expect_confirm_then_text()
            .with(eq("Are there any breaking changes?"), always())
            .never();
        prompter
            .expect_confirm_then_text()
            .with(eq("Does this change affect any open issues?"), always())
            .times(1)
            .returning(|_, _| Ok(Some("fix #1".to_string())));

        let draft = composer
            .draft(&prompter, &CommitPresets::default(), true)
            .unwrap();
        assert!(draft.is_breaking_type());
        assert_eq!(draft.compose(100), "Breaking: Drop v1 API\n\nfix #1");
    }

    #[test]
    fn test_declining_to_stage_aborts_before_commit() {
        let catalog = catalog();
        let composer = CommitComposer::new(&catalog, 100);
        let mut git = MockVersionControl::new();
        git.expect_staged_files().returning(|| Ok(Vec::new()));
        git.expect_stage_all().never();
        git.expect_commit().never();
        let mut prompter = MockPrompter::new();
        prompter
            .expect_confirm()
            .with(
                eq("There are no files staged. Do you want to add all files?"),
                eq(false),
            )
            .times(1)
            .returning(|_, _| Ok(false));
        prompter.expect_select().never();
        prompter.expect_text().never();

        let request = CommitRequest {
            interactive: true,
            ..Default::default()
        };
        let result = composer.run(&git, &prompter, &request);
        assert!(matches!(result, Err(CliError::UserAbort(_))));
    }

    #[test]
    fn test_accepting_to_stage_stages_everything() {
        let catalog = catalog();
        let composer = CommitComposer::new(&catalog, 100);
        let mut git = MockVersionControl::new();
        git.expect_staged_files().returning(|| Ok(Vec::new()));
        git.expect_stage_all().times(1).returning(|| Ok(()));
        let mut prompter = MockPrompter::new();
        prompter.expect_confirm().returning(|_, _| Ok(true));

        let request = CommitRequest {
            interactive: true,
            ..Default::default()
        };
        composer.ensure_staged(&git, &prompter, &request).unwrap();
    }

    #[test]
    fn test_non_interactive_without_staged_changes_fails() {
        let catalog = catalog();
        let composer = CommitComposer::new(&catalog, 100);
        let mut git = MockVersionControl::new();
        git.expect_staged_files().returning(|| Ok(Vec::new()));
        let prompter = MockPrompter::new();

        let result = composer.ensure_staged(&git, &prompter, &CommitRequest::default());
        assert!(matches!(result, Err(CliError::NoStagedChanges)));
    }

    #[test]
    fn test_presets_commit_without_prompting() {
        let catalog = catalog();
        let composer = CommitComposer::new(&catalog, 100);
        let mut git = MockVersionControl::new();
        git.expect_staged_files()
            .returning(|| Ok(vec!["src/main.rs".to_string()]));
        git.expect_commit()
            .with(eq("Fix: Say \"hello\"\n\nre #9"))
            .times(1)
            .returning(|_| Ok("abc1234".to_string()));
        let prompter = MockPrompter::new();

        let request = CommitRequest {
            presets: CommitPresets {
                commit_type: Some("Fix".to_string()),
                short_description: Some("Say \"hello\"".to_string()),
                issue_references: Some("re #9".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let message = composer.run(&git, &prompter, &request).unwrap();
        assert_eq!(message, "Fix: Say \"hello\"\n\nre #9");
    }

    #[test]
    fn test_dry_run_does_not_commit() {
        let catalog = catalog();
        let composer = CommitComposer::new(&catalog, 100);
        let mut git = MockVersionControl::new();
        git.expect_staged_files().returning(|| Ok(Vec::new()));
        git.expect_stage_all().never();
        git.expect_commit().never();
        let prompter = MockPrompter::new();

        let request = CommitRequest {
            presets: CommitPresets {
                commit_type: Some("Docs".to_string()),
                short_description: Some("Readme".to_string()),
                ..Default::default()
            },
            stage_all: true,
            dry_run: true,
            ..Default::default()
        };
        assert_eq!(
            composer.run(&git, &prompter, &request).unwrap(),
            "Docs: Readme"
        );
    }

    #[test]
    fn test_unknown_preset_type_suggests_closest() {
        let catalog = catalog();
        let composer = CommitComposer::new(&catalog, 100);
        let prompter = MockPrompter::new();
        let presets = CommitPresets {
            commit_type: Some("Updte".to_string()),
            short_description: Some("x".to_string()),
            ..Default::default()
        };
        let err = composer.draft(&prompter, &presets, false).unwrap_err();
        assert!(err.to_string().contains("Did you mean 'Update'?"));
    }

    #[test]
    fn test_non_interactive_requires_message() {
        let catalog = catalog();
        let composer = CommitComposer::new(&catalog, 100);
        let prompter = MockPrompter::new();
        let presets = CommitPresets {
            commit_type: Some("Fix".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            composer.draft(&prompter, &presets, false),
            Err(CliError::InputError(_))
        ));
    }
}
