pub fn validate_required(input: &str) -> Result<(), String> {
    if input.trim().is_empty() {
        Err("A value is required".to_string())
    } else {
        Ok(())
    }
}

/// Trimmed answer, or `None` when the user only pressed enter.
pub fn normalize_answer(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Closest configured label for a mistyped commit type.
pub fn suggest_commit_type<'a>(input: &str, labels: &[&'a str]) -> Option<&'a str> {
    let input = input.trim().trim_end_matches(':').to_lowercase();
    labels
        .iter()
        .min_by_key(|&&label| strsim::levenshtein(&input, &label.to_lowercase()))
        .filter(|&&label| {
            let distance = strsim::levenshtein(&input, &label.to_lowercase());
            let max_allowed = (label.len() as f32 * 0.6).ceil() as usize;
            distance <= max_allowed
        })
        .copied()
}
