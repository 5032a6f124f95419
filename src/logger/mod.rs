use colored::*;
use log::{info, warn};
use regex::Regex;

/// Print a success message with a green checkmark
pub fn success(msg: &str) {
    info!("{} {}", "✓".green(), msg);
}

/// Print a warning message with a yellow warning symbol
pub fn warning(msg: &str) {
    warn!("{} {}", "⚠".yellow(), msg);
}

/// Print a progress message with a blue arrow
pub fn progress(msg: &str) {
    info!("{} {}", "→".blue(), msg);
}

/// Split box content into lines; `<br>`, `<br/>` and newlines all break.
pub fn box_lines(content: &str) -> Vec<String> {
    let breaks = Regex::new(r"(?i)<br\s*/?>|\n").expect("static regex");
    breaks
        .split(content)
        .map(|line| line.trim().to_string())
        .collect()
}

/// Render `content` as a padded block: one blank row above and below, every
/// line padded to the widest one.
pub fn render_box(content: &str) -> Vec<String> {
    let lines = box_lines(content);
    let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let blank = " ".repeat(width + 2);

    let mut rows = Vec::with_capacity(lines.len() + 2);
    rows.push(blank.clone());
    for line in &lines {
        rows.push(format!(" {:<width$} ", line, width = width));
    }
    rows.push(blank);
    rows
}

/// Write a boxed message to stdout, white on blue.
pub fn writebox(content: &str) {
    println!();
    for row in render_box(content) {
        println!("{}", row.white().on_blue());
    }
    println!();
}
