//! Terminal rendering of diagnostic progress and outcome.

use crate::diagnose::DiagnoseTarget;
use chrono::Utc;
use owo_colors::OwoColorize;

/// Print one passed-step line.
pub fn step(message: impl AsRef<str>) {
    println!("{} {}", "✓".green(), message.as_ref());
}

/// Print an observation that does not decide the outcome by itself.
pub fn note(message: impl AsRef<str>) {
    println!("{} {}", "•".yellow(), message.as_ref());
}

/// Final banner for a successful run.
pub fn print_succeed(target: DiagnoseTarget) {
    println!();
    println!(
        "{} {}",
        format!("{target} diagnose success").green().bold(),
        Utc::now().format("(%Y-%m-%d %H:%M:%S UTC)").dimmed()
    );
}

/// Final banner for a failed run.
pub fn print_fail(target: DiagnoseTarget) {
    println!();
    println!(
        "{} {}",
        format!("{target} diagnose failed").red().bold(),
        Utc::now().format("(%Y-%m-%d %H:%M:%S UTC)").dimmed()
    );
}
