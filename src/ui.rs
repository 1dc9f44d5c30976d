// UI module for consistent terminal output with spinners and styling
//
// Everything the binary prints goes through here.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use crate::detail::{Dependency, DetailView};
use crate::display::DisplayRecord;
use console::{Term, style};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use serde::Serialize;
use std::time::Duration;

/// Spinner style similar to uv/pnpm
const SPINNER_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

/// Tags shown on a card; the detail view shows all of them
const CARD_TAGS: usize = 2;

/// Check if stderr is a TTY (for interactive output)
fn is_tty() -> bool {
    Term::stderr().is_term()
}

/// Create a styled spinner for the loading state
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if !is_tty() {
        pb.set_draw_target(ProgressDrawTarget::hidden());
    }

    if let Ok(spinner_style) = ProgressStyle::default_spinner()
        .tick_chars(SPINNER_CHARS)
        .template("{spinner:.cyan} {msg}")
    {
        pb.set_style(spinner_style);
    }
    pb.set_message(message.to_string());

    if is_tty() {
        pb.enable_steady_tick(Duration::from_millis(80));
    }

    pb
}

/// Clear a spinner without leaving a message
pub fn clear_spinner(pb: &ProgressBar) {
    pb.finish_and_clear();
}

/// Print a success message with checkmark
pub fn success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Print a warning message
pub fn warning(message: &str) {
    eprintln!("{} {}", style("⚠").yellow(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", style("✗").red(), message);
}

/// Print a dimmed/secondary message
pub fn dim(message: &str) {
    println!("{}", style(message).dim());
}

/// Print a value as pretty JSON on stdout
pub fn json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn card(record: &DisplayRecord) {
    println!(
        "{} {}  {} {}",
        style("■").magenta(),
        style(&record.name).bold(),
        style(format!("v{}", record.version)).dim(),
        style(format!("↓ {}", record.downloads)).cyan(),
    );
    println!("  {}", record.description);

    let tags: Vec<String> = record
        .tags
        .iter()
        .take(CARD_TAGS)
        .map(|t| format!("#{}", t))
        .collect();
    if !tags.is_empty() {
        println!("  {}", style(tags.join(" ")).dim());
    }

    println!(
        "  {} {}",
        style("source").dim(),
        style(&record.source_link).underlined()
    );
    println!(
        "  {} {}",
        style("npm   ").dim(),
        style(&record.registry_link).underlined()
    );
    println!();
}

pub fn detail(view: &DetailView, show_readme: bool) {
    println!(
        "{} {}",
        style(&view.name).bold(),
        style(format!("v{}", view.version)).dim()
    );
    println!("{}", view.description);
    println!();
    println!("  {} {}", style("$").cyan(), view.install_command);
    println!("  {} {}", style("source").dim(), view.source_link);
    println!("  {} {}", style("npm   ").dim(), view.registry_link);
    println!();

    let stats = &view.stats;
    println!(
        "  {} {}   {} {}   {} {}   {} {}",
        style("Downloads").dim(),
        stats.downloads,
        style("Versions").dim(),
        stats.version_count,
        style("License").dim(),
        stats.license,
        style("Updated").dim(),
        stats.updated,
    );
    println!();

    println!(
        "{} ({})",
        style("Dependencies").bold(),
        view.dependency_count()
    );
    dependency_list("dependencies", &view.dependencies);
    dependency_list("devDependencies", &view.dev_dependencies);
    println!();

    println!("{} ({})", style("Versions").bold(), view.history.len());
    for entry in &view.history {
        let label = format!("v{}", entry.version);
        if entry.latest {
            println!(
                "  {} {} {}  {}",
                style("●").cyan(),
                style(label).cyan().bold(),
                style("latest").green(),
                entry.date
            );
        } else {
            println!("  {} {}  {}", style("○").dim(), label, entry.date);
        }
    }

    if show_readme {
        println!();
        println!("{}", style("Documentation").bold());
        match &view.readme {
            Some(readme) => println!("{}", readme),
            None => dim("No documentation available"),
        }
    }
}

fn dependency_list(heading: &str, deps: &[Dependency]) {
    println!("  {}", style(heading).underlined());
    if deps.is_empty() {
        dim(&format!("    No {}", heading));
        return;
    }
    for dep in deps {
        println!("    {} {}", dep.name, style(&dep.range).dim());
    }
}
