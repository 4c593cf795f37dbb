//! Terminal output helpers.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use grover_search::OutcomeTable;

/// Progress bar for a sweep of `len` circuit evaluations.
pub fn progress_bar(len: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    if let Ok(bar_style) = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
    ) {
        pb.set_style(bar_style.progress_chars("#>-"));
    }
    pb.set_message(message.to_string());
    pb
}

pub fn print_header(title: &str) {
    println!();
    println!("{}", style("═".repeat(60)).cyan());
    println!("{}", style(format!("  {title}")).cyan().bold());
    println!("{}", style("═".repeat(60)).cyan());
}

pub fn print_section(title: &str) {
    println!();
    println!("{}", style(format!("▶ {title}")).green().bold());
    println!("{}", style("─".repeat(40)).dim());
}

pub fn print_result(label: &str, value: impl std::fmt::Display) {
    println!("  {} {}", style(format!("{label}:")).dim(), value);
}

pub fn print_success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

pub fn print_warning(message: &str) {
    println!("{} {}", style("!").yellow().bold(), message);
}

/// Print decoded outcomes as a bar table, most frequent first.
///
/// Values are shown both as integers and as MSB-first binary so they read
/// like the usual ket notation.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn print_histogram(table: &OutcomeTable, width: u32, marked: impl Fn(u64) -> bool) {
    let total: u64 = table.values().sum();
    if total == 0 {
        return;
    }

    let mut rows: Vec<(u64, u64)> = table.iter().map(|(&v, &c)| (v, c)).collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    for &(value, count) in rows.iter().take(16) {
        let prob = count as f64 / total as f64 * 100.0;
        let bar = "█".repeat((prob / 2.0).round() as usize);
        let ket = format!("|{value:0w$b}⟩", w = width as usize);
        let ket = if marked(value) {
            style(ket).green().bold()
        } else {
            style(ket).cyan()
        };
        println!(
            "  {:>6} {}: {:>6} ({:>5.2}%) {}",
            value,
            ket,
            count,
            prob,
            style(bar).green()
        );
    }

    if rows.len() > 16 {
        println!("  ... and {} more outcomes", rows.len() - 16);
    }
}
