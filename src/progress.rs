//! Progress display module
//!
//! Styled terminal output, the loading spinner, and the end-of-run summary.

use crate::output::PartitionReport;
use crate::vocabulary::{MergeReport, PrimaryStats};
use bytesize::ByteSize;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::{Duration, Instant};

/// Print the application banner
pub fn print_banner() {
    let banner = r#"
╔══════════════════════════════════════════════════════════════╗
║   CROWDLE-GUESSES  ·  allowed-guess lists per word length    ║
╚══════════════════════════════════════════════════════════════╝
"#;

    println!("{}", banner.green());
}

/// Print a section header
pub fn print_header(text: &str) {
    println!("\n{} {}", "▶".green(), text.green().bold());
}

/// Print an info message
pub fn print_info(text: &str) {
    println!("  {} {}", "ℹ".cyan(), text);
}

/// Print a success message
pub fn print_success(text: &str) {
    println!("  {} {}", "✔".green(), text.green());
}

/// Print a warning message
pub fn print_warning(text: &str) {
    println!("  {} {}", "⚠".yellow(), text.yellow());
}

/// Print an error message
pub fn print_error(text: &str) {
    eprintln!("  {} {}", "✖".red(), text.red());
}

/// Print a bullet point
pub fn print_bullet(text: &str) {
    println!("  {} {}", "•".green(), text);
}

/// Create a styled spinner for indeterminate progress
pub fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();

    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg} {pos} lines")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ "),
    );

    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));

    pb
}

/// Statistics for one run
#[derive(Debug, Clone)]
pub struct RunStats {
    pub wordlist_bytes: u64,
    pub primary: PrimaryStats,
    pub targets: u64,
    pub missing_targets: u64,
    pub rejected_targets: u64,
    pub vocabulary: u64,
    pub buckets: Vec<(usize, u64)>,
    pub omitted: u64,
    pub start_time: Instant,
}

impl RunStats {
    pub fn new() -> Self {
        Self {
            wordlist_bytes: 0,
            primary: PrimaryStats::default(),
            targets: 0,
            missing_targets: 0,
            rejected_targets: 0,
            vocabulary: 0,
            buckets: Vec::new(),
            omitted: 0,
            start_time: Instant::now(),
        }
    }

    pub fn record_merge(&mut self, report: &MergeReport) {
        self.targets = report.targets;
        self.missing_targets = report.missing.len() as u64;
        self.rejected_targets = report.rejected.len() as u64;
    }

    pub fn record_partition(&mut self, report: &PartitionReport) {
        self.buckets = report.buckets.iter().map(|b| (b.length, b.words)).collect();
        self.omitted = report.omitted;
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn lines_per_second(&self) -> f64 {
        let elapsed = self.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.primary.lines as f64 / elapsed
        } else {
            0.0
        }
    }

    /// Print final statistics
    pub fn print_summary(&self) {
        println!();
        println!("{}", "═".repeat(60).green());
        println!("{}", "                    PROCESSING COMPLETE".green().bold());
        println!("{}", "═".repeat(60).green());
        println!();

        println!("  {} {}", "Word list:      ".green(), ByteSize(self.wordlist_bytes));
        println!("  {} {}", "Lines read:     ".green(), format_number(self.primary.lines));
        println!("  {} {}", "Accepted:       ".green(), format_number(self.primary.accepted));
        println!("  {} {}", "Duplicates:     ".yellow(), format_number(self.primary.duplicates));
        println!("  {} {}", "Rejected:       ".yellow(), format_number(self.primary.rejected));
        println!();

        println!("  {} {}", "Targets:        ".green(), format_number(self.targets));
        if self.missing_targets > 0 {
            println!("  {} {}", "Not in list:    ".yellow(), format_number(self.missing_targets));
        }
        if self.rejected_targets > 0 {
            println!("  {} {}", "Skipped:        ".red(), format_number(self.rejected_targets).red());
        }
        println!("  {} {}", "Vocabulary:     ".green().bold(), format_number(self.vocabulary).green().bold());
        println!();

        for (length, words) in &self.buckets {
            println!("  {} {}", format!("Length {:<9}", format!("{}:", length)).green(), format_number(*words));
        }
        println!("  {} {}", "Other lengths:  ".green(), format_number(self.omitted));

        println!();
        println!("  {} {}", "Duration:       ".green(), format_duration(self.elapsed()));
        println!("  {} {:.2} lines/sec", "Throughput:     ".green(), self.lines_per_second());
        println!();
        println!("{}", "═".repeat(60).green());
    }
}

impl Default for RunStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a number with thousand separators
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    let chars: Vec<char> = s.chars().collect();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }

    result
}

/// Format duration as human-readable string
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();

    if secs < 60 {
        format!("{:.1}s", duration.as_secs_f64())
    } else if secs < 3600 {
        let mins = secs / 60;
        let secs = secs % 60;
        format!("{}m {}s", mins, secs)
    } else {
        let hours = secs / 3600;
        let mins = (secs % 3600) / 60;
        format!("{}h {}m", hours, mins)
    }
}
