//! Command-line interface definition for crowdle-guesses
//!
//! Every flag defaults to the values the game ships with, so running the
//! tool without arguments next to the two input files regenerates the
//! `allowed-5.txt` .. `allowed-8.txt` lists.

use clap::Parser;
use std::path::PathBuf;

/// Build per-length allowed-guess lists for a Dutch word game
///
/// Normalizes a dictionary word list, merges in the target words, and
/// writes one sorted file per supported word length.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "crowdle-guesses",
    version,
    about = "Build per-length allowed-guess lists from a Dutch word list",
    long_about = r#"
Builds the allowed-guess dictionaries for a multi-length Dutch word game.

Every dictionary line is uppercased, non-alphabetic lines are dropped, and
each "IJ" is folded into the single letter "Ĳ". Target words missing from
the dictionary are reported and added anyway. The result is written to one
sorted file per word length.

EXAMPLES:
    # Regenerate allowed-5.txt .. allowed-8.txt in the current directory
    crowdle-guesses

    # Explicit inputs, output into public/
    crowdle-guesses -w opentaal.txt -t targets.jsonld -o public

    # Also support 4 and 9 letter games
    crowdle-guesses -l 4-9

    # Show what would be written
    crowdle-guesses --dry-run
"#
)]
pub struct Args {
    /// Dictionary word list, one word per line
    #[arg(short, long, value_name = "PATH", default_value = "wordlist.txt")]
    pub wordlist: PathBuf,

    /// JSON-LD document with the target words under "answer"
    #[arg(short, long, value_name = "PATH", default_value = "crowdle-possible-targets.jsonld")]
    pub targets: PathBuf,

    /// Output directory
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub output: PathBuf,

    /// Supported word lengths: single (5), multiple (5,6,7), or range (5-8)
    #[arg(short, long, value_name = "LENGTHS", default_value = "5-8")]
    pub lengths: String,

    /// Output file prefix, files are named PREFIX-LENGTH.txt
    #[arg(long, value_name = "NAME", default_value = "allowed")]
    pub prefix: String,

    /// Insert target words as-is instead of normalizing them
    #[arg(long, default_value_t = false)]
    pub trust_targets: bool,

    /// Name of the target list owner, used in diagnostics
    #[arg(long, value_name = "NAME", default_value = "CROW")]
    pub target_source: String,

    /// Name of the reference dictionary, used in diagnostics
    #[arg(long, value_name = "NAME", default_value = "OpenTaal")]
    pub reference: String,

    /// Buffer size for output files
    #[arg(long, value_name = "SIZE", default_value = "1MB")]
    pub buffer_size: String,

    /// Load and merge, then show what would be written without writing
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    /// Show detailed statistics
    #[arg(long, default_value_t = false)]
    pub stats: bool,

    /// Quiet mode - only diagnostics and errors
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,

    /// Verbose mode - detailed logging
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Args {
    /// Parse the length specification into a sorted list of lengths
    pub fn parse_lengths(&self) -> anyhow::Result<Vec<usize>> {
        parse_lengths(&self.lengths)
    }

    /// Parse buffer size string to bytes
    pub fn parse_buffer_size(&self) -> anyhow::Result<usize> {
        let size = parse_size(&self.buffer_size)?;
        if size == 0 {
            anyhow::bail!("Buffer size must be greater than zero");
        }
        Ok(size)
    }
}

/// Parse "5", "5,6,7" or "5-8" (and mixtures) into sorted unique lengths
pub fn parse_lengths(spec: &str) -> anyhow::Result<Vec<usize>> {
    let mut lengths = Vec::new();

    for part in spec.split(',') {
        let part = part.trim();

        if part.contains('-') {
            let parts: Vec<&str> = part.split('-').collect();
            if parts.len() != 2 {
                anyhow::bail!("Invalid length range format: '{}'. Use format: START-END (e.g., 5-8)", part);
            }

            let start: usize = parts[0].trim().parse()
                .map_err(|_| anyhow::anyhow!("Invalid start value in range: '{}'", parts[0]))?;
            let end: usize = parts[1].trim().parse()
                .map_err(|_| anyhow::anyhow!("Invalid end value in range: '{}'", parts[1]))?;

            if start > end {
                anyhow::bail!("Invalid range: start ({}) must be <= end ({})", start, end);
            }

            lengths.extend(start..=end);
        } else {
            let len: usize = part.parse()
                .map_err(|_| anyhow::anyhow!("Invalid length value: '{}'", part))?;
            lengths.push(len);
        }
    }

    if lengths.contains(&0) {
        anyhow::bail!("Word length must be at least 1");
    }

    lengths.sort_unstable();
    lengths.dedup();
    Ok(lengths)
}

/// Parse human-readable size string to bytes
fn parse_size(size_str: &str) -> anyhow::Result<usize> {
    let size_str = size_str.trim().to_uppercase();

    let (num_str, multiplier) = if let Some(n) = size_str.strip_suffix("GB") {
        (n, 1024 * 1024 * 1024)
    } else if let Some(n) = size_str.strip_suffix("MB") {
        (n, 1024 * 1024)
    } else if let Some(n) = size_str.strip_suffix("KB") {
        (n, 1024)
    } else if let Some(n) = size_str.strip_suffix('B') {
        (n, 1)
    } else {
        (size_str.as_str(), 1)
    };

    let num: usize = num_str.trim().parse()
        .map_err(|_| anyhow::anyhow!("Invalid size format: '{}'", size_str))?;

    num.checked_mul(multiplier)
        .ok_or_else(|| anyhow::anyhow!("Size too large: '{}'", size_str))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["crowdle-guesses"]);

        assert_eq!(args.wordlist, PathBuf::from("wordlist.txt"));
        assert_eq!(args.targets, PathBuf::from("crowdle-possible-targets.jsonld"));
        assert_eq!(args.output, PathBuf::from("."));
        assert_eq!(args.prefix, "allowed");
        assert!(!args.trust_targets);
        assert_eq!(args.parse_lengths().unwrap(), vec![5, 6, 7, 8]);
        assert_eq!(args.parse_buffer_size().unwrap(), 1024 * 1024);
    }

    #[test]
    fn test_flags() {
        let args = Args::parse_from([
            "crowdle-guesses",
            "-w", "opentaal.txt",
            "-t", "targets.jsonld",
            "-o", "public",
            "-l", "4,6",
            "--trust-targets",
            "--reference", "Van Dale",
        ]);

        assert_eq!(args.wordlist, PathBuf::from("opentaal.txt"));
        assert_eq!(args.targets, PathBuf::from("targets.jsonld"));
        assert_eq!(args.output, PathBuf::from("public"));
        assert!(args.trust_targets);
        assert_eq!(args.reference, "Van Dale");
        assert_eq!(args.parse_lengths().unwrap(), vec![4, 6]);
    }

    #[test]
    fn test_parse_single_length() {
        assert_eq!(parse_lengths("5").unwrap(), vec![5]);
    }

    #[test]
    fn test_parse_multiple_lengths() {
        assert_eq!(parse_lengths("8, 5,6,5").unwrap(), vec![5, 6, 8]);
    }

    #[test]
    fn test_parse_length_range() {
        assert_eq!(parse_lengths("5-8").unwrap(), vec![5, 6, 7, 8]);
        assert_eq!(parse_lengths("3,5-6").unwrap(), vec![3, 5, 6]);
    }

    #[test]
    fn test_parse_invalid_lengths() {
        assert!(parse_lengths("8-5").is_err());
        assert!(parse_lengths("five").is_err());
        assert!(parse_lengths("1-2-3").is_err());
        assert!(parse_lengths("0-5").is_err());
        assert!(parse_lengths("").is_err());
    }

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("64MB").unwrap(), 64 * 1024 * 1024);
        assert_eq!(parse_size("1024KB").unwrap(), 1024 * 1024);
        assert_eq!(parse_size("512").unwrap(), 512);
        assert!(parse_size("lots").is_err());
        assert!(parse_size("99999999999GB").is_err());
        assert!(parse_size(&format!("{}KB", usize::MAX)).is_err());
    }
}
