//! crowdle-guesses - builds the per-length allowed-guess lists
//!
//! Main entry point for the command-line application.

use clap::Parser;
use std::process;

use crowdle_guesses::cli::Args;
use crowdle_guesses::processor::{Processor, ProcessorConfig};
use crowdle_guesses::progress::{print_banner, print_error, print_header, print_info};

fn main() {
    // Parse command-line arguments
    let args = Args::parse();

    // Set up logging
    if args.verbose {
        std::env::set_var("RUST_LOG", "debug");
    } else if !args.quiet {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    if let Err(e) = run(args) {
        print_error(&format!("{}", e));

        for cause in e.chain().skip(1) {
            print_error(&format!("  Caused by: {}", cause));
        }

        process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    if !args.quiet {
        print_banner();
    }

    validate_args(&args)?;

    let config = ProcessorConfig::from_args(&args)?;

    if !args.quiet && args.verbose {
        print_config(&config);
    }

    Processor::new(config).run()?;

    Ok(())
}

/// Validate command-line arguments
fn validate_args(args: &Args) -> anyhow::Result<()> {
    if !args.wordlist.is_file() {
        anyhow::bail!("Word list does not exist: {:?}", args.wordlist);
    }

    if !args.targets.is_file() {
        anyhow::bail!("Target list does not exist: {:?}", args.targets);
    }

    if args.prefix.is_empty() || args.prefix.contains(std::path::is_separator) {
        anyhow::bail!("Invalid output prefix: '{}'", args.prefix);
    }

    args.parse_lengths()?;

    Ok(())
}

/// Print configuration summary
fn print_config(config: &ProcessorConfig) {
    print_header("Configuration");

    print_info(&format!("Word list:    {:?}", config.wordlist));
    print_info(&format!("Targets:      {:?}", config.targets));
    print_info(&format!("Output dir:   {:?}", config.output_dir));
    print_info(&format!("Lengths:      {:?}", config.lengths));
    print_info(&format!("Prefix:       {}", config.prefix));
    print_info(&format!("Targets mode: {:?}", config.target_policy));
    print_info(&format!("Reference:    {}", config.names.reference));
    print_info(&format!("Buffer size:  {} KB", config.buffer_size / 1024));
}
