//! Pipeline driver
//!
//! Runs the stages in order: read the dictionary, merge the targets,
//! partition the frozen vocabulary into per-length files.

use crate::cli::Args;
use crate::encoding::{detect_encoding, WordListReader};
use crate::normalize::Normalizer;
use crate::output::{PartitionReport, Partitioner, DEFAULT_BUFFER_SIZE, DEFAULT_LENGTHS, DEFAULT_PREFIX};
use crate::progress::{create_spinner, print_bullet, print_header, print_info, print_success, print_warning, RunStats};
use crate::targets::load_targets;
use crate::vocabulary::{MergeReport, SourceNames, TargetPolicy, Vocabulary, VocabularyBuilder};

use bytesize::ByteSize;
use colored::*;
use indicatif::ProgressBar;
use std::path::PathBuf;

/// Lines between spinner updates
const SPINNER_STRIDE: u64 = 16 * 1024;

/// Processor configuration
#[derive(Debug, Clone)]
pub struct ProcessorConfig {
    pub wordlist: PathBuf,
    pub targets: PathBuf,
    pub output_dir: PathBuf,
    pub prefix: String,
    pub lengths: Vec<usize>,
    pub target_policy: TargetPolicy,
    pub names: SourceNames,
    pub buffer_size: usize,
    pub dry_run: bool,
    pub quiet: bool,
    pub verbose: bool,
    pub show_stats: bool,
}

impl ProcessorConfig {
    pub fn from_args(args: &Args) -> anyhow::Result<Self> {
        Ok(Self {
            wordlist: args.wordlist.clone(),
            targets: args.targets.clone(),
            output_dir: args.output.clone(),
            prefix: args.prefix.clone(),
            lengths: args.parse_lengths()?,
            target_policy: if args.trust_targets {
                TargetPolicy::Trust
            } else {
                TargetPolicy::Normalize
            },
            names: SourceNames {
                targets: args.target_source.clone(),
                reference: args.reference.clone(),
            },
            buffer_size: args.parse_buffer_size()?,
            dry_run: args.dry_run,
            quiet: args.quiet,
            verbose: args.verbose,
            show_stats: args.stats,
        })
    }
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            wordlist: PathBuf::from("wordlist.txt"),
            targets: PathBuf::from("crowdle-possible-targets.jsonld"),
            output_dir: PathBuf::from("."),
            prefix: DEFAULT_PREFIX.to_string(),
            lengths: DEFAULT_LENGTHS.to_vec(),
            target_policy: TargetPolicy::default(),
            names: SourceNames::default(),
            buffer_size: DEFAULT_BUFFER_SIZE,
            dry_run: false,
            quiet: false,
            verbose: false,
            show_stats: false,
        }
    }
}

/// Everything a run produced
#[derive(Debug)]
pub struct RunOutcome {
    pub vocabulary: Vocabulary,
    pub merge: MergeReport,
    /// `None` on a dry run
    pub partition: Option<PartitionReport>,
    pub stats: RunStats,
}

/// Main processor
pub struct Processor {
    config: ProcessorConfig,
}

impl Processor {
    pub fn new(config: ProcessorConfig) -> Self {
        Self { config }
    }

    /// Run the whole pipeline
    pub fn run(&self) -> anyhow::Result<RunOutcome> {
        let mut stats = RunStats::new();

        let (vocabulary, merge) = self.build_vocabulary(&mut stats)?;
        stats.vocabulary = vocabulary.len() as u64;

        let partitioner = Partitioner::new(
            self.config.output_dir.clone(),
            &self.config.prefix,
            self.config.lengths.clone(),
        )
        .with_buffer_size(self.config.buffer_size);

        if self.config.dry_run {
            self.dry_run_report(&partitioner, &vocabulary);
            return Ok(RunOutcome {
                vocabulary,
                merge,
                partition: None,
                stats,
            });
        }

        if !self.config.quiet {
            print_header("Writing length buckets...");
        }

        let partition = partitioner.write(&vocabulary)?;
        stats.record_partition(&partition);

        if !self.config.quiet {
            print_success("Output files created:");
            for bucket in &partition.buckets {
                print_bullet(&format!("Length {}: {:?} ({} words)", bucket.length, bucket.path, bucket.words));
            }
            if partition.omitted > 0 {
                print_info(&format!("{} words of other lengths not written", partition.omitted));
            }
        }

        if self.config.show_stats && !self.config.quiet {
            stats.print_summary();
        }

        Ok(RunOutcome {
            vocabulary,
            merge,
            partition: Some(partition),
            stats,
        })
    }

    /// Load both sources and merge them into the frozen vocabulary
    pub fn build_vocabulary(&self, stats: &mut RunStats) -> anyhow::Result<(Vocabulary, MergeReport)> {
        // A malformed target list aborts before the dictionary pass
        let targets = load_targets(&self.config.targets)?;

        if !self.config.quiet {
            print_header("Reading word list...");
        }

        let encoding = detect_encoding(&self.config.wordlist)?;
        if self.config.verbose {
            print_info(&format!("Encoding: {} (confidence {:.1})", encoding.name, encoding.confidence));
        }

        let reader = WordListReader::with_encoding(&self.config.wordlist, encoding.encoding)?;
        stats.wordlist_bytes = reader.size() as u64;

        let mut builder = VocabularyBuilder::new(
            Normalizer::dutch(),
            self.config.target_policy,
            self.config.names.clone(),
        );

        let pb = if self.config.quiet {
            ProgressBar::hidden()
        } else {
            create_spinner(&format!("{:?}", self.config.wordlist))
        };

        let mut lines: u64 = 0;
        for line in reader {
            builder.insert_primary(&line);
            lines += 1;
            if lines % SPINNER_STRIDE == 0 {
                pb.set_position(lines);
            }
        }
        pb.set_position(lines);
        pb.finish_with_message("Complete".green().to_string());

        stats.primary = builder.stats();

        if !self.config.quiet {
            print_info(&format!(
                "{} words from {} ({})",
                builder.len(),
                self.config.names.reference,
                ByteSize(stats.wordlist_bytes)
            ));
            print_header(&format!("Checking {} target words...", targets.len()));
        }

        let merge = builder.merge_targets(&targets);
        stats.record_merge(&merge);

        // Printed even with --quiet
        for missing in &merge.missing {
            print_warning(&missing.to_string());
        }
        for rejected in &merge.rejected {
            print_warning(&rejected.to_string());
        }

        if !self.config.quiet && merge.missing.is_empty() && merge.rejected.is_empty() {
            print_success(&format!("All targets found in {}", self.config.names.reference));
        }

        Ok((builder.build(), merge))
    }

    /// Dry run report
    fn dry_run_report(&self, partitioner: &Partitioner, vocabulary: &Vocabulary) {
        print_header("DRY RUN - No files will be written");

        println!("\n  {} Output files:", "▶".green());
        let mut planned = 0;
        for (length, path) in partitioner.planned_paths() {
            let words = vocabulary.count_by_length(length);
            planned += words;
            print_bullet(&format!("{:?} ({} words)", path, words));
        }
        print_bullet(&format!("Other lengths: {} words", vocabulary.len() - planned));

        if self.config.target_policy == TargetPolicy::Trust {
            print_bullet("Target words inserted as-is");
        }
    }
}
