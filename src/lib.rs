//! # crowdle-guesses
//!
//! Builds the "allowed guess" dictionaries for a multi-length Dutch
//! Wordle-style game.
//!
//! ## Pipeline
//!
//! - **Load**: the dictionary word list (any common encoding) and the JSON-LD
//!   target list
//! - **Normalize**: uppercase, drop non-alphabetic lines, fold "IJ" into "Ĳ"
//! - **Merge**: add the target words, reporting those missing from the dictionary
//! - **Partition**: write one sorted `allowed-<N>.txt` per supported length
//!
//! ## Usage
//!
//! ```bash
//! # Regenerate allowed-5.txt .. allowed-8.txt from wordlist.txt and the targets
//! crowdle-guesses
//!
//! # Different inputs and lengths
//! crowdle-guesses -w opentaal.txt -t targets.jsonld -l 4-9 -o public
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use crowdle_guesses::processor::{Processor, ProcessorConfig};
//! use std::path::PathBuf;
//!
//! let config = ProcessorConfig {
//!     output_dir: PathBuf::from("./public"),
//!     ..ProcessorConfig::default()
//! };
//!
//! let outcome = Processor::new(config).run().unwrap();
//! for missing in &outcome.merge.missing {
//!     println!("{}", missing);
//! }
//! ```

pub mod cli;
pub mod encoding;
pub mod normalize;
pub mod output;
pub mod processor;
pub mod progress;
pub mod targets;
pub mod vocabulary;

pub use cli::Args;
pub use normalize::{fold_digraphs, Normalizer};
pub use output::Partitioner;
pub use processor::{Processor, ProcessorConfig};
pub use vocabulary::{Vocabulary, VocabularyBuilder};
