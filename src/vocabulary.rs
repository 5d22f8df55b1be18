//! Vocabulary construction and target validation
//!
//! The vocabulary is the deduplicated set of canonical words from the
//! primary dictionary, extended with the target words. Target words missing
//! from the dictionary are reported but never dropped, since the target
//! list decides what the game can ask for.

use crate::normalize::{canonical_len, Normalizer};
use ahash::RandomState;
use hashbrown::HashSet;
use std::fmt;

/// How target words are brought into canonical form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetPolicy {
    /// Normalize targets exactly like dictionary words
    #[default]
    Normalize,
    /// Insert targets as they appear in the document
    Trust,
}

/// Names used in diagnostics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceNames {
    /// Owner of the target list
    pub targets: String,
    /// Name of the reference dictionary
    pub reference: String,
}

impl Default for SourceNames {
    fn default() -> Self {
        Self {
            targets: "CROW".to_string(),
            reference: "OpenTaal".to_string(),
        }
    }
}

/// A target word that does not occur in the reference dictionary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingTarget {
    pub word: String,
    pub source: String,
    pub reference: String,
}

impl fmt::Display for MissingTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}'s {} not in {}", self.source, self.word, self.reference)
    }
}

/// A target word that is not a word after normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedTarget {
    pub raw: String,
    pub source: String,
}

impl fmt::Display for RejectedTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}'s {:?} is not alphabetic, skipped", self.source, self.raw)
    }
}

/// Outcome of feeding one dictionary line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryOutcome {
    Accepted,
    Duplicate,
    Rejected,
}

/// Counters for the dictionary pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrimaryStats {
    pub lines: u64,
    pub accepted: u64,
    pub duplicates: u64,
    pub rejected: u64,
}

/// Result of merging the target list
#[derive(Debug, Clone, Default)]
pub struct MergeReport {
    /// Number of target entries seen
    pub targets: u64,
    /// Targets absent from the dictionary, in document order
    pub missing: Vec<MissingTarget>,
    /// Targets that failed normalization, in document order
    pub rejected: Vec<RejectedTarget>,
}

/// Accumulates the vocabulary until it is frozen with [`VocabularyBuilder::build`]
pub struct VocabularyBuilder {
    words: HashSet<String, RandomState>,
    normalizer: Normalizer,
    policy: TargetPolicy,
    names: SourceNames,
    stats: PrimaryStats,
}

impl VocabularyBuilder {
    pub fn new(normalizer: Normalizer, policy: TargetPolicy, names: SourceNames) -> Self {
        Self {
            words: HashSet::with_hasher(RandomState::new()),
            normalizer,
            policy,
            names,
            stats: PrimaryStats::default(),
        }
    }

    /// Normalize a dictionary line and add it if it is a word
    pub fn insert_primary(&mut self, raw: &str) -> PrimaryOutcome {
        self.stats.lines += 1;

        let Some(word) = self.normalizer.normalize(raw) else {
            self.stats.rejected += 1;
            return PrimaryOutcome::Rejected;
        };

        if self.words.insert(word) {
            self.stats.accepted += 1;
            PrimaryOutcome::Accepted
        } else {
            self.stats.duplicates += 1;
            PrimaryOutcome::Duplicate
        }
    }

    /// Add every line of the dictionary
    pub fn extend_primary<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.insert_primary(line.as_ref());
        }
    }

    /// Merge the target words, reporting those absent from the dictionary
    ///
    /// Must run after the dictionary pass, otherwise every target is
    /// reported missing.
    pub fn merge_targets(&mut self, targets: &[String]) -> MergeReport {
        let mut report = MergeReport::default();

        for raw in targets {
            report.targets += 1;

            let word = match self.policy {
                TargetPolicy::Trust => raw.clone(),
                TargetPolicy::Normalize => match self.normalizer.normalize(raw) {
                    Some(word) => word,
                    None => {
                        let rejected = RejectedTarget {
                            raw: raw.clone(),
                            source: self.names.targets.clone(),
                        };
                        log::debug!("{}", rejected);
                        report.rejected.push(rejected);
                        continue;
                    }
                },
            };

            if !self.words.contains(word.as_str()) {
                let missing = MissingTarget {
                    word: word.clone(),
                    source: self.names.targets.clone(),
                    reference: self.names.reference.clone(),
                };
                log::debug!("{}", missing);
                report.missing.push(missing);
                self.words.insert(word);
            }
        }

        report
    }

    pub fn stats(&self) -> PrimaryStats {
        self.stats
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Freeze the vocabulary
    pub fn build(self) -> Vocabulary {
        Vocabulary { words: self.words }
    }
}

/// The final, read-only set of canonical words
#[derive(Debug, Clone)]
pub struct Vocabulary {
    words: HashSet<String, RandomState>,
}

impl Vocabulary {
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterate in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// All words in ascending byte order
    pub fn sorted(&self) -> Vec<&str> {
        let mut words: Vec<&str> = self.iter().collect();
        words.sort_unstable();
        words
    }

    /// Number of words of exactly `length` characters
    pub fn count_by_length(&self, length: usize) -> usize {
        self.iter().filter(|w| canonical_len(w) == length).count()
    }

    /// Words of exactly `length` characters, ascending
    pub fn sorted_by_length(&self, length: usize) -> Vec<&str> {
        let mut words: Vec<&str> = self.iter().filter(|w| canonical_len(w) == length).collect();
        words.sort_unstable();
        words
    }
}

impl<S: Into<String>> FromIterator<S> for Vocabulary {
    /// Build from words already in canonical form
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut words = HashSet::with_hasher(RandomState::new());
        words.extend(iter.into_iter().map(Into::into));
        Self { words }
    }
}
