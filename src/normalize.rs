//! Word normalization module
//!
//! Turns raw dictionary lines into the canonical comparison form used
//! everywhere else: uppercase, alphabetic only, with digraphs folded into
//! their ligature.

/// Latin capital ligature IJ (U+0132)
pub const IJ_LIGATURE: char = '\u{0132}';

/// A two-letter sequence that is folded into a single character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Digraph {
    pub sequence: &'static str,
    pub ligature: char,
}

/// The Dutch "IJ" digraph
pub const DUTCH_IJ: Digraph = Digraph {
    sequence: "IJ",
    ligature: IJ_LIGATURE,
};

/// Normalizer configuration
#[derive(Debug, Clone)]
pub struct Normalizer {
    digraphs: Vec<Digraph>,
}

impl Normalizer {
    /// Create a normalizer folding the given digraphs, applied in order
    pub fn new(digraphs: Vec<Digraph>) -> Self {
        Self { digraphs }
    }

    /// Normalizer for Dutch word lists
    pub fn dutch() -> Self {
        Self::new(vec![DUTCH_IJ])
    }

    /// Normalize a raw token, or `None` if it is not a word
    ///
    /// The alphabetic check runs on the uppercased token before folding, so
    /// blank lines, digits, punctuation and inner spaces are all rejected.
    pub fn normalize(&self, raw: &str) -> Option<String> {
        let upper = raw.trim().to_uppercase();

        if upper.is_empty() || !upper.chars().all(char::is_alphabetic) {
            return None;
        }

        Some(self.fold(&upper))
    }

    /// Apply digraph folding only
    pub fn fold(&self, word: &str) -> String {
        let mut folded = word.to_string();
        for digraph in &self.digraphs {
            if folded.contains(digraph.sequence) {
                folded = folded.replace(digraph.sequence, &digraph.ligature.to_string());
            }
        }
        folded
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::dutch()
    }
}

/// Fold every "IJ" into the ligature
pub fn fold_digraphs(word: &str) -> String {
    word.replace(DUTCH_IJ.sequence, &IJ_LIGATURE.to_string())
}

/// Length of a canonical word in characters (a ligature counts as one)
#[inline]
pub fn canonical_len(word: &str) -> usize {
    if word.is_ascii() {
        word.len()
    } else {
        word.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uppercases() {
        let normalizer = Normalizer::dutch();

        assert_eq!(normalizer.normalize("appel").as_deref(), Some("APPEL"));
        assert_eq!(normalizer.normalize("Appel").as_deref(), Some("APPEL"));
    }

    #[test]
    fn test_rejects_non_alphabetic() {
        let normalizer = Normalizer::dutch();

        assert_eq!(normalizer.normalize(""), None);
        assert_eq!(normalizer.normalize("   "), None);
        assert_eq!(normalizer.normalize("a.s.a.p."), None);
        assert_eq!(normalizer.normalize("4x4"), None);
        assert_eq!(normalizer.normalize("'s-Hertogenbosch"), None);
        assert_eq!(normalizer.normalize("ad hoc"), None);
    }

    #[test]
    fn test_strips_surrounding_whitespace() {
        let normalizer = Normalizer::dutch();

        assert_eq!(normalizer.normalize("  kaas\t").as_deref(), Some("KAAS"));
        assert_eq!(normalizer.normalize("kaas\r").as_deref(), Some("KAAS"));
    }

    #[test]
    fn test_folds_every_ij() {
        let normalizer = Normalizer::dutch();

        assert_eq!(normalizer.normalize("ijsvrij").as_deref(), Some("ĲSVRĲ"));
        assert_eq!(normalizer.normalize("IJSSEL").as_deref(), Some("ĲSSEL"));
        assert_eq!(normalizer.normalize("bijzijn").as_deref(), Some("BĲZĲN"));
    }

    #[test]
    fn test_accented_letters_are_alphabetic() {
        let normalizer = Normalizer::dutch();

        assert_eq!(normalizer.normalize("café").as_deref(), Some("CAFÉ"));
        assert_eq!(normalizer.normalize("ĳs").as_deref(), Some("ĲS"));
    }

    #[test]
    fn test_fold_without_digraph_is_identity() {
        assert_eq!(fold_digraphs("APPEL"), "APPEL");
        assert_eq!(fold_digraphs("JI"), "JI");
        assert_eq!(fold_digraphs("IIJ"), "IĲ");
    }

    #[test]
    fn test_canonical_len_counts_ligature_once() {
        assert_eq!(canonical_len("APPEL"), 5);
        assert_eq!(canonical_len("ĲSVRĲ"), 5);
        assert_eq!(canonical_len(&fold_digraphs("IJSVRIJ")), 5);
    }
}
