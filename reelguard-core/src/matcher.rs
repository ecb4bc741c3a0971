// File: reelguard-core/src/matcher.rs
//! Decides whether a single whitespace-delimited token is prohibited.
//!
//! Word lists are normalized and deduplicated once, when the matcher is
//! built. A token is then checked on two paths:
//!
//! * whole token: the normalized token is a prohibited term. Letters the
//!   user stretched past the normalizer's repeat cap also stand for a single
//!   letter here, so `fuuuuuck` (`fuuck` once normalized) is the term `fuck`.
//!   A letter doubled in the input is taken as written: `aass` is not `ass`.
//! * embedded: the normalized token contains a prohibited term of four or
//!   more characters as a plain substring.
//!
//! Exceptions are compared literally on the normalized token on both paths,
//! without any stretch tolerance. Embedded terms and exceptions are compiled
//! into double-array Aho-Corasick automata, so each embedded check is one
//! scan of the normalized token.
//!
//! License: MIT OR APACHE 2.0

use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;

use anyhow::{Context, Result};
use daachorse::DoubleArrayAhoCorasick;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::WordLists;
use crate::errors::ReelguardError;
use crate::normalizer::{normalize, normalize_uncapped, MAX_REPEAT};

/// Tokens with fewer raw characters than this are never prohibited.
pub const MIN_TOKEN_CHARS: usize = 3;

/// Normalized terms at least this long are also matched when embedded in a token.
/// Shorter terms only match the whole token.
pub const MIN_EMBEDDED_TERM_LEN: usize = 4;

/// How a prohibited token was recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// The normalized token is a prohibited term, possibly stretched.
    Exact,
    /// The normalized token contains a prohibited term of length >= 4.
    Embedded,
}

/// Run-length shape of a string: one character per run plus the run lengths.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Runs {
    skeleton: String,
    counts: Vec<usize>,
}

impl Runs {
    fn of(text: &str) -> Self {
        let mut skeleton = String::with_capacity(text.len());
        let mut counts: Vec<usize> = Vec::with_capacity(text.len());
        let mut last = None;

        for c in text.chars() {
            if last == Some(c) {
                if let Some(count) = counts.last_mut() {
                    *count += 1;
                }
            } else {
                skeleton.push(c);
                counts.push(1);
                last = Some(c);
            }
        }
        Self { skeleton, counts }
    }
}

/// `true` when the uncapped token runs spell the term runs, aligned run by run.
///
/// A run must have exactly the term's length unless it was stretched past
/// [`MAX_REPEAT`], in which case it stands for any run the term has.
fn spells(term: &[usize], token: &[usize]) -> bool {
    term.len() == token.len()
        && term
            .iter()
            .zip(token)
            .all(|(&need, &have)| have == need || have > MAX_REPEAT)
}

/// Whole-token comparison against the prohibited terms.
///
/// Terms are grouped by skeleton; `boob` and `bob` share the group `bob`.
struct WholeTerms {
    shapes: HashMap<String, Vec<Vec<usize>>>,
}

impl WholeTerms {
    fn build(terms: &BTreeSet<String>) -> Self {
        let mut shapes: HashMap<String, Vec<Vec<usize>>> = HashMap::new();
        for term in terms {
            let runs = Runs::of(term);
            shapes.entry(runs.skeleton).or_default().push(runs.counts);
        }
        Self { shapes }
    }

    /// `uncapped` is the token as returned by `normalize_uncapped`.
    fn matches(&self, uncapped: &Runs) -> bool {
        self.shapes
            .get(&uncapped.skeleton)
            .is_some_and(|group| group.iter().any(|counts| spells(counts, &uncapped.counts)))
    }
}

/// Plain substring search for a keyword list.
///
/// `daachorse` refuses to build an automaton from zero patterns, so an empty
/// list keeps no automaton and never matches.
struct Substrings {
    automaton: Option<DoubleArrayAhoCorasick<u32>>,
}

impl Substrings {
    fn build(label: &'static str, keywords: &BTreeSet<String>) -> Result<Self, ReelguardError> {
        if keywords.is_empty() {
            return Ok(Self { automaton: None });
        }
        let automaton = DoubleArrayAhoCorasick::new(keywords)
            .map_err(|e| ReelguardError::Automaton(label, e.to_string()))?;
        Ok(Self { automaton: Some(automaton) })
    }

    fn found_in(&self, normalized: &str) -> bool {
        self.automaton
            .as_ref()
            .is_some_and(|automaton| automaton.find_iter(normalized).next().is_some())
    }
}

/// Compiled form of [`WordLists`], ready to classify tokens.
pub struct TermMatcher {
    term_count: usize,
    exception_count: usize,
    whole_terms: WholeTerms,
    whole_exceptions: HashSet<String>,
    embedded_terms: Substrings,
    embedded_exceptions: Substrings,
}

impl fmt::Debug for TermMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TermMatcher")
            .field("term_count", &self.term_count)
            .field("exception_count", &self.exception_count)
            .field("embedded_terms", &"<DoubleArrayAhoCorasick>")
            .field("embedded_exceptions", &"<DoubleArrayAhoCorasick>")
            .finish()
    }
}

impl TermMatcher {
    /// Normalizes, deduplicates and compiles the given word lists.
    pub fn new(lists: &WordLists) -> Result<Self> {
        lists.validate().context("Invalid word lists")?;

        let terms: BTreeSet<String> = lists.prohibited.iter().map(|t| normalize(t)).collect();
        let exceptions: BTreeSet<String> = lists.exceptions.iter().map(|e| normalize(e)).collect();

        let long_terms: BTreeSet<String> = terms
            .iter()
            .filter(|t| t.len() >= MIN_EMBEDDED_TERM_LEN)
            .cloned()
            .collect();

        let embedded_terms = Substrings::build("prohibited", &long_terms)
            .context("Failed to compile prohibited terms")?;
        let embedded_exceptions = Substrings::build("exceptions", &exceptions)
            .context("Failed to compile exceptions")?;

        debug!(
            "TermMatcher compiled: {} distinct terms ({} embeddable), {} distinct exceptions.",
            terms.len(),
            long_terms.len(),
            exceptions.len()
        );

        Ok(Self {
            term_count: terms.len(),
            exception_count: exceptions.len(),
            whole_terms: WholeTerms::build(&terms),
            whole_exceptions: exceptions.iter().cloned().collect(),
            embedded_terms,
            embedded_exceptions,
        })
    }

    /// Classifies a raw, unnormalized token.
    ///
    /// The whole-token path decides first. A token that is a prohibited term
    /// is prohibited unless its normalized form equals an exception, and that
    /// verdict is final either way. Every other token goes through the
    /// embedded path, where any exception contained in the normalized token
    /// suppresses every embedded term.
    pub fn classify(&self, token: &str) -> Option<MatchKind> {
        if token.chars().count() < MIN_TOKEN_CHARS {
            return None;
        }

        let normalized = normalize(token);

        if self.whole_terms.matches(&Runs::of(&normalize_uncapped(token))) {
            return if self.whole_exceptions.contains(&normalized) {
                None
            } else {
                Some(MatchKind::Exact)
            };
        }

        if self.embedded_terms.found_in(&normalized) && !self.embedded_exceptions.found_in(&normalized) {
            Some(MatchKind::Embedded)
        } else {
            None
        }
    }

    /// Returns `true` when `token` is prohibited.
    pub fn is_prohibited(&self, token: &str) -> bool {
        self.classify(token).is_some()
    }

    /// Number of distinct normalized prohibited terms.
    pub fn term_count(&self) -> usize {
        self.term_count
    }

    /// Number of distinct normalized exceptions.
    pub fn exception_count(&self) -> usize {
        self.exception_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lists(prohibited: &[&str], exceptions: &[&str]) -> WordLists {
        WordLists {
            prohibited: prohibited.iter().map(|s| s.to_string()).collect(),
            exceptions: exceptions.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn default_matcher() -> TermMatcher {
        TermMatcher::new(&WordLists::load_default().unwrap()).unwrap()
    }

    #[test]
    fn test_runs_of() {
        let runs = Runs::of("fuuck");
        assert_eq!(runs.skeleton, "fuck");
        assert_eq!(runs.counts, vec![1, 2, 1, 1]);
        assert_eq!(Runs::of(""), Runs { skeleton: String::new(), counts: vec![] });
    }

    #[test]
    fn test_spells() {
        assert!(spells(&[1, 1, 1, 1], &[1, 6, 1, 1]));
        assert!(spells(&[1, 2], &[1, 3]));
        assert!(spells(&[1, 2], &[1, 2]));
        assert!(!spells(&[1, 2], &[2, 2]));
        assert!(!spells(&[1, 2, 1], &[1, 1, 1]));
        assert!(!spells(&[1, 1], &[1, 1, 1]));
    }

    #[test]
    fn test_short_tokens_are_never_prohibited() {
        let matcher = TermMatcher::new(&lists(&["ok"], &[])).unwrap();
        assert_eq!(matcher.classify("ok"), None);
        assert_eq!(matcher.classify("OK"), None);
    }

    #[test]
    fn test_short_gate_counts_characters_not_bytes() {
        // three characters, six bytes
        let matcher = TermMatcher::new(&lists(&["eee"], &[])).unwrap();
        assert_eq!(matcher.classify("éèê"), Some(MatchKind::Exact));
    }

    #[test]
    fn test_exact_match_through_obfuscation() {
        let matcher = default_matcher();
        for token in ["shit", "SHIT", "Sh1t", "sh!t", "$hit", "shít"] {
            assert_eq!(matcher.classify(token), Some(MatchKind::Exact), "token {:?}", token);
        }
    }

    #[test]
    fn test_short_terms_never_match_embedded() {
        let matcher = default_matcher();
        // "ass", "tit" and "cum" are three letters long
        assert_eq!(matcher.classify("classy"), None);
        assert_eq!(matcher.classify("title"), None);
        assert_eq!(matcher.classify("cucumber"), None);
    }

    #[test]
    fn test_long_terms_match_embedded() {
        let matcher = default_matcher();
        assert_eq!(matcher.classify("fuckuser"), Some(MatchKind::Embedded));
        assert_eq!(matcher.classify("bullshitter"), Some(MatchKind::Embedded));
    }

    #[test]
    fn test_stretched_letters_match() {
        let matcher = default_matcher();
        assert_eq!(matcher.classify("fuuuuuck"), Some(MatchKind::Exact));
        assert_eq!(matcher.classify("shiiiiit"), Some(MatchKind::Exact));
        assert_eq!(matcher.classify("asssss"), Some(MatchKind::Exact));
        assert_eq!(matcher.classify("FUUUCK"), Some(MatchKind::Exact));
    }

    #[test]
    fn test_doubled_letter_is_not_a_stretch() {
        let matcher = default_matcher();
        assert_eq!(matcher.classify("aass"), None);
        assert_eq!(matcher.classify("shiit"), None);
        assert_eq!(matcher.classify("shiiit"), Some(MatchKind::Exact));
    }

    #[test]
    fn test_embedded_terms_need_a_literal_substring() {
        let matcher = default_matcher();
        assert_eq!(matcher.classify("annals"), None);
        assert_eq!(matcher.classify("annal"), None);
        assert_eq!(matcher.classify("analog"), Some(MatchKind::Embedded));
    }

    #[test]
    fn test_exceptions_are_compared_literally() {
        let matcher = default_matcher();
        assert_eq!(matcher.classify("fuckpaass"), Some(MatchKind::Embedded));
        assert_eq!(matcher.classify("shitcllass"), Some(MatchKind::Embedded));
        assert_eq!(matcher.classify("fuckpass"), None);
    }

    #[test]
    fn test_stretched_exception_does_not_rescue_exact_term() {
        let matcher = TermMatcher::new(&lists(&["heck"], &["heck"])).unwrap();
        assert_eq!(matcher.classify("heck"), None);
        assert_eq!(matcher.classify("heeeck"), Some(MatchKind::Exact));
    }

    #[test]
    fn test_doubled_letters_in_terms_are_required() {
        let matcher = TermMatcher::new(&lists(&["boob"], &[])).unwrap();
        assert!(matcher.is_prohibited("boob"));
        assert!(matcher.is_prohibited("boooobs"));
        assert!(!matcher.is_prohibited("bob"));
        assert!(!matcher.is_prohibited("bobcat"));
    }

    #[test]
    fn test_exceptions_suppress_embedded_matches() {
        let matcher = default_matcher();
        for word in ["cocktail", "Cockerel", "analysis", "shitake", "assess", "classic"] {
            assert!(!matcher.is_prohibited(word), "exception {:?} was flagged", word);
        }
    }

    #[test]
    fn test_exception_anywhere_in_token_suppresses() {
        let matcher = default_matcher();
        assert!(!matcher.is_prohibited("cocktails"));
        assert!(!matcher.is_prohibited("passionfuck"));
    }

    #[test]
    fn test_exact_exception_beats_exact_term() {
        let matcher = TermMatcher::new(&lists(&["heck"], &["heck"])).unwrap();
        assert_eq!(matcher.classify("heck"), None);
    }

    #[test]
    fn test_exact_verdict_is_final() {
        // "heckle" is a term outright, so the embedded path is never consulted
        let matcher = TermMatcher::new(&lists(&["heck", "heckle"], &["heckler"])).unwrap();
        assert_eq!(matcher.classify("heckle"), Some(MatchKind::Exact));
        assert_eq!(matcher.classify("heckler"), None);
        assert_eq!(matcher.classify("hecklers"), None);
        assert_eq!(matcher.classify("hecks"), Some(MatchKind::Embedded));
    }

    #[test]
    fn test_term_after_false_start() {
        // "bob" starts a near miss before "boob" appears
        let matcher = TermMatcher::new(&lists(&["boob"], &[])).unwrap();
        assert!(matcher.is_prohibited("bobooby"));
    }

    #[test]
    fn test_empty_lists_never_match() {
        let matcher = TermMatcher::new(&WordLists::default()).unwrap();
        assert!(!matcher.is_prohibited("anything"));
        assert_eq!(matcher.term_count(), 0);
    }

    #[test]
    fn test_duplicates_collapse_after_normalization() {
        let matcher = TermMatcher::new(&lists(&["fuck", "f u c k", "FUCK"], &[])).unwrap();
        assert_eq!(matcher.term_count(), 1);
        assert!(matcher.is_prohibited("f.u.c.k"));
    }

    #[test]
    fn test_invalid_lists_are_rejected() {
        let err = TermMatcher::new(&lists(&["heck"], &["?-"])).unwrap_err();
        assert!(err.to_string().contains("Invalid word lists"));
    }
}
