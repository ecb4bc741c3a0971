// File: reelguard-core/src/filter.rs
//! The content filter facade: prohibited-content detection, identifier
//! validation and display-time masking.
//!
//! Every operation here is synchronous, deterministic and total. Nothing is
//! logged and nothing fails: absent or empty input has a defined answer. A
//! `ContentFilter` holds no mutable state, so one instance can be shared
//! freely across threads.
//!
//! License: MIT OR APACHE 2.0

use std::borrow::Cow;
use std::fmt;
use std::ops::Range;

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::WordLists;
use crate::matcher::{MatchKind, TermMatcher, MIN_TOKEN_CHARS};

/// Characters allowed in an identifier.
static IDENTIFIER_ALPHABET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9_.-]+$").expect("identifier pattern is valid")
});

/// The process-wide filter built from the embedded word lists.
static SHARED_FILTER: Lazy<ContentFilter> = Lazy::new(|| {
    ContentFilter::with_default_lists().expect("embedded word lists are valid")
});

/// The character written over masked letters.
pub const MASK_CHAR: char = '*';

/// A flagged token and where it sits in the scanned text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProhibitedToken {
    /// The token exactly as it appeared in the input.
    pub token: String,
    /// Byte offset of the token's first character.
    pub start: usize,
    /// Byte offset one past the token's last character.
    pub end: usize,
    /// Which matching path flagged the token.
    pub kind: MatchKind,
}

/// The first gate an identifier failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierRejection {
    /// Absent, empty, or fewer than three characters.
    TooShort,
    /// Flagged by the content filter.
    InappropriateContent,
    /// Contains a character outside `[A-Za-z0-9_.-]`.
    InvalidCharacters,
}

impl fmt::Display for IdentifierRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            IdentifierRejection::TooShort => "too short",
            IdentifierRejection::InappropriateContent => "inappropriate content",
            IdentifierRejection::InvalidCharacters => "invalid characters",
        };
        f.write_str(reason)
    }
}

/// A piece of text that is either one whitespace run or one token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Piece<'a> {
    text: &'a str,
    start: usize,
    is_whitespace: bool,
}

/// Splits `text` into alternating token and whitespace pieces.
///
/// Concatenating the pieces in order reproduces `text` exactly.
fn split_pieces(text: &str) -> impl Iterator<Item = Piece<'_>> {
    let mut rest = text;
    let mut offset = 0usize;

    std::iter::from_fn(move || {
        let first = rest.chars().next()?;
        let is_whitespace = first.is_whitespace();
        let len = rest
            .char_indices()
            .find(|(_, c)| c.is_whitespace() != is_whitespace)
            .map_or(rest.len(), |(i, _)| i);

        let piece = Piece { text: &rest[..len], start: offset, is_whitespace };
        rest = &rest[len..];
        offset += len;
        Some(piece)
    })
}

/// A stretch of text the matcher judges as one token.
///
/// Usually a single token piece. Two or more consecutive one-character
/// tokens ("f u c k") form a single spelled-out candidate whose letters are
/// joined before matching, provided at least one of them is a letter: a
/// sequence of lone digits or symbols ("8 0 0 8") is a list of numbers, not a
/// word.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Candidate<'a> {
    /// Index of the first and last piece covered, whitespace included.
    first: usize,
    last: usize,
    joined: Cow<'a, str>,
}

fn is_single_char(text: &str) -> bool {
    let mut chars = text.chars();
    chars.next().is_some() && chars.next().is_none()
}

fn has_letter(text: &str) -> bool {
    text.chars().any(char::is_alphabetic)
}

fn candidates<'a>(pieces: &[Piece<'a>]) -> Vec<Candidate<'a>> {
    let mut out = Vec::new();
    let mut spelled: Vec<usize> = Vec::new();

    let flush = |spelled: &mut Vec<usize>, out: &mut Vec<Candidate<'a>>| {
        match spelled.as_slice() {
            [first, .., last] if spelled.iter().any(|&i| has_letter(pieces[i].text)) => {
                out.push(Candidate {
                    first: *first,
                    last: *last,
                    joined: Cow::Owned(spelled.iter().map(|&i| pieces[i].text).collect()),
                })
            }
            singles => out.extend(singles.iter().map(|&i| Candidate {
                first: i,
                last: i,
                joined: Cow::Borrowed(pieces[i].text),
            })),
        }
        spelled.clear();
    };

    for (index, piece) in pieces.iter().enumerate() {
        if piece.is_whitespace {
            continue;
        }
        if is_single_char(piece.text) {
            spelled.push(index);
            continue;
        }
        flush(&mut spelled, &mut out);
        out.push(Candidate { first: index, last: index, joined: Cow::Borrowed(piece.text) });
    }
    flush(&mut spelled, &mut out);
    out
}

/// Masks a flagged token, keeping its first and last character.
///
/// Tokens of one or two characters are masked entirely. The result always
/// has the same number of characters as `token`.
pub fn mask_token(token: &str) -> String {
    let count = token.chars().count();
    if count <= 2 {
        return MASK_CHAR.to_string().repeat(count);
    }
    token
        .chars()
        .enumerate()
        .map(|(i, c)| if i == 0 || i == count - 1 { c } else { MASK_CHAR })
        .collect()
}

/// Screens user-generated text against a compiled set of word lists.
#[derive(Debug)]
pub struct ContentFilter {
    matcher: TermMatcher,
}

impl ContentFilter {
    /// Builds a filter from custom word lists.
    pub fn new(lists: &WordLists) -> Result<Self> {
        let matcher = TermMatcher::new(lists).context("Failed to build content filter")?;
        Ok(Self { matcher })
    }

    /// Builds a fresh filter from the embedded word lists.
    pub fn with_default_lists() -> Result<Self> {
        Self::new(&WordLists::load_default()?)
    }

    /// The process-wide filter over the embedded word lists, built on first use.
    pub fn shared() -> &'static ContentFilter {
        &SHARED_FILTER
    }

    /// The compiled matcher behind this filter.
    pub fn matcher(&self) -> &TermMatcher {
        &self.matcher
    }

    /// Returns `true` if any whitespace-separated token of `text` is prohibited.
    ///
    /// A spelled-out run of single characters counts as one token. `None` and
    /// `""` contain nothing.
    pub fn contains_prohibited_content<'a>(&self, text: impl Into<Option<&'a str>>) -> bool {
        match text.into() {
            Some(text) => {
                let pieces: Vec<Piece<'_>> = split_pieces(text).collect();
                candidates(&pieces)
                    .iter()
                    .any(|candidate| self.matcher.is_prohibited(&candidate.joined))
            }
            None => false,
        }
    }

    /// Checks `name` against every identifier gate and reports the first failure.
    ///
    /// Gates: at least three characters, no prohibited content, only
    /// `[A-Za-z0-9_.-]`.
    pub fn validate_identifier<'a>(
        &self,
        name: impl Into<Option<&'a str>>,
    ) -> Result<(), IdentifierRejection> {
        let name = name.into().unwrap_or_default();
        if name.chars().count() < MIN_TOKEN_CHARS {
            return Err(IdentifierRejection::TooShort);
        }
        if self.contains_prohibited_content(name) {
            return Err(IdentifierRejection::InappropriateContent);
        }
        if !IDENTIFIER_ALPHABET.is_match(name) {
            return Err(IdentifierRejection::InvalidCharacters);
        }
        Ok(())
    }

    /// Returns `true` when `name` passes every identifier gate.
    pub fn is_valid_identifier<'a>(&self, name: impl Into<Option<&'a str>>) -> bool {
        self.validate_identifier(name).is_ok()
    }

    /// Every flagged candidate in `pieces`. Flagged spelled-out runs are
    /// narrowed to the letters that spell prohibited words.
    fn flagged<'a>(&self, pieces: &[Piece<'a>]) -> Vec<(Candidate<'a>, MatchKind)> {
        let mut out = Vec::new();
        for candidate in candidates(pieces) {
            if candidate.first == candidate.last {
                if let Some(kind) = self.matcher.classify(&candidate.joined) {
                    out.push((candidate, kind));
                }
            } else {
                self.narrow_spelled(pieces, &candidate, &mut out);
            }
        }
        out
    }

    /// Splits a spelled-out run into its smallest flagged windows of letters,
    /// left to right.
    ///
    /// A window is only searched for in a stretch of the run that is flagged
    /// as a whole, so letters that together spell an exception stay clean.
    fn narrow_spelled<'a>(
        &self,
        pieces: &[Piece<'a>],
        run: &Candidate<'a>,
        out: &mut Vec<(Candidate<'a>, MatchKind)>,
    ) {
        // Token and whitespace pieces alternate, so letter `i` of the run is
        // piece `run.first + 2 * i`.
        let letters: Vec<&str> = (run.first..=run.last).step_by(2).map(|i| pieces[i].text).collect();
        let mut from = 0;

        while from < letters.len() {
            let rest = &letters[from..];
            if !self.matcher.is_prohibited(&rest.concat()) {
                break;
            }
            let Some((window, joined, kind)) = self.smallest_flagged_window(rest) else {
                break;
            };
            out.push((
                Candidate {
                    first: run.first + 2 * (from + window.start),
                    last: run.first + 2 * (from + window.end - 1),
                    joined: Cow::Owned(joined),
                },
                kind,
            ));
            from += window.end;
        }
    }

    /// The shortest, then leftmost, window of `letters` the matcher flags.
    fn smallest_flagged_window(&self, letters: &[&str]) -> Option<(Range<usize>, String, MatchKind)> {
        (MIN_TOKEN_CHARS..=letters.len()).find_map(|width| {
            (0..=letters.len() - width).find_map(|start| {
                let joined = letters[start..start + width].concat();
                let kind = self.matcher.classify(&joined)?;
                Some((start..start + width, joined, kind))
            })
        })
    }

    /// Masks every prohibited token in `text`, leaving layout untouched.
    ///
    /// Whitespace is reproduced exactly and the output has the same number
    /// of characters as the input. A flagged spelled-out word keeps its first
    /// and last letter; neighbouring single letters that are not part of it
    /// are left alone. Borrows `text` when nothing was masked.
    pub fn mask_prohibited_content<'a>(&self, text: &'a str) -> Cow<'a, str> {
        let pieces: Vec<Piece<'a>> = split_pieces(text).collect();
        let flagged = self.flagged(&pieces);

        if flagged.is_empty() {
            return Cow::Borrowed(text);
        }

        let mut replacements: Vec<Option<String>> = vec![None; pieces.len()];
        for (candidate, _) in &flagged {
            let masked_run = mask_token(&candidate.joined);
            let mut letters = masked_run.chars();
            for index in candidate.first..=candidate.last {
                let piece = &pieces[index];
                if piece.is_whitespace {
                    continue;
                }
                let width = piece.text.chars().count();
                replacements[index] = Some(letters.by_ref().take(width).collect());
            }
        }

        let mut masked = String::with_capacity(text.len());
        for (piece, replacement) in pieces.iter().zip(&replacements) {
            masked.push_str(replacement.as_deref().unwrap_or(piece.text));
        }
        Cow::Owned(masked)
    }

    /// Lists every prohibited token in `text` with its byte span.
    ///
    /// A flagged spelled-out word is reported once, spanning its letters and
    /// the whitespace between them.
    pub fn find_prohibited_tokens(&self, text: &str) -> Vec<ProhibitedToken> {
        let pieces: Vec<Piece<'_>> = split_pieces(text).collect();
        self.flagged(&pieces)
            .into_iter()
            .map(|(candidate, kind)| {
                let start = pieces[candidate.first].start;
                let last = &pieces[candidate.last];
                let end = last.start + last.text.len();
                ProhibitedToken {
                    token: text[start..end].to_string(),
                    start,
                    end,
                    kind,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter() -> &'static ContentFilter {
        ContentFilter::shared()
    }

    #[test]
    fn test_pieces_reassemble_input() {
        let text = "  shit\thappens \n\n  here";
        let joined: String = split_pieces(text).map(|p| p.text).collect();
        assert_eq!(joined, text);

        let kinds: Vec<bool> = split_pieces(text).map(|p| p.is_whitespace).collect();
        assert_eq!(kinds, vec![true, false, true, false, true, false]);
    }

    #[test]
    fn test_pieces_track_byte_offsets() {
        let offsets: Vec<(usize, &str)> = split_pieces("é ab").map(|p| (p.start, p.text)).collect();
        assert_eq!(offsets, vec![(0, "é"), (2, " "), (3, "ab")]);
        assert_eq!(split_pieces("").count(), 0);
    }

    #[test]
    fn test_mask_token_shapes() {
        assert_eq!(mask_token("shit"), "s**t");
        assert_eq!(mask_token("fuuuuuck"), "f******k");
        assert_eq!(mask_token("ab"), "**");
        assert_eq!(mask_token("a"), "*");
        assert_eq!(mask_token("shít"), "s**t");
    }

    #[test]
    fn test_contains_prohibited_content_handles_absent_input() {
        assert!(!filter().contains_prohibited_content(None));
        assert!(!filter().contains_prohibited_content(""));
        assert!(!filter().contains_prohibited_content("   \n "));
    }

    #[test]
    fn test_contains_prohibited_content_any_token() {
        assert!(filter().contains_prohibited_content("what a load of shit"));
        assert!(!filter().contains_prohibited_content("what a lovely classic film"));
    }

    #[test]
    fn test_candidates_join_spelled_out_letters() {
        let spelled: Vec<Piece<'_>> = split_pieces("so f u c k this").collect();
        let joined: Vec<String> = candidates(&spelled).iter().map(|c| c.joined.to_string()).collect();
        assert_eq!(joined, vec!["so", "fuck", "this"]);

        let mixed: Vec<Piece<'_>> = split_pieces("a bc d").collect();
        let joined: Vec<String> = candidates(&mixed).iter().map(|c| c.joined.to_string()).collect();
        assert_eq!(joined, vec!["a", "bc", "d"]);
    }

    #[test]
    fn test_candidates_keep_lone_digits_apart() {
        let numbers: Vec<Piece<'_>> = split_pieces("rated 8 0 0 8").collect();
        let joined: Vec<String> = candidates(&numbers).iter().map(|c| c.joined.to_string()).collect();
        assert_eq!(joined, vec!["rated", "8", "0", "0", "8"]);
    }

    #[test]
    fn test_spelled_out_digits_are_not_words() {
        assert!(!filter().contains_prohibited_content("rated 8 0 0 8"));
        assert!(!filter().contains_prohibited_content("scores of 4 5 5 and 5 8 1 7"));
        assert_eq!(filter().mask_prohibited_content("rated 8 0 0 8"), "rated 8 0 0 8");
    }

    #[test]
    fn test_spelled_out_word_is_flagged() {
        assert!(filter().contains_prohibited_content("f u c k"));
        assert!(filter().contains_prohibited_content("well  S H 1 T  then"));
        assert!(!filter().contains_prohibited_content("a b c"));
    }

    #[test]
    fn test_mask_spelled_out_word() {
        assert_eq!(filter().mask_prohibited_content("oh f u c k off"), "oh f * * k off");
        assert_eq!(filter().mask_prohibited_content("x  s\th i t"), "x  s\t* * t");
    }

    #[test]
    fn test_spelled_out_word_is_narrowed_to_its_letters() {
        assert_eq!(
            filter().mask_prohibited_content("i f u c k y"),
            "i f * * k y"
        );
        let found = filter().find_prohibited_tokens("i f u c k y");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].token, "f u c k");
        assert_eq!((found[0].start, found[0].end), (2, 9));
    }

    #[test]
    fn test_spelled_out_run_with_two_words() {
        assert_eq!(
            filter().mask_prohibited_content("f u c k s h i t"),
            "f * * k s * * t"
        );
        assert_eq!(filter().find_prohibited_tokens("f u c k s h i t").len(), 2);
    }

    #[test]
    fn test_spelled_out_exception_stays_clean() {
        assert!(!filter().contains_prohibited_content("a s s e s s"));
        assert_eq!(filter().mask_prohibited_content("a s s e s s"), "a s s e s s");
    }

    #[test]
    fn test_find_spelled_out_word_span() {
        let found = filter().find_prohibited_tokens("so f u c k this");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].token, "f u c k");
        assert_eq!((found[0].start, found[0].end), (3, 10));
    }

    #[test]
    fn test_validate_identifier_gates_in_order() {
        assert_eq!(filter().validate_identifier("cool_user99"), Ok(()));
        assert_eq!(filter().validate_identifier(None), Err(IdentifierRejection::TooShort));
        assert_eq!(filter().validate_identifier("ab"), Err(IdentifierRejection::TooShort));
        assert_eq!(
            filter().validate_identifier("fuckuser"),
            Err(IdentifierRejection::InappropriateContent)
        );
        assert_eq!(
            filter().validate_identifier("user name"),
            Err(IdentifierRejection::InvalidCharacters)
        );
        assert_eq!(
            filter().validate_identifier("shit happens"),
            Err(IdentifierRejection::InappropriateContent)
        );
    }

    #[test]
    fn test_mask_borrows_clean_text() {
        let text = "a perfectly fine review";
        assert!(matches!(filter().mask_prohibited_content(text), Cow::Borrowed(_)));
    }

    #[test]
    fn test_mask_preserves_layout() {
        let text = "shit  happens\n\tand FUUUCK\r\nthat";
        let masked = filter().mask_prohibited_content(text);
        assert_eq!(masked, "s**t  happens\n\tand F****K\r\nthat");
        assert_eq!(masked.chars().count(), text.chars().count());
    }

    #[test]
    fn test_find_prohibited_tokens_reports_spans() {
        let text = "Sh1t, that ending was bullshitting us.";
        let found = filter().find_prohibited_tokens(text);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].token, "Sh1t,");
        assert_eq!((found[0].start, found[0].end), (0, 5));
        assert_eq!(found[0].kind, MatchKind::Exact);
        assert_eq!(found[1].token, "bullshitting");
        assert_eq!(&text[found[1].start..found[1].end], "bullshitting");
        assert_eq!(found[1].kind, MatchKind::Embedded);
    }

    #[test]
    fn test_custom_word_lists() {
        let lists = WordLists {
            prohibited: vec!["spoiler".to_string()],
            exceptions: vec!["spoilerfree".to_string()],
        };
        let filter = ContentFilter::new(&lists).unwrap();
        assert!(filter.contains_prohibited_content("big SP0ILER ahead"));
        assert!(!filter.contains_prohibited_content("a spoilerfree take"));
        assert!(!filter.contains_prohibited_content("shit"));
    }
}
