// File: reelguard-core/src/normalizer.rs
//! Canonicalizes raw text into the dense lowercase form the term matcher compares.
//!
//! Normalization defeats the common ways users dress up a prohibited word:
//! capitals, accents, leet-speak substitutions, stretched letters, spacing
//! and punctuation. It is a pure function of its input with no locale or
//! global state involved.
//!
//! License: MIT OR APACHE 2.0

use unicode_normalization::UnicodeNormalization;

/// Leet-speak and symbol substitutions, in application order.
///
/// Every target is an ASCII letter and no source is a letter, so one rule can
/// never produce input for another. Mapping each character once, left to
/// right, is therefore equivalent to applying the rules one after another in
/// this order.
pub const SUBSTITUTIONS: [(char, char); 19] = [
    ('0', 'o'),
    ('1', 'i'),
    ('2', 'z'),
    ('3', 'e'),
    ('4', 'a'),
    ('5', 's'),
    ('6', 'b'),
    ('7', 't'),
    ('8', 'b'),
    ('9', 'g'),
    ('@', 'a'),
    ('$', 's'),
    ('*', 'i'),
    ('!', 'i'),
    ('+', 't'),
    ('(', 'c'),
    (')', 'o'),
    ('#', 'h'),
    ('%', 'x'),
];

/// Longest run of one repeated character kept by normalization.
pub const MAX_REPEAT: usize = 2;

/// Returns the letter `c` impersonates, or `c` itself when it is not mapped.
pub fn substitute(c: char) -> char {
    SUBSTITUTIONS
        .iter()
        .find(|(from, _)| *from == c)
        .map_or(c, |(_, to)| *to)
}

/// Combining diacritical marks dropped after NFD decomposition.
fn is_combining_diacritic(c: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&c)
}

/// Caps every run of identical consecutive characters at [`MAX_REPEAT`].
fn collapse_repeats<I: IntoIterator<Item = char>>(chars: I) -> String {
    let mut out = String::new();
    let mut last: Option<char> = None;
    let mut run = 0usize;

    for c in chars {
        if last == Some(c) {
            run += 1;
        } else {
            last = Some(c);
            run = 1;
        }
        if run <= MAX_REPEAT {
            out.push(c);
        }
    }
    out
}

/// Normalizes `text` for comparison against the word lists.
///
/// Steps, in order:
///
/// 1. lowercase
/// 2. NFD-decompose and drop combining marks (U+0300..=U+036F)
/// 3. apply [`SUBSTITUTIONS`]
/// 4. cap repeated characters at two (`fuuuuck` -> `fuuck`, `assess` unchanged)
/// 5. remove whitespace
/// 6. keep only `[a-z0-9]`
///
/// Removing separators in steps 5 and 6 can join two capped runs, so the cap
/// is applied once more at the end. That keeps `normalize` idempotent.
///
/// Empty input yields an empty string.
pub fn normalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let lowered = text.to_lowercase();
    let capped = collapse_repeats(canonical_chars(&lowered));
    collapse_repeats(capped.chars().filter(is_dense))
}

/// [`normalize`] without either repeat cap: `fuuuuuck` stays `fuuuuuck`.
///
/// The term matcher reads run lengths from this form to tell a stretched
/// letter from a legitimately doubled one.
pub(crate) fn normalize_uncapped(text: &str) -> String {
    let lowered = text.to_lowercase();
    canonical_chars(&lowered).filter(is_dense).collect()
}

/// Steps 2 and 3 over already lowercased text.
fn canonical_chars(lowered: &str) -> impl Iterator<Item = char> + '_ {
    lowered
        .nfd()
        .filter(|c| !is_combining_diacritic(*c))
        .map(substitute)
}

/// Steps 5 and 6.
fn is_dense(c: &char) -> bool {
    !c.is_whitespace() && (c.is_ascii_lowercase() || c.is_ascii_digit())
}
