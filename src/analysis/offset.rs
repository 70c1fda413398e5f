//! Offset repair.
//!
//! Engines report token positions and lengths in UTF-16 code units, where a
//! codepoint above U+FFFF occupies two units. Callers index text by
//! codepoint, so every token is corrected by the number of such wide
//! characters that precede it and that it contains.
//!
//! The running counter of wide characters restarts for every candidate: it
//! only ever covers the tokens of one interpretation of one text.

use crate::analysis::token::{Candidate, RawCandidate, RawToken, Token};
use crate::engine::MorphEngine;

/// Count the codepoints of `form` that take two UTF-16 code units.
pub fn count_wide_chars(form: &str) -> usize {
    form.chars().filter(|c| c.len_utf16() == 2).count()
}

/// Convert a UTF-16 based `(position, length)` pair into codepoint units.
///
/// `wide_before` is the number of wide characters seen before the token in
/// the current candidate, `wide_within` the number inside the token.
pub fn repair_offsets(
    position: u32,
    length: u32,
    wide_before: usize,
    wide_within: usize,
) -> (u32, u32) {
    (
        position.saturating_sub(wide_before as u32),
        length.saturating_sub(wide_within as u32),
    )
}

/// Repair the offsets of one candidate's tokens and resolve their ids.
pub fn marshal_tokens<E: MorphEngine + ?Sized>(raw: Vec<RawToken>, engine: &E) -> Vec<Token> {
    let mut wide_offset = 0usize;
    let mut tokens = Vec::with_capacity(raw.len());

    for token in raw {
        let wide_chars = count_wide_chars(&token.form);
        let (start, len) = repair_offsets(token.position, token.length, wide_offset, wide_chars);
        let id = engine.morph_to_id(token.morph);

        tokens.push(Token {
            form: token.form,
            tag: token.tag,
            start,
            len,
            id,
        });
        wide_offset += wide_chars;
    }

    tokens
}

/// Keep the `top_n` best candidates and marshal each of them.
///
/// Candidates are expected best first, as engines return them.
pub fn marshal_result<E: MorphEngine + ?Sized>(
    mut candidates: Vec<RawCandidate>,
    top_n: usize,
    engine: &E,
) -> Vec<Candidate> {
    candidates.truncate(top_n);
    candidates
        .into_iter()
        .map(|c| Candidate {
            tokens: marshal_tokens(c.tokens, engine),
            score: c.score,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_wide_chars() {
        assert_eq!(count_wide_chars("감기약"), 0);
        assert_eq!(count_wide_chars("😀"), 1);
        assert_eq!(count_wide_chars("a😀b𝄞"), 2);
        assert_eq!(count_wide_chars(""), 0);
    }

    #[test]
    fn test_repair_offsets() {
        // Two emoji before the token, none inside.
        assert_eq!(repair_offsets(6, 3, 2, 0), (4, 3));
        // A token made of one emoji.
        assert_eq!(repair_offsets(0, 2, 0, 1), (0, 1));
        assert_eq!(repair_offsets(3, 1, 0, 0), (3, 1));
    }
}
