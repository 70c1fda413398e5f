//! Token types produced by morphological analysis.
//!
//! Two layers of types live here:
//!
//! - [`RawToken`] / [`RawCandidate`] - what an engine reports. Positions and
//!   lengths are counted in UTF-16 code units and the morpheme is an opaque
//!   engine-internal [`MorphRef`].
//! - [`Token`] / [`Candidate`] - what callers receive. Positions and lengths
//!   are counted in codepoints and the morpheme is a stable public id.
//!
//! The conversion between the two is performed by
//! [`crate::analysis::offset::marshal_result`].
//!
//! # Examples
//!
//! ```
//! use morphkit::analysis::tag::PosTag;
//! use morphkit::analysis::token::Token;
//!
//! let token = Token::new("감기약", PosTag::NNP, 0, 3, 120);
//! assert_eq!(token.end(), 3);
//! assert_eq!(token.to_string(), "Token(form=\"감기약\", tag=NNP, start=0, len=3)");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::analysis::tag::PosTag;

/// Engine-internal handle of a morpheme, resolved to a public id through
/// [`crate::engine::MorphEngine::morph_to_id`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MorphRef(pub usize);

/// A dictionary entry: the surface form and its tag.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Morpheme {
    /// Surface form. Empty for the per-tag placeholder entries used by
    /// unknown words.
    pub form: String,

    /// Part-of-speech tag.
    pub tag: PosTag,
}

impl Morpheme {
    /// Create a new morpheme.
    pub fn new<S: Into<String>>(form: S, tag: PosTag) -> Self {
        Morpheme {
            form: form.into(),
            tag,
        }
    }
}

/// A token as reported by an engine, before offset repair.
#[derive(Clone, Debug, PartialEq)]
pub struct RawToken {
    /// Surface form as it appears in the analysed text
    pub form: String,

    /// Part-of-speech tag
    pub tag: PosTag,

    /// Start position in UTF-16 code units
    pub position: u32,

    /// Length in UTF-16 code units
    pub length: u32,

    /// Engine-internal morpheme handle
    pub morph: MorphRef,
}

/// One interpretation of a text as reported by an engine.
#[derive(Clone, Debug, PartialEq)]
pub struct RawCandidate {
    pub tokens: Vec<RawToken>,
    pub score: f32,
}

/// An analysed morpheme occurrence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Surface form
    pub form: String,

    /// Part-of-speech tag
    pub tag: PosTag,

    /// Start position in codepoints
    pub start: u32,

    /// Length in codepoints
    pub len: u32,

    /// Morpheme id, resolvable through `Analyzer::morpheme`
    pub id: usize,
}

impl Token {
    /// Create a new token.
    pub fn new<S: Into<String>>(form: S, tag: PosTag, start: u32, len: u32, id: usize) -> Self {
        Token {
            form: form.into(),
            tag,
            start,
            len,
            id,
        }
    }

    /// Position one past the last codepoint of the token.
    pub fn end(&self) -> u32 {
        self.start + self.len
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Token(form={:?}, tag={}, start={}, len={})",
            self.form, self.tag, self.start, self.len
        )
    }
}

/// One interpretation of a text: a token sequence and its score.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub tokens: Vec<Token>,
    pub score: f32,
}

/// Ranked candidates for one input text, best first.
pub type AnalysisResult = Vec<Candidate>;

impl Candidate {
    /// Find the first token with the given form.
    pub fn find(&self, form: &str) -> Option<&Token> {
        self.tokens.iter().find(|t| t.form == form)
    }

    /// Render the candidate as `form/TAG` pairs joined by `+`.
    pub fn to_tagged_string(&self) -> String {
        self.tokens
            .iter()
            .map(|t| format!("{}/{}", t.form, t.tag))
            .collect::<Vec<_>>()
            .join(" + ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_end() {
        let token = Token::new("먹", PosTag::VV, 5, 1, 7);
        assert_eq!(token.end(), 6);
        assert_eq!(token.id, 7);
    }

    #[test]
    fn test_candidate_helpers() {
        let candidate = Candidate {
            tokens: vec![
                Token::new("감기약", PosTag::NNP, 0, 3, 50),
                Token::new("을", PosTag::JKO, 3, 1, 51),
            ],
            score: -3.0,
        };

        assert_eq!(candidate.find("을").map(|t| t.tag), Some(PosTag::JKO));
        assert!(candidate.find("를").is_none());
        assert_eq!(candidate.to_tagged_string(), "감기약/NNP + 을/JKO");
    }
}
