//! Part-of-speech tags.
//!
//! The tag set is fixed (Sejong-style Korean tags plus the four special
//! web-entity tags produced by pattern matching). Tag names are parsed
//! case-insensitively; an unknown name is a configuration error.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{MorphkitError, Result};

/// Part-of-speech tag of a morpheme.
#[allow(non_camel_case_types, clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PosTag {
    /// General noun
    NNG,
    /// Proper noun
    NNP,
    /// Bound noun
    NNB,
    /// Numeral
    NR,
    /// Pronoun
    NP,
    /// Verb
    VV,
    /// Adjective
    VA,
    /// Auxiliary predicate
    VX,
    /// Positive copula
    VCP,
    /// Negative copula
    VCN,
    /// Determiner
    MM,
    /// General adverb
    MAG,
    /// Conjunctive adverb
    MAJ,
    /// Interjection
    IC,
    /// Subject case particle
    JKS,
    /// Complement case particle
    JKC,
    /// Genitive case particle
    JKG,
    /// Object case particle
    JKO,
    /// Adverbial case particle
    JKB,
    /// Vocative case particle
    JKV,
    /// Quotative case particle
    JKQ,
    /// Auxiliary particle
    JX,
    /// Conjunctive particle
    JC,
    /// Pre-final ending
    EP,
    /// Final ending
    EF,
    /// Connective ending
    EC,
    /// Nominalizing ending
    ETN,
    /// Adnominalizing ending
    ETM,
    /// Noun prefix
    XPN,
    /// Noun-deriving suffix
    XSN,
    /// Verb-deriving suffix
    XSV,
    /// Adjective-deriving suffix
    XSA,
    /// Root
    XR,
    /// Sentence-final punctuation
    SF,
    /// Separator punctuation
    SP,
    /// Quotes and brackets
    SS,
    /// Ellipsis
    SE,
    /// Dash-like symbols
    SO,
    /// Other symbols
    SW,
    /// Latin letters
    SL,
    /// Chinese characters
    SH,
    /// Digits
    SN,
    /// Unknown
    UN,
    /// URL
    W_URL,
    /// E-mail address
    W_EMAIL,
    /// Hashtag
    W_HASHTAG,
    /// Mention
    W_MENTION,
}

impl PosTag {
    /// Number of tags in the enumeration.
    pub const COUNT: usize = 47;

    /// All tags, in declaration order.
    pub const ALL: [PosTag; PosTag::COUNT] = [
        PosTag::NNG,
        PosTag::NNP,
        PosTag::NNB,
        PosTag::NR,
        PosTag::NP,
        PosTag::VV,
        PosTag::VA,
        PosTag::VX,
        PosTag::VCP,
        PosTag::VCN,
        PosTag::MM,
        PosTag::MAG,
        PosTag::MAJ,
        PosTag::IC,
        PosTag::JKS,
        PosTag::JKC,
        PosTag::JKG,
        PosTag::JKO,
        PosTag::JKB,
        PosTag::JKV,
        PosTag::JKQ,
        PosTag::JX,
        PosTag::JC,
        PosTag::EP,
        PosTag::EF,
        PosTag::EC,
        PosTag::ETN,
        PosTag::ETM,
        PosTag::XPN,
        PosTag::XSN,
        PosTag::XSV,
        PosTag::XSA,
        PosTag::XR,
        PosTag::SF,
        PosTag::SP,
        PosTag::SS,
        PosTag::SE,
        PosTag::SO,
        PosTag::SW,
        PosTag::SL,
        PosTag::SH,
        PosTag::SN,
        PosTag::UN,
        PosTag::W_URL,
        PosTag::W_EMAIL,
        PosTag::W_HASHTAG,
        PosTag::W_MENTION,
    ];

    /// Position of this tag in [`PosTag::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Canonical tag name.
    pub fn as_str(self) -> &'static str {
        match self {
            PosTag::NNG => "NNG",
            PosTag::NNP => "NNP",
            PosTag::NNB => "NNB",
            PosTag::NR => "NR",
            PosTag::NP => "NP",
            PosTag::VV => "VV",
            PosTag::VA => "VA",
            PosTag::VX => "VX",
            PosTag::VCP => "VCP",
            PosTag::VCN => "VCN",
            PosTag::MM => "MM",
            PosTag::MAG => "MAG",
            PosTag::MAJ => "MAJ",
            PosTag::IC => "IC",
            PosTag::JKS => "JKS",
            PosTag::JKC => "JKC",
            PosTag::JKG => "JKG",
            PosTag::JKO => "JKO",
            PosTag::JKB => "JKB",
            PosTag::JKV => "JKV",
            PosTag::JKQ => "JKQ",
            PosTag::JX => "JX",
            PosTag::JC => "JC",
            PosTag::EP => "EP",
            PosTag::EF => "EF",
            PosTag::EC => "EC",
            PosTag::ETN => "ETN",
            PosTag::ETM => "ETM",
            PosTag::XPN => "XPN",
            PosTag::XSN => "XSN",
            PosTag::XSV => "XSV",
            PosTag::XSA => "XSA",
            PosTag::XR => "XR",
            PosTag::SF => "SF",
            PosTag::SP => "SP",
            PosTag::SS => "SS",
            PosTag::SE => "SE",
            PosTag::SO => "SO",
            PosTag::SW => "SW",
            PosTag::SL => "SL",
            PosTag::SH => "SH",
            PosTag::SN => "SN",
            PosTag::UN => "UN",
            PosTag::W_URL => "W_URL",
            PosTag::W_EMAIL => "W_EMAIL",
            PosTag::W_HASHTAG => "W_HASHTAG",
            PosTag::W_MENTION => "W_MENTION",
        }
    }

    /// Whether the tag is one of the particle (`J*`) tags.
    pub fn is_particle(self) -> bool {
        matches!(
            self,
            PosTag::JKS
                | PosTag::JKC
                | PosTag::JKG
                | PosTag::JKO
                | PosTag::JKB
                | PosTag::JKV
                | PosTag::JKQ
                | PosTag::JX
                | PosTag::JC
        )
    }

    /// Whether the tag is a nominal (`NN*`, `NR`, `NP`) tag.
    pub fn is_nominal(self) -> bool {
        matches!(
            self,
            PosTag::NNG | PosTag::NNP | PosTag::NNB | PosTag::NR | PosTag::NP
        )
    }
}

impl fmt::Display for PosTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PosTag {
    type Err = MorphkitError;

    fn from_str(s: &str) -> Result<Self> {
        let upper = s.trim().to_ascii_uppercase();
        PosTag::ALL
            .iter()
            .copied()
            .find(|tag| tag.as_str() == upper)
            .ok_or_else(|| MorphkitError::config(format!("Unknown tag value {s:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_in_declaration_order() {
        for (i, tag) in PosTag::ALL.iter().enumerate() {
            assert_eq!(tag.index(), i);
        }
    }

    #[test]
    fn test_parse_tag() {
        assert_eq!("NNP".parse::<PosTag>().unwrap(), PosTag::NNP);
        assert_eq!("nnp".parse::<PosTag>().unwrap(), PosTag::NNP);
        assert_eq!("w_url".parse::<PosTag>().unwrap(), PosTag::W_URL);
        assert_eq!(PosTag::JKO.to_string(), "JKO");

        let err = "NOPE".parse::<PosTag>().unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_tag_classes() {
        assert!(PosTag::JKO.is_particle());
        assert!(!PosTag::EF.is_particle());
        assert!(PosTag::NNP.is_nominal());
        assert!(!PosTag::VV.is_nominal());
    }
}
