//! Built-in closed-class lexicon.
//!
//! Particles, endings, the copula and a handful of frequent stems and
//! function words are always present, so that text can be segmented into
//! content word plus grammatical morphemes even with an empty user
//! dictionary. Scores are log-scale weights: closer to zero is preferred.

use crate::analysis::tag::PosTag;

/// `(form, tag, score)` entries registered in every lexicon.
pub const BUILTIN_MORPHEMES: &[(&str, PosTag, f32)] = &[
    // case particles
    ("이", PosTag::JKS, -1.0),
    ("가", PosTag::JKS, -1.0),
    ("께서", PosTag::JKS, -2.0),
    ("을", PosTag::JKO, -1.0),
    ("를", PosTag::JKO, -1.0),
    ("의", PosTag::JKG, -1.0),
    ("에", PosTag::JKB, -1.0),
    ("에서", PosTag::JKB, -1.0),
    ("에게", PosTag::JKB, -1.5),
    ("한테", PosTag::JKB, -1.5),
    ("으로", PosTag::JKB, -1.2),
    ("로", PosTag::JKB, -1.2),
    ("보다", PosTag::JKB, -2.0),
    ("처럼", PosTag::JKB, -2.0),
    ("아", PosTag::JKV, -3.0),
    ("야", PosTag::JKV, -3.0),
    ("라고", PosTag::JKQ, -2.5),
    // auxiliary and conjunctive particles
    ("은", PosTag::JX, -1.0),
    ("는", PosTag::JX, -1.0),
    ("도", PosTag::JX, -1.2),
    ("만", PosTag::JX, -1.5),
    ("까지", PosTag::JX, -1.5),
    ("부터", PosTag::JX, -1.5),
    ("와", PosTag::JC, -1.3),
    ("과", PosTag::JC, -1.3),
    ("하고", PosTag::JC, -2.0),
    ("이나", PosTag::JC, -2.0),
    ("랑", PosTag::JC, -2.0),
    // pre-final endings
    ("었", PosTag::EP, -1.0),
    ("았", PosTag::EP, -1.0),
    ("였", PosTag::EP, -1.2),
    ("겠", PosTag::EP, -1.5),
    ("시", PosTag::EP, -2.0),
    // final endings
    ("다", PosTag::EF, -1.0),
    ("요", PosTag::EF, -1.5),
    ("어요", PosTag::EF, -1.2),
    ("아요", PosTag::EF, -1.2),
    ("습니다", PosTag::EF, -1.0),
    ("니다", PosTag::EF, -2.0),
    ("는다", PosTag::EF, -1.3),
    ("냐", PosTag::EF, -2.5),
    // connective endings
    ("고", PosTag::EC, -1.2),
    ("서", PosTag::EC, -1.5),
    ("어서", PosTag::EC, -1.3),
    ("아서", PosTag::EC, -1.3),
    ("지만", PosTag::EC, -1.5),
    ("면", PosTag::EC, -1.5),
    ("으면", PosTag::EC, -1.5),
    ("어", PosTag::EC, -1.8),
    ("아", PosTag::EC, -1.8),
    ("게", PosTag::EC, -2.0),
    ("지", PosTag::EC, -2.0),
    // transformative endings
    ("는", PosTag::ETM, -3.0),
    ("은", PosTag::ETM, -3.0),
    ("을", PosTag::ETM, -3.0),
    ("ㄴ", PosTag::ETM, -3.0),
    ("기", PosTag::ETN, -3.0),
    ("음", PosTag::ETN, -3.0),
    // copula
    ("이", PosTag::VCP, -2.5),
    ("아니", PosTag::VCN, -2.0),
    // frequent predicate stems
    ("먹", PosTag::VV, -1.5),
    ("가", PosTag::VV, -2.5),
    ("오", PosTag::VV, -2.5),
    ("하", PosTag::VV, -1.5),
    ("보", PosTag::VV, -2.0),
    ("주", PosTag::VV, -2.0),
    ("있", PosTag::VV, -1.5),
    ("되", PosTag::VV, -2.0),
    ("알", PosTag::VV, -2.0),
    ("살", PosTag::VV, -2.0),
    ("없", PosTag::VA, -1.5),
    ("좋", PosTag::VA, -1.5),
    ("싫", PosTag::VA, -2.0),
    ("크", PosTag::VA, -2.0),
    ("작", PosTag::VA, -2.0),
    ("하", PosTag::XSV, -1.5),
    ("들", PosTag::XSN, -2.0),
    // function words
    ("것", PosTag::NNB, -1.5),
    ("수", PosTag::NNB, -2.0),
    ("나", PosTag::NP, -2.5),
    ("너", PosTag::NP, -2.5),
    ("우리", PosTag::NP, -2.0),
    ("그", PosTag::MM, -2.5),
    ("아주", PosTag::MAG, -2.0),
    ("매우", PosTag::MAG, -2.0),
    ("잘", PosTag::MAG, -2.0),
    ("그리고", PosTag::MAJ, -2.0),
    ("그러나", PosTag::MAJ, -2.0),
];

/// Allomorph groups. With allomorph integration enabled, every member
/// resolves to the morpheme id of the group's first entry.
pub const ALLOMORPH_GROUPS: &[&[(&str, PosTag)]] = &[
    &[("을", PosTag::JKO), ("를", PosTag::JKO)],
    &[("은", PosTag::JX), ("는", PosTag::JX)],
    &[("이", PosTag::JKS), ("가", PosTag::JKS)],
    &[("와", PosTag::JC), ("과", PosTag::JC)],
    &[("었", PosTag::EP), ("았", PosTag::EP)],
    &[("으로", PosTag::JKB), ("로", PosTag::JKB)],
];

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_builtins_are_unique() {
        let mut seen = HashSet::new();
        for (form, tag, _) in BUILTIN_MORPHEMES {
            assert!(seen.insert((*form, *tag)), "duplicate builtin {form}/{tag}");
        }
    }

    #[test]
    fn test_allomorph_members_are_builtins() {
        for group in ALLOMORPH_GROUPS {
            for (form, tag) in group.iter() {
                assert!(
                    BUILTIN_MORPHEMES
                        .iter()
                        .any(|(f, t, _)| f == form && t == tag),
                    "{form}/{tag} missing"
                );
            }
        }
    }
}
