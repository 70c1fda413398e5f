//! Morpheme store shared by the lexicon builder and engine.
//!
//! Layout of the morpheme table:
//!
//! ```text
//! [0, PosTag::COUNT)          one placeholder per tag (empty form), used for unknown words
//! [PosTag::COUNT, ...)        built-in morphemes, then dictionary and user words in insertion order
//! ```
//!
//! Ids are indices into this table and never change once assigned.

use std::collections::HashMap;

use crate::analysis::tag::PosTag;
use crate::analysis::token::Morpheme;
use crate::lexicon::builtin::{ALLOMORPH_GROUPS, BUILTIN_MORPHEMES};

/// One registered morpheme.
#[derive(Clone, Debug, PartialEq)]
pub struct LexiconEntry {
    pub form: String,
    pub tag: PosTag,
    pub score: f32,
}

/// Morpheme table with a form index.
#[derive(Clone, Debug)]
pub struct Lexicon {
    entries: Vec<LexiconEntry>,
    by_form: HashMap<String, Vec<usize>>,
    max_form_chars: usize,
}

impl Lexicon {
    /// A lexicon holding the placeholders and the built-in morphemes.
    pub fn with_builtins() -> Self {
        let mut lexicon = Lexicon {
            entries: Vec::with_capacity(PosTag::COUNT + BUILTIN_MORPHEMES.len()),
            by_form: HashMap::new(),
            max_form_chars: 0,
        };

        for tag in PosTag::ALL {
            lexicon.entries.push(LexiconEntry {
                form: String::new(),
                tag,
                score: 0.0,
            });
        }
        for (form, tag, score) in BUILTIN_MORPHEMES {
            lexicon.insert(form, *tag, *score);
        }

        lexicon
    }

    /// Register a morpheme. Returns false if `(form, tag)` already exists.
    pub fn insert(&mut self, form: &str, tag: PosTag, score: f32) -> bool {
        if self.contains(form, tag) {
            return false;
        }

        let id = self.entries.len();
        self.entries.push(LexiconEntry {
            form: form.to_string(),
            tag,
            score,
        });
        self.by_form.entry(form.to_string()).or_default().push(id);
        self.max_form_chars = self.max_form_chars.max(form.chars().count());
        true
    }

    pub fn contains(&self, form: &str, tag: PosTag) -> bool {
        self.lookup(form).iter().any(|&id| self.entries[id].tag == tag)
    }

    /// Whether any morpheme has this form.
    pub fn contains_form(&self, form: &str) -> bool {
        self.by_form.contains_key(form)
    }

    /// Ids of the morphemes with this form.
    pub fn lookup(&self, form: &str) -> &[usize] {
        self.by_form.get(form).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn entry(&self, id: usize) -> Option<&LexiconEntry> {
        self.entries.get(id)
    }

    pub fn morpheme(&self, id: usize) -> Option<Morpheme> {
        self.entry(id).map(|e| Morpheme::new(e.form.clone(), e.tag))
    }

    /// Id of the placeholder morpheme for unknown words of `tag`.
    pub fn placeholder(tag: PosTag) -> usize {
        tag.index()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries beyond the placeholders and built-ins.
    pub fn added_len(&self) -> usize {
        self.entries.len() - PosTag::COUNT - BUILTIN_MORPHEMES.len()
    }

    /// Longest registered form, in codepoints.
    pub fn max_form_chars(&self) -> usize {
        self.max_form_chars
    }

    /// Whether `text` begins with a particle form; returns the longest one.
    pub fn particle_prefix<'t>(&self, text: &'t str) -> Option<&'t str> {
        text.char_indices()
            .map(|(i, c)| i + c.len_utf8())
            .take(self.max_form_chars)
            .filter(|&end| {
                self.lookup(&text[..end])
                    .iter()
                    .any(|&id| self.entries[id].tag.is_particle())
            })
            .last()
            .map(|end| &text[..end])
    }

    /// Whether `text` splits entirely into registered morphemes.
    pub fn segments_fully(&self, text: &str) -> bool {
        let bounds: Vec<usize> = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .collect();
        let n = bounds.len() - 1;
        if n == 0 {
            return false;
        }

        let mut reachable = vec![false; n + 1];
        reachable[0] = true;
        for start in 0..n {
            if !reachable[start] {
                continue;
            }
            for end in (start + 1)..=n.min(start + self.max_form_chars) {
                if self.contains_form(&text[bounds[start]..bounds[end]]) {
                    reachable[end] = true;
                }
            }
        }
        reachable[n]
    }

    /// Map from morpheme id to the id it resolves to under allomorph
    /// integration.
    pub fn allomorph_representatives(&self) -> Vec<usize> {
        let mut reps: Vec<usize> = (0..self.entries.len()).collect();
        for group in ALLOMORPH_GROUPS {
            let ids: Vec<usize> = group
                .iter()
                .filter_map(|(form, tag)| {
                    self.lookup(form)
                        .iter()
                        .copied()
                        .find(|&id| self.entries[id].tag == *tag)
                })
                .collect();
            if let Some(&first) = ids.first() {
                for &id in &ids {
                    reps[id] = first;
                }
            }
        }
        reps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders_come_first() {
        let lexicon = Lexicon::with_builtins();
        let nnp = lexicon.entry(Lexicon::placeholder(PosTag::NNP)).unwrap();
        assert_eq!(nnp.tag, PosTag::NNP);
        assert!(nnp.form.is_empty());
        assert_eq!(lexicon.added_len(), 0);
    }

    #[test]
    fn test_insert_rejects_duplicates() {
        let mut lexicon = Lexicon::with_builtins();
        assert!(lexicon.insert("감기약", PosTag::NNP, 0.0));
        assert!(!lexicon.insert("감기약", PosTag::NNP, -5.0));
        assert!(lexicon.insert("감기약", PosTag::NNG, 0.0));
        assert_eq!(lexicon.lookup("감기약").len(), 2);
        assert_eq!(lexicon.added_len(), 2);
        assert!(lexicon.max_form_chars() >= 3);
    }

    #[test]
    fn test_particle_prefix() {
        let lexicon = Lexicon::with_builtins();
        assert_eq!(lexicon.particle_prefix("을"), Some("을"));
        assert_eq!(lexicon.particle_prefix("에서는"), Some("에서"));
        assert_eq!(lexicon.particle_prefix("었다"), None);
    }

    #[test]
    fn test_segments_fully() {
        let lexicon = Lexicon::with_builtins();
        assert!(lexicon.segments_fully("먹었다"));
        assert!(!lexicon.segments_fully("감기약"));
        assert!(!lexicon.segments_fully(""));
    }

    #[test]
    fn test_allomorph_representatives() {
        let lexicon = Lexicon::with_builtins();
        let reps = lexicon.allomorph_representatives();
        let eul = lexicon.lookup("을").iter().copied().find(|&id| {
            lexicon.entry(id).unwrap().tag == PosTag::JKO
        });
        let reul = lexicon.lookup("를")[0];
        assert_eq!(reps[reul], eul.unwrap());
        assert_eq!(reps[eul.unwrap()], eul.unwrap());
    }
}
