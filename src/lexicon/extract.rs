//! Unsupervised word extraction.
//!
//! Every whitespace-separated word of the corpus contributes all of its
//! prefixes (up to `max_word_len` codepoints) as word candidates. A candidate
//! scores well when it is cohesive (its characters tend to occur together)
//! and when what follows it is varied (high right-branching entropy). The
//! end of a word counts as a distinct follower on every occurrence.

use std::collections::{HashMap, HashSet};

use log::debug;

use crate::config::ExtractParams;
use crate::engine::{ExtractedWord, LineSource};
use crate::error::Result;
use crate::lexicon::store::Lexicon;

#[derive(Debug, Default)]
struct PrefixStats {
    freq: usize,
    followers: HashMap<char, usize>,
    word_ends: usize,
    noun_like: usize,
}

impl PrefixStats {
    fn branching_entropy(&self) -> f32 {
        let total = self.freq as f32;
        if total == 0.0 {
            return 0.0;
        }
        let mut entropy: f32 = self
            .followers
            .values()
            .map(|&n| {
                let p = n as f32 / total;
                -p * p.ln()
            })
            .sum();
        if self.word_ends > 0 {
            let p = 1.0 / total;
            entropy += self.word_ends as f32 * -p * p.ln();
        }
        entropy
    }
}

/// Scan `reader` until it returns an empty line and score the word
/// candidates found.
pub fn extract_words(
    lexicon: &Lexicon,
    reader: &mut LineSource<'_>,
    params: &ExtractParams,
) -> Result<Vec<ExtractedWord>> {
    params.validate()?;

    let mut stats: HashMap<String, PrefixStats> = HashMap::new();
    let mut first_char_freq: HashMap<char, usize> = HashMap::new();
    let mut lines = 0usize;

    loop {
        let line = reader()?;
        if line.is_empty() {
            break;
        }
        lines += 1;

        for word in line.split_whitespace() {
            let word = word.trim_start_matches(|c: char| !c.is_alphanumeric());
            let core_end = word
                .char_indices()
                .find(|(_, c)| !c.is_alphanumeric())
                .map(|(i, _)| i)
                .unwrap_or(word.len());
            let core = &word[..core_end];
            let Some(first) = core.chars().next() else {
                continue;
            };
            *first_char_freq.entry(first).or_default() += 1;

            for (len, (i, c)) in core.char_indices().enumerate().skip(1) {
                if len > params.max_word_len {
                    break;
                }
                record(&mut stats, lexicon, &core[..i], &core[i..], Some(c));
            }
            if core.chars().count() <= params.max_word_len {
                record(&mut stats, lexicon, core, "", None);
            }
        }
    }
    debug!("Scanned {lines} lines, {} distinct prefixes", stats.len());

    let mut words: Vec<ExtractedWord> = stats
        .iter()
        .filter_map(|(form, s)| {
            let len = form.chars().count();
            if len < 2 || s.freq < params.min_count || form.chars().all(|c| c.is_ascii_digit()) {
                return None;
            }
            let first = form.chars().next()?;
            let base = *first_char_freq.get(&first)? as f32;
            let cohesion = (s.freq as f32 / base).powf(1.0 / (len - 1) as f32);
            let score = cohesion * (1.0 - (-s.branching_entropy()).exp());
            let pos_score = ((s.noun_like as f32 + 0.5) / (s.freq as f32 + 1.0)).ln();

            (score >= params.min_score && pos_score >= params.pos_threshold).then(|| {
                ExtractedWord {
                    form: form.clone(),
                    score,
                    freq: s.freq,
                    pos_score,
                }
            })
        })
        .collect();

    if params.lm_filter {
        let candidates: HashSet<String> = words.iter().map(|w| w.form.clone()).collect();
        words.retain(|w| !is_explained(lexicon, &candidates, &w.form));
    }

    words.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then(b.freq.cmp(&a.freq))
            .then_with(|| a.form.cmp(&b.form))
    });
    Ok(words)
}

fn record(
    stats: &mut HashMap<String, PrefixStats>,
    lexicon: &Lexicon,
    prefix: &str,
    rest: &str,
    next: Option<char>,
) {
    let entry = stats.entry(prefix.to_string()).or_default();
    entry.freq += 1;
    match next {
        Some(c) => *entry.followers.entry(c).or_default() += 1,
        None => entry.word_ends += 1,
    }
    if rest.is_empty() || lexicon.particle_prefix(rest).is_some() {
        entry.noun_like += 1;
    }
}

/// Whether the lexicon already accounts for `form`: it is registered, it
/// splits into registered morphemes, or it is another candidate followed by
/// a particle.
fn is_explained(lexicon: &Lexicon, candidates: &HashSet<String>, form: &str) -> bool {
    if lexicon.contains_form(form) || lexicon.segments_fully(form) {
        return true;
    }
    form.char_indices().skip(1).any(|(i, _)| {
        candidates.contains(&form[..i])
            && lexicon.particle_prefix(&form[i..]) == Some(&form[i..])
    })
}
