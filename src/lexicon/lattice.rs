//! K-best lattice search.
//!
//! The text is viewed as a sequence of codepoints. Edges of the lattice are
//! dictionary matches, unknown-word spans classified by script, and forced
//! spans for matched web entities. Edges never cross whitespace or the
//! boundary of a forced span; whitespace itself is crossed for free.
//!
//! For every position the `k` best partial paths are kept, where `k` is the
//! requested candidate count. Reported positions and lengths are in UTF-16
//! code units.

use crate::analysis::match_options::MatchOptions;
use crate::analysis::tag::PosTag;
use crate::analysis::token::{MorphRef, RawCandidate, RawToken};
use crate::lexicon::pattern::find_patterns;
use crate::lexicon::store::Lexicon;

/// Cost added to every morpheme on a path.
const MORPH_PENALTY: f32 = 1.5;
/// Base cost of an unknown Hangul span.
const UNK_BASE: f32 = 5.0;
/// Additional cost per codepoint of an unknown Hangul span.
const UNK_PER_CHAR: f32 = 3.0;
/// Extra cost of a single-syllable unknown span.
const UNK_SINGLE: f32 = 3.0;
/// Longest unknown Hangul span considered.
const MAX_UNK_CHARS: usize = 8;
/// Cost of a run of non-Hangul characters or a punctuation mark.
const SYMBOL_COST: f32 = 2.0;
/// Cost of a matched web entity.
const PATTERN_COST: f32 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CharClass {
    Space,
    Hangul,
    Latin,
    Digit,
    Hanja,
    Punct(PosTag),
    Other,
}

fn classify(c: char) -> CharClass {
    match c {
        c if c.is_whitespace() => CharClass::Space,
        '\u{AC00}'..='\u{D7A3}' | '\u{1100}'..='\u{11FF}' | '\u{3130}'..='\u{318F}' => {
            CharClass::Hangul
        }
        c if c.is_ascii_alphabetic() => CharClass::Latin,
        c if c.is_ascii_digit() => CharClass::Digit,
        '\u{4E00}'..='\u{9FFF}' | '\u{3400}'..='\u{4DBF}' | '\u{F900}'..='\u{FAFF}' => {
            CharClass::Hanja
        }
        '.' | '!' | '?' => CharClass::Punct(PosTag::SF),
        '"' | '\'' | '(' | ')' | '[' | ']' | '{' | '}' | '<' | '>' | '“' | '”' | '‘' | '’'
        | '「' | '」' | '《' | '》' => CharClass::Punct(PosTag::SS),
        '…' => CharClass::Punct(PosTag::SE),
        '-' | '~' | '–' | '—' => CharClass::Punct(PosTag::SO),
        ',' | '·' | ':' | ';' | '/' => CharClass::Punct(PosTag::SP),
        _ => CharClass::Other,
    }
}

#[derive(Clone, Copy, Debug)]
struct Edge {
    start: usize,
    end: usize,
    tag: PosTag,
    morph: usize,
    cost: f32,
}

#[derive(Clone, Copy, Debug)]
struct PathNode {
    score: f32,
    /// Previous position and rank in that position's list.
    prev: Option<(usize, usize)>,
    /// Edge taken to reach this node; `None` for whitespace skips.
    edge: Option<Edge>,
}

/// Codepoint view of the analysed text.
struct Chars<'t> {
    text: &'t str,
    bytes: Vec<usize>,
    utf16: Vec<u32>,
    classes: Vec<CharClass>,
}

impl<'t> Chars<'t> {
    fn new(text: &'t str) -> Self {
        let mut bytes = Vec::with_capacity(text.len() + 1);
        let mut utf16 = Vec::with_capacity(text.len() + 1);
        let mut classes = Vec::with_capacity(text.len());
        let mut unit = 0u32;

        for (i, c) in text.char_indices() {
            bytes.push(i);
            utf16.push(unit);
            classes.push(classify(c));
            unit += c.len_utf16() as u32;
        }
        bytes.push(text.len());
        utf16.push(unit);

        Chars {
            text,
            bytes,
            utf16,
            classes,
        }
    }

    fn len(&self) -> usize {
        self.classes.len()
    }

    fn slice(&self, start: usize, end: usize) -> &'t str {
        &self.text[self.bytes[start]..self.bytes[end]]
    }

    fn char_index(&self, byte: usize) -> usize {
        self.bytes.partition_point(|&b| b < byte)
    }

    /// End of the run of characters sharing the class of `start`.
    fn run_end(&self, start: usize, limit: usize) -> usize {
        let class = self.classes[start];
        (start..limit)
            .find(|&i| self.classes[i] != class)
            .unwrap_or(limit)
    }
}

/// Analyse `text`, returning up to `k` candidates, best first.
pub fn analyze(
    lexicon: &Lexicon,
    text: &str,
    k: usize,
    match_options: MatchOptions,
    cutoff_threshold: f32,
) -> Vec<RawCandidate> {
    let k = k.max(1);
    let chars = Chars::new(text);
    let n = chars.len();

    // forced[i] = end of the entity span starting at i; limit[i] = how far a
    // regular edge starting at i may extend.
    let mut forced: Vec<Option<(usize, PosTag)>> = vec![None; n];
    let mut inside = vec![false; n];
    for span in find_patterns(text, match_options) {
        let start = chars.char_index(span.start);
        let end = chars.char_index(span.end);
        forced[start] = Some((end, span.tag));
        inside[start..end].iter_mut().for_each(|b| *b = true);
    }
    let mut limit = vec![n; n];
    for i in (0..n).rev() {
        let next_is_barrier = i + 1 < n
            && (chars.classes[i + 1] == CharClass::Space || forced[i + 1].is_some());
        limit[i] = if i + 1 >= n || next_is_barrier {
            i + 1
        } else {
            limit[i + 1]
        };
    }

    let mut best: Vec<Vec<PathNode>> = vec![Vec::new(); n + 1];
    best[0].push(PathNode {
        score: 0.0,
        prev: None,
        edge: None,
    });

    for i in 0..n {
        if best[i].is_empty() {
            continue;
        }
        rank(&mut best[i], k);

        let edges = if chars.classes[i] == CharClass::Space {
            Vec::new()
        } else if let Some((end, tag)) = forced[i] {
            vec![Edge {
                start: i,
                end,
                tag,
                morph: Lexicon::placeholder(tag),
                cost: PATTERN_COST,
            }]
        } else if inside[i] {
            Vec::new()
        } else {
            edges_from(lexicon, &chars, i, limit[i])
        };

        if chars.classes[i] == CharClass::Space {
            let skipped: Vec<PathNode> = best[i]
                .iter()
                .enumerate()
                .map(|(r, node)| PathNode {
                    score: node.score,
                    prev: Some((i, r)),
                    edge: None,
                })
                .collect();
            best[i + 1].extend(skipped);
            continue;
        }

        for edge in edges {
            let extended: Vec<PathNode> = best[i]
                .iter()
                .enumerate()
                .map(|(r, node)| PathNode {
                    score: node.score - edge.cost,
                    prev: Some((i, r)),
                    edge: Some(edge),
                })
                .collect();
            best[edge.end].extend(extended);
        }
    }
    rank(&mut best[n], k);

    let mut candidates: Vec<RawCandidate> = (0..best[n].len())
        .map(|r| backtrack(&best, &chars, n, r))
        .collect();

    if let Some(top) = candidates.first().map(|c| c.score) {
        candidates.retain(|c| top - c.score <= cutoff_threshold);
    }
    candidates
}

/// Sort best first and keep the `k` best. The sort is stable, so equal
/// scores keep their discovery order.
fn rank(nodes: &mut Vec<PathNode>, k: usize) {
    nodes.sort_by(|a, b| b.score.total_cmp(&a.score));
    nodes.truncate(k);
}

fn edges_from(lexicon: &Lexicon, chars: &Chars<'_>, start: usize, limit: usize) -> Vec<Edge> {
    let mut edges = Vec::new();

    let max_end = limit.min(start + lexicon.max_form_chars());
    for end in (start + 1)..=max_end {
        for &id in lexicon.lookup(chars.slice(start, end)) {
            if let Some(entry) = lexicon.entry(id) {
                edges.push(Edge {
                    start,
                    end,
                    tag: entry.tag,
                    morph: id,
                    cost: MORPH_PENALTY - entry.score,
                });
            }
        }
    }

    let run_end = chars.run_end(start, limit);
    match chars.classes[start] {
        CharClass::Hangul => {
            for end in (start + 1)..=run_end.min(start + MAX_UNK_CHARS) {
                let form = chars.slice(start, end);
                if lexicon.contains(form, PosTag::NNP) {
                    continue;
                }
                edges.push(Edge {
                    start,
                    end,
                    tag: PosTag::NNP,
                    morph: Lexicon::placeholder(PosTag::NNP),
                    cost: unknown_cost(end - start),
                });
            }
        }
        CharClass::Punct(tag) => edges.push(Edge {
            start,
            end: start + 1,
            tag,
            morph: Lexicon::placeholder(tag),
            cost: SYMBOL_COST,
        }),
        class => {
            let tag = match class {
                CharClass::Latin => PosTag::SL,
                CharClass::Digit => PosTag::SN,
                CharClass::Hanja => PosTag::SH,
                _ => PosTag::SW,
            };
            if !lexicon.contains(chars.slice(start, run_end), tag) {
                edges.push(Edge {
                    start,
                    end: run_end,
                    tag,
                    morph: Lexicon::placeholder(tag),
                    cost: SYMBOL_COST,
                });
            }
        }
    }

    edges
}

fn unknown_cost(chars: usize) -> f32 {
    let single = if chars == 1 { UNK_SINGLE } else { 0.0 };
    UNK_BASE + UNK_PER_CHAR * chars as f32 + single
}

fn backtrack(best: &[Vec<PathNode>], chars: &Chars<'_>, n: usize, r: usize) -> RawCandidate {
    let score = best[n][r].score;
    let mut tokens = Vec::new();
    let mut cursor = Some((n, r));

    while let Some((pos, r)) = cursor {
        let node = &best[pos][r];
        if let Some(edge) = node.edge {
            tokens.push(RawToken {
                form: chars.slice(edge.start, edge.end).to_string(),
                tag: edge.tag,
                position: chars.utf16[edge.start],
                length: chars.utf16[edge.end] - chars.utf16[edge.start],
                morph: MorphRef(edge.morph),
            });
        }
        cursor = node.prev;
    }

    tokens.reverse();
    RawCandidate { tokens, score }
}
