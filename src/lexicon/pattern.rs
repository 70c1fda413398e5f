//! Web-entity pattern matching.
//!
//! URLs, e-mail addresses, hashtags and mentions are recognised before
//! segmentation and become single tokens. Overlapping matches are resolved
//! by priority (URL, e-mail, hashtag, mention), then by position.

use lazy_static::lazy_static;
use regex::Regex;

use crate::analysis::match_options::MatchOptions;
use crate::analysis::tag::PosTag;

lazy_static! {
    static ref URL_PATTERN: Regex =
        Regex::new(r"(?i)\b(?:https?|ftp)://[^\s]+[^\s.,!?)\]]").unwrap();
    static ref EMAIL_PATTERN: Regex =
        Regex::new(r"[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}").unwrap();
    static ref HASHTAG_PATTERN: Regex = Regex::new(r"#[\p{L}\p{N}_]+").unwrap();
    static ref MENTION_PATTERN: Regex = Regex::new(r"@[\p{L}\p{N}_]+").unwrap();
}

/// A matched entity, in byte offsets of the analysed text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PatternSpan {
    pub start: usize,
    pub end: usize,
    pub tag: PosTag,
}

/// Find the non-overlapping entity spans enabled by `options`, sorted by start.
pub fn find_patterns(text: &str, options: MatchOptions) -> Vec<PatternSpan> {
    let patterns: [(MatchOptions, &Regex, PosTag); 4] = [
        (MatchOptions::URL, &URL_PATTERN, PosTag::W_URL),
        (MatchOptions::EMAIL, &EMAIL_PATTERN, PosTag::W_EMAIL),
        (MatchOptions::HASHTAG, &HASHTAG_PATTERN, PosTag::W_HASHTAG),
        (MatchOptions::MENTION, &MENTION_PATTERN, PosTag::W_MENTION),
    ];

    let mut spans: Vec<PatternSpan> = Vec::new();
    for (flag, pattern, tag) in patterns {
        if !options.contains(flag) {
            continue;
        }
        for m in pattern.find_iter(text) {
            let overlaps = spans.iter().any(|s| m.start() < s.end && s.start < m.end());
            if !overlaps {
                spans.push(PatternSpan {
                    start: m.start(),
                    end: m.end(),
                    tag,
                });
            }
        }
    }

    spans.sort_by_key(|s| s.start);
    spans
}
