//! User dictionary files.
//!
//! Format: UTF-8 text, one entry per line.
//!
//! ```text
//! # comment
//! 감기약	NNP
//! 먹방	NNG	-3.5
//! ```
//!
//! Fields are separated by a tab: form, tag, and an optional score
//! (default 0.0). Blank lines and lines starting with `#` are ignored. The
//! whole file is parsed before anything is returned, so a malformed file
//! never leaves a half-loaded dictionary behind.

use std::fs;
use std::path::Path;

use anyhow::Context;

use crate::analysis::tag::PosTag;
use crate::error::{MorphkitError, Result};

/// File name of a model's default dictionary.
pub const DEFAULT_DICT_FILE: &str = "default.dict";

/// One parsed dictionary line.
#[derive(Clone, Debug, PartialEq)]
pub struct DictEntry {
    pub form: String,
    pub tag: PosTag,
    pub score: f32,
}

/// Read and parse a dictionary file.
pub fn load_dictionary_file<P: AsRef<Path>>(path: P) -> Result<Vec<DictEntry>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read dictionary {}", path.display()))?;
    parse_dictionary(&content, &path.display().to_string())
}

/// Parse dictionary content. `origin` names the source in error messages.
pub fn parse_dictionary(content: &str, origin: &str) -> Result<Vec<DictEntry>> {
    let mut entries = Vec::new();

    for (line_no, line) in content.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() || line.trim_start().starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        let at = || format!("{origin}:{}", line_no + 1);

        if fields.len() < 2 || fields.len() > 3 {
            return Err(MorphkitError::dictionary(format!(
                "{}: expected `form<TAB>tag[<TAB>score]`",
                at()
            )));
        }

        let form = fields[0].trim();
        if form.is_empty() || form.chars().any(char::is_whitespace) {
            return Err(MorphkitError::dictionary(format!(
                "{}: invalid form {:?}",
                at(),
                fields[0]
            )));
        }

        let tag: PosTag = fields[1]
            .parse()
            .map_err(|e| MorphkitError::dictionary(format!("{}: {e}", at())))?;

        let score = match fields.get(2) {
            Some(raw) => raw
                .trim()
                .parse::<f32>()
                .ok()
                .filter(|s| s.is_finite())
                .ok_or_else(|| {
                    MorphkitError::dictionary(format!("{}: invalid score {raw:?}", at()))
                })?,
            None => 0.0,
        };

        entries.push(DictEntry {
            form: form.to_string(),
            tag,
            score,
        });
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_parse_dictionary() {
        let content = "# user words\n감기약\tNNP\n\n먹방\tNNG\t-3.5\r\n";
        let entries = parse_dictionary(content, "test").unwrap();
        assert_eq!(
            entries,
            vec![
                DictEntry {
                    form: "감기약".into(),
                    tag: PosTag::NNP,
                    score: 0.0
                },
                DictEntry {
                    form: "먹방".into(),
                    tag: PosTag::NNG,
                    score: -3.5
                },
            ]
        );
    }

    #[test]
    fn test_parse_errors_name_the_line() {
        let err = parse_dictionary("좋은말\tNNG\n나쁜말\tXYZ\n", "user.dict").unwrap_err();
        assert!(matches!(err, MorphkitError::Dictionary(_)));
        assert!(err.to_string().contains("user.dict:2"));

        assert!(parse_dictionary("단어만\n", "d").is_err());
        assert!(parse_dictionary("단어\tNNG\tabc\n", "d").is_err());
        assert!(parse_dictionary("두 단어\tNNG\n", "d").is_err());
    }

    #[test]
    fn test_load_dictionary_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "감기약\tNNP\t1.0").unwrap();
        let entries = load_dictionary_file(file.path()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].score, 1.0);

        let err = load_dictionary_file("/nonexistent/user.dict").unwrap_err();
        assert!(matches!(err, MorphkitError::Anyhow(_)));
    }
}
