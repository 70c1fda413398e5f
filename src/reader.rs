//! Text inputs and the line reader adapter.
//!
//! [`IntoText`] is the single point where caller-supplied input elements are
//! checked to be text. It is implemented for the usual string types, for raw
//! bytes (which must be valid UTF-8), for JSON values (which must be strings)
//! and for `Result`s of any of these, so that fallible sources such as
//! [`std::io::BufRead::lines`] can be fed in directly.
//!
//! [`LineReader`] turns such a sequence into the "read next line" capability
//! used by word extraction. Extraction treats an empty line as the end of the
//! corpus, so the reader hands out a single space for blank input lines and
//! an empty string only once the sequence is exhausted.

use std::borrow::Cow;

use serde_json::Value;

use crate::error::{MorphkitError, Result};

/// Conversion of an input element into owned text.
pub trait IntoText {
    /// Return the element as a `String`, or a type error if it is not text.
    fn into_text(self) -> Result<String>;
}

impl IntoText for String {
    fn into_text(self) -> Result<String> {
        Ok(self)
    }
}

impl IntoText for &str {
    fn into_text(self) -> Result<String> {
        Ok(self.to_string())
    }
}

impl IntoText for &String {
    fn into_text(self) -> Result<String> {
        Ok(self.clone())
    }
}

impl IntoText for Cow<'_, str> {
    fn into_text(self) -> Result<String> {
        Ok(self.into_owned())
    }
}

impl IntoText for Box<str> {
    fn into_text(self) -> Result<String> {
        Ok(self.into_string())
    }
}

impl IntoText for Vec<u8> {
    fn into_text(self) -> Result<String> {
        String::from_utf8(self).map_err(|e| {
            MorphkitError::type_mismatch(format!("input bytes are not valid UTF-8: {e}"))
        })
    }
}

impl IntoText for &[u8] {
    fn into_text(self) -> Result<String> {
        std::str::from_utf8(self)
            .map(str::to_string)
            .map_err(|e| MorphkitError::type_mismatch(format!("input bytes are not valid UTF-8: {e}")))
    }
}

impl IntoText for Value {
    fn into_text(self) -> Result<String> {
        match self {
            Value::String(s) => Ok(s),
            other => Err(non_text_value(&other)),
        }
    }
}

impl IntoText for &Value {
    fn into_text(self) -> Result<String> {
        match self {
            Value::String(s) => Ok(s.clone()),
            other => Err(non_text_value(other)),
        }
    }
}

impl<T, E> IntoText for std::result::Result<T, E>
where
    T: IntoText,
    E: Into<MorphkitError>,
{
    fn into_text(self) -> Result<String> {
        self.map_err(Into::into)?.into_text()
    }
}

fn non_text_value(value: &Value) -> MorphkitError {
    let kind = match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    };
    MorphkitError::type_mismatch(format!("expected a string, got {kind}"))
}

/// Pull-based line reader over a sequence of text elements.
pub struct LineReader<I> {
    lines: Option<I>,
    lines_read: usize,
}

impl<I> LineReader<I>
where
    I: Iterator,
    I::Item: IntoText,
{
    /// Create a reader over `lines`.
    pub fn new<L>(lines: L) -> Self
    where
        L: IntoIterator<IntoIter = I>,
    {
        LineReader {
            lines: Some(lines.into_iter()),
            lines_read: 0,
        }
    }

    /// Pull the next line.
    ///
    /// Blank lines come back as `" "`. Once the sequence is exhausted every
    /// call returns an empty string. A failing element is returned as an
    /// error at the call that pulled it.
    pub fn read_line(&mut self) -> Result<String> {
        let Some(lines) = self.lines.as_mut() else {
            return Ok(String::new());
        };

        match lines.next() {
            Some(item) => {
                let mut line = item.into_text()?;
                self.lines_read += 1;
                if line.is_empty() {
                    line.push(' ');
                }
                Ok(line)
            }
            None => {
                self.lines = None;
                Ok(String::new())
            }
        }
    }

    /// Number of lines handed out so far.
    pub fn lines_read(&self) -> usize {
        self.lines_read
    }

    /// Whether the underlying sequence has been exhausted.
    pub fn is_exhausted(&self) -> bool {
        self.lines.is_none()
    }

    /// Turn the reader into a zero-argument closure.
    pub fn into_fn(mut self) -> impl FnMut() -> Result<String> {
        move || self.read_line()
    }
}

/// Wrap `lines` into a zero-argument "read next line" closure.
pub fn line_reader<L>(lines: L) -> impl FnMut() -> Result<String>
where
    L: IntoIterator,
    L::Item: IntoText,
{
    LineReader::new(lines).into_fn()
}
