//! Paragraph tokenizer implementation.

use std::sync::LazyLock;

use regex::Regex;

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;

static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r\n|\r|\n").expect("line break pattern is valid"));

/// A tokenizer that emits one token per paragraph.
///
/// Paragraphs are runs of non-blank lines separated by one or more blank
/// lines. `\n`, `\r\n` and lone `\r` all end a line. Line breaks inside a
/// paragraph are kept as they appear in the input.
///
/// # Examples
///
/// ```
/// use textclass::analysis::tokenizer::{ParagraphTokenizer, Tokenizer};
///
/// let tokenizer = ParagraphTokenizer::new();
/// let paragraphs = tokenizer.tokenize_to_strings("one\ntwo\r\n\r\nthree").unwrap();
/// assert_eq!(paragraphs, vec!["one\ntwo", "three"]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ParagraphTokenizer;

impl ParagraphTokenizer {
    /// Create a new paragraph tokenizer.
    pub fn new() -> Self {
        ParagraphTokenizer
    }
}

/// Byte ranges of the trimmed, non-blank lines in `text`.
fn line_spans(text: &str) -> Vec<Option<(usize, usize)>> {
    let mut spans = Vec::new();
    let mut start = 0;
    let breaks = LINE_BREAK
        .find_iter(text)
        .map(|m| (m.start(), m.end()))
        .chain(std::iter::once((text.len(), text.len())));

    for (end, next) in breaks {
        let raw = &text[start..end];
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            spans.push(None);
        } else {
            let first = start + (raw.len() - raw.trim_start().len());
            spans.push(Some((first, first + trimmed.len())));
        }
        start = next;
    }
    spans
}

impl Tokenizer for ParagraphTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let mut tokens = Vec::new();
        let mut current: Option<(usize, usize)> = None;

        for span in line_spans(text).into_iter().chain(std::iter::once(None)) {
            match (span, current) {
                (Some((start, end)), None) => current = Some((start, end)),
                (Some((_, end)), Some((start, _))) => current = Some((start, end)),
                (None, Some((start, end))) => {
                    tokens.push(Token::with_offsets(
                        &text[start..end],
                        tokens.len(),
                        start,
                        end,
                    ));
                    current = None;
                }
                (None, None) => {}
            }
        }

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "paragraph"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_tokenizer() {
        let tokenizer = ParagraphTokenizer::new();
        let text = "First line\nstill first\n\n  Second\r\n \r\n\r\nThird\rend\r\r";
        let tokens: Vec<Token> = tokenizer.tokenize(text).unwrap().collect();

        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["First line\nstill first", "Second", "Third\rend"]);
        assert_eq!(tokens[1].start_offset, 26);
        assert_eq!(tokens[2].position, 2);
    }

    #[test]
    fn test_single_crlf_does_not_split() {
        let tokenizer = ParagraphTokenizer::new();
        let paragraphs = tokenizer.tokenize_to_strings("a\r\nb").unwrap();
        assert_eq!(paragraphs, vec!["a\r\nb"]);
    }

    #[test]
    fn test_tokenizer_name() {
        assert_eq!(ParagraphTokenizer::new().name(), "paragraph");
    }
}
