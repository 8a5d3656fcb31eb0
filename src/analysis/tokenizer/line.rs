//! Line tokenizer implementation.

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;

/// A tokenizer that emits one token per non-empty line.
///
/// Handles `\n`, `\r\n` and lone `\r` terminators. Lines are trimmed; lines
/// that are blank after trimming are skipped.
#[derive(Clone, Debug, Default)]
pub struct LineTokenizer;

impl LineTokenizer {
    /// Create a new line tokenizer.
    pub fn new() -> Self {
        LineTokenizer
    }
}

impl Tokenizer for LineTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let mut tokens = Vec::new();
        let mut offset = 0;

        for raw in text.split(['\n', '\r']) {
            let line = raw.trim();
            if !line.is_empty() {
                let start = offset + (raw.len() - raw.trim_start().len());
                tokens.push(Token::with_offsets(
                    line,
                    tokens.len(),
                    start,
                    start + line.len(),
                ));
            }
            offset += raw.len() + 1;
        }

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "line"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_tokenizer() {
        let tokenizer = LineTokenizer::new();
        let tokens: Vec<Token> = tokenizer
            .tokenize("first line\r\nsecond line\n\n  third\rfourth")
            .unwrap()
            .collect();

        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["first line", "second line", "third", "fourth"]);
        assert_eq!(tokens[2].start_offset, 27);
    }

    #[test]
    fn test_tokenizer_name() {
        assert_eq!(LineTokenizer::new().name(), "line");
    }
}
