//! # Preprocessor
//!
//! Sits between the tokenizer and the analyzer:
//!
//! ```text
//! Source Code → Tokenizer → Preprocessor → Analyzer → Runtime
//! ```
//!
//! Comments and whitespace are filtered out of the token stream. Newlines are
//! kept because they terminate statements, but runs of them collapse into a
//! single newline token.

use crate::tokenizer::token::{Token, TokenSpan};

/// A trait for preprocessing different types of input
pub trait Preprocessor<T, U = T> {
    fn process(&self, input: T) -> U;
}

#[derive(Debug, Default)]
pub struct TokenPreprocessor {}

impl TokenPreprocessor {
    pub fn new() -> Self {
        Self {}
    }
}

impl Preprocessor<Vec<TokenSpan>> for TokenPreprocessor {
    fn process(&self, input: Vec<TokenSpan>) -> Vec<TokenSpan> {
        let mut output: Vec<TokenSpan> = Vec::with_capacity(input.len());
        for span in input {
            match span.token {
                Token::Whitespace(_) | Token::Comment(_) => continue,
                Token::Newline
                    if output
                        .last()
                        .is_some_and(|last| last.token == Token::Newline) =>
                {
                    continue
                }
                _ => output.push(span),
            }
        }
        output
    }
}
