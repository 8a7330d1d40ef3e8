//! # Analyzer
//!
//! Turns the preprocessed token stream into an [`ast::Program`].
//!
//! The analyzer is a small parser-combinator library over `&[Token]`:
//!
//! * [`core`]: the [`Parser`] trait and [`ParseError`]
//! * [`combinators`]: sequencing, alternation and repetition building blocks
//! * [`prelude`]: constructor functions for the combinators
//! * [`parsers`]: the ndnc grammar itself (statements and expressions)
//!
//! Positions reported by [`ParseError`] are token indices. [`parse_source`]
//! maps them back to line and column through the token spans.

pub mod combinators;
pub mod core;
pub mod parsers;
pub mod prelude;

pub use core::ParseError;
pub use core::ParseResult;
pub use core::Parser;

pub use crate::ast;

use crate::preprocessor::{Preprocessor, TokenPreprocessor};
use crate::tokenizer::token::{Span, Token, TokenSpan, Tokenizer};

/// Tokenizes, preprocesses and parses a whole script.
#[tracing::instrument(level = "debug", skip(source))]
pub fn parse_source(source: &str) -> crate::Result<ast::Program> {
    let spans = Tokenizer::new().tokenize(source)?;
    let spans = TokenPreprocessor::new().process(spans);
    let tokens: Vec<Token> = spans.iter().map(|span| span.token.clone()).collect();

    match parsers::statement::parse_program().parse(&tokens, 0) {
        Ok((_, program)) => {
            tracing::debug!(statements = program.statements.len(), "parsed program");
            Ok(program)
        }
        Err(error) => {
            let span = span_at(&spans, error.get_position(), source);
            Err(crate::Error::Parse { error, span })
        }
    }
}

/// Location of the token at `position`, or of the end of input when the parser
/// ran out of tokens.
fn span_at(spans: &[TokenSpan], position: usize, source: &str) -> Span {
    if let Some(span) = spans.get(position) {
        return span.span();
    }
    let end = source.len();
    let line = source.matches('\n').count() + 1;
    let column = source
        .rsplit('\n')
        .next()
        .map_or(0, |last| last.chars().count())
        + 1;
    Span {
        start: end,
        end,
        line,
        column,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ast::{Expression, Statement};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_source() {
        let program = parse_source("let a = 3\nprint a * 2 // six\n").unwrap();
        assert_eq!(
            program.statements,
            vec![
                Statement::Assignment {
                    name: "a".to_string(),
                    value: Expression::IntegerLiteral(3),
                },
                Statement::Print(Expression::multiply(
                    Expression::variable("a"),
                    Expression::IntegerLiteral(2)
                )),
            ]
        );
    }

    #[test]
    fn test_parse_error_points_at_token() {
        let err = parse_source("print 1\nprint 2 3").unwrap_err();
        match err {
            crate::Error::Parse { span, .. } => {
                assert_eq!(span.line, 2);
                assert_eq!(span.column, 9);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_error_at_end_of_input() {
        let err = parse_source("let a =").unwrap_err();
        match err {
            crate::Error::Parse { span, .. } => {
                assert_eq!(span.line, 1);
                assert_eq!(span.column, 8);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_tokenizer_error_is_surfaced() {
        let err = parse_source("print @").unwrap_err();
        assert!(matches!(err, crate::Error::Tokenize(_)));
    }
}
