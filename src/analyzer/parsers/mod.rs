pub mod expression;
pub mod statement;

use crate::tokenizer::{
    keyword::Keyword,
    literal::Literal,
    symbol::{Delimiter, Operator},
    token::Token,
};

use super::{core::*, prelude::*};

pub fn parse_keyword(keyword: Keyword) -> impl Parser<Token, ()> {
    as_unit(equal(Token::Keyword(keyword)))
}

pub fn parse_operator(operator: Operator) -> impl Parser<Token, ()> {
    as_unit(equal(Token::Operator(operator)))
}

pub fn parse_delimiter(delimiter: Delimiter) -> impl Parser<Token, ()> {
    as_unit(equal(Token::Delimiter(delimiter)))
}

pub fn parse_identifier() -> impl Parser<Token, String> {
    satisfy(
        |token: &Token| match token {
            Token::Identifier(name) => Some(name.clone()),
            _ => None,
        },
        "identifier",
    )
}

pub fn parse_string_literal() -> impl Parser<Token, String> {
    satisfy(
        |token: &Token| match token {
            Token::Literal(Literal::String(value)) => Some(value.clone()),
            _ => None,
        },
        "string literal",
    )
}

pub fn parse_integer_literal() -> impl Parser<Token, i64> {
    satisfy(
        |token: &Token| match token {
            Token::Literal(Literal::Integer(value)) => Some(*value),
            _ => None,
        },
        "integer literal",
    )
}

/// A newline or `;`.
pub fn parse_separator() -> impl Parser<Token, ()> {
    satisfy(
        |token: &Token| match token {
            Token::Newline | Token::Delimiter(Delimiter::Semicolon) => Some(()),
            _ => None,
        },
        "newline or `;`",
    )
}
