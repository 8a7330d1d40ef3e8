use super::{
    super::{core::*, prelude::*},
    *,
};
use crate::ast;
use crate::tokenizer::{keyword::Keyword, symbol::Operator, token::Token};

pub fn parse_expression() -> impl Parser<Token, ast::Expression> {
    with_context(parse_multiplicative(), "expression")
}

fn expression(input: &[Token], pos: usize) -> ParseResult<ast::Expression> {
    parse_expression().parse(input, pos)
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum MultiplicativeOperator {
    Multiply,
    Divide,
}

// 乗除算 (*, /) は左結合
fn parse_multiplicative() -> impl Parser<Token, ast::Expression> {
    with_context(
        map(
            tuple2(
                parse_term(),
                many(tuple2(
                    choice(vec![
                        Box::new(map(parse_operator(Operator::Multiply), |_| {
                            MultiplicativeOperator::Multiply
                        })),
                        Box::new(map(parse_operator(Operator::Divide), |_| {
                            MultiplicativeOperator::Divide
                        })),
                    ]),
                    parse_term(),
                )),
            ),
            |(first, rest): (
                ast::Expression,
                Vec<(MultiplicativeOperator, ast::Expression)>,
            )| {
                rest.into_iter().fold(first, |left, (op, right)| match op {
                    MultiplicativeOperator::Multiply => ast::Expression::multiply(left, right),
                    MultiplicativeOperator::Divide => ast::Expression::divide(left, right),
                })
            },
        ),
        "multiplicative",
    )
}

fn parse_term() -> impl Parser<Token, ast::Expression> {
    with_context(
        choice(vec![
            Box::new(map(parse_string_literal(), ast::Expression::StringLiteral)),
            Box::new(map(parse_integer_literal(), ast::Expression::IntegerLiteral)),
            Box::new(parse_interest()),
            Box::new(parse_call()),
            Box::new(map(parse_identifier(), ast::Expression::Variable)),
            Box::new(parse_parenthesized()),
        ]),
        "term",
    )
}

fn parse_interest() -> impl Parser<Token, ast::Expression> {
    with_context(
        map(
            preceded(parse_keyword(Keyword::Interest), parse_string_literal()),
            ast::Expression::Interest,
        ),
        "interest",
    )
}

fn parse_call() -> impl Parser<Token, ast::Expression> {
    with_context(
        map(
            tuple2(
                parse_identifier(),
                delimited(
                    parse_delimiter(Delimiter::OpenParen),
                    rule(expression),
                    parse_delimiter(Delimiter::CloseParen),
                ),
            ),
            |(function, argument): (String, ast::Expression)| ast::Expression::Call {
                function,
                argument: Box::new(argument),
            },
        ),
        "call",
    )
}

fn parse_parenthesized() -> impl Parser<Token, ast::Expression> {
    with_context(
        delimited(
            parse_delimiter(Delimiter::OpenParen),
            rule(expression),
            parse_delimiter(Delimiter::CloseParen),
        ),
        "parenthesized expression",
    )
}
