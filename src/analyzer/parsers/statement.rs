use super::{
    super::{core::*, prelude::*},
    expression::parse_expression,
    *,
};
use crate::ast;
use crate::tokenizer::{keyword::Keyword, symbol::Operator, token::Token};

/// A whole script: statements separated by newlines or `;`, with any number of
/// separators allowed before the first and after the last statement.
pub fn parse_program() -> impl Parser<Token, ast::Program> {
    with_context(rule(program), "program")
}

fn program(input: &[Token], pos: usize) -> ParseResult<ast::Program> {
    let separators = many(parse_separator());
    let statement = parse_statement();

    let (mut pos, _) = separators.parse(input, pos)?;
    let mut statements = Vec::new();
    while pos < input.len() {
        let (next, parsed) = statement.parse(input, pos)?;
        statements.push(parsed);
        let (next, consumed) = separators.parse(input, next)?;
        if consumed.is_empty() {
            end_of_input().parse(input, next)?;
        }
        pos = next;
    }
    Ok((pos, ast::Program::new(statements)))
}

pub fn parse_statement() -> impl Parser<Token, ast::Statement> {
    with_context(
        choice(vec![
            Box::new(parse_print_statement()),
            Box::new(parse_assignment_statement()),
            Box::new(parse_expression_statement()),
        ]),
        "statement",
    )
}

fn parse_print_statement() -> impl Parser<Token, ast::Statement> {
    with_context(
        map(
            preceded(parse_keyword(Keyword::Print), parse_expression()),
            ast::Statement::Print,
        ),
        "print statement",
    )
}

fn parse_assignment_statement() -> impl Parser<Token, ast::Statement> {
    with_context(
        map(
            tuple3(
                preceded(parse_keyword(Keyword::Let), parse_identifier()),
                parse_operator(Operator::Assign),
                parse_expression(),
            ),
            |(name, _, value): (String, (), ast::Expression)| ast::Statement::Assignment {
                name,
                value,
            },
        ),
        "assignment statement",
    )
}

fn parse_expression_statement() -> impl Parser<Token, ast::Statement> {
    with_context(
        map(parse_expression(), ast::Statement::Expression),
        "expression statement",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::{literal::Literal, symbol::Delimiter};
    use ast::{Expression, Program, Statement};
    use pretty_assertions::assert_eq;

    fn int(value: i64) -> Token {
        Token::Literal(Literal::Integer(value))
    }

    fn parse(tokens: Vec<Token>) -> ParseResult<Program> {
        parse_program().parse(&tokens, 0)
    }

    #[test]
    fn test_print_statement() {
        let (_, program) = parse(vec![Token::Keyword(Keyword::Print), int(5)]).unwrap();
        assert_eq!(
            program.statements,
            vec![Statement::Print(Expression::IntegerLiteral(5))]
        );
    }

    #[test]
    fn test_assignment_then_use() {
        let tokens = vec![
            Token::Keyword(Keyword::Let),
            Token::Identifier("a".to_string()),
            Token::Operator(Operator::Assign),
            int(3),
            Token::Newline,
            Token::Keyword(Keyword::Print),
            Token::Identifier("a".to_string()),
            Token::Operator(Operator::Multiply),
            int(2),
        ];
        let (_, program) = parse(tokens).unwrap();
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
    fn test_bare_expression_statement() {
        let (_, program) = parse(vec![int(6), Token::Operator(Operator::Multiply), int(7)]).unwrap();
        assert_eq!(
            program.statements,
            vec![Statement::Expression(Expression::multiply(
                Expression::IntegerLiteral(6),
                Expression::IntegerLiteral(7)
            ))]
        );
    }

    #[test]
    fn test_separators_are_flexible() {
        let tokens = vec![
            Token::Newline,
            Token::Delimiter(Delimiter::Semicolon),
            int(1),
            Token::Delimiter(Delimiter::Semicolon),
            Token::Newline,
            int(2),
            Token::Delimiter(Delimiter::Semicolon),
            Token::Newline,
        ];
        let (pos, program) = parse(tokens).unwrap();
        assert_eq!(pos, 8);
        assert_eq!(program.statements.len(), 2);
    }

    #[test]
    fn test_empty_program() {
        let (_, program) = parse(vec![]).unwrap();
        assert!(program.is_empty());

        let (_, program) = parse(vec![Token::Newline]).unwrap();
        assert!(program.is_empty());
    }

    #[test]
    fn test_two_statements_on_one_line_need_separator() {
        let err = parse(vec![Token::Keyword(Keyword::Print), int(1), int(2)]).unwrap_err();
        assert_eq!(err.get_position(), 2);
    }

    #[test]
    fn test_let_requires_assignment_sign() {
        let err = parse(vec![
            Token::Keyword(Keyword::Let),
            Token::Identifier("a".to_string()),
            int(1),
        ])
        .unwrap_err();
        assert_eq!(err.get_position(), 2);
    }
}
