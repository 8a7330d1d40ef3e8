use nom::{
    branch::alt,
    bytes::complete::is_not,
    character::complete::{char, digit1},
    combinator::{map, map_res, opt, recognize, value},
    error::context,
    multi::fold_many0,
    sequence::{delimited, pair, preceded},
};

use super::token::{ParserResult, Token};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    String(String),
    Integer(i64),
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Literal::String(s) => write!(f, "{:?}", s),
            Literal::Integer(i) => write!(f, "{}", i),
        }
    }
}

// 文字列中のエスケープ
#[tracing::instrument(level = "debug", skip(input))]
fn parse_escaped_char(input: &str) -> ParserResult<char> {
    context(
        "escape sequence",
        preceded(
            char('\\'),
            alt((
                value('\n', char('n')),
                value('\t', char('t')),
                value('\\', char('\\')),
                value('"', char('"')),
            )),
        ),
    )(input)
}

#[tracing::instrument(level = "debug", skip(input))]
fn parse_string_literal(input: &str) -> ParserResult<Literal> {
    context(
        "string literal",
        map(
            delimited(
                char('"'),
                fold_many0(
                    alt((
                        map(is_not("\"\\"), |run: &str| run.to_string()),
                        map(parse_escaped_char, |c| c.to_string()),
                    )),
                    String::new,
                    |mut acc, part| {
                        acc.push_str(&part);
                        acc
                    },
                ),
                char('"'),
            ),
            Literal::String,
        ),
    )(input)
}

#[tracing::instrument(level = "debug", skip(input))]
fn parse_integer_literal(input: &str) -> ParserResult<Literal> {
    context(
        "integer literal",
        map_res(recognize(pair(opt(char('-')), digit1)), |s: &str| {
            s.parse::<i64>().map(Literal::Integer)
        }),
    )(input)
}

#[tracing::instrument(level = "debug", skip(input))]
pub fn parse_literal(input: &str) -> ParserResult<Token> {
    context(
        "literal",
        map(
            alt((parse_string_literal, parse_integer_literal)),
            Token::Literal,
        ),
    )(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_string() {
        let (rest, result) = parse_string_literal("\"hello world\"").unwrap();
        assert_eq!(rest, "");
        assert_eq!(result, Literal::String("hello world".to_string()));
    }

    #[test]
    fn test_empty_string() {
        let (rest, result) = parse_string_literal("\"\" rest").unwrap();
        assert_eq!(rest, " rest");
        assert_eq!(result, Literal::String(String::new()));
    }

    #[test]
    fn test_string_escapes() {
        let (_, result) = parse_string_literal(r#""say \"hi\"\n\\done""#).unwrap();
        assert_eq!(result, Literal::String("say \"hi\"\n\\done".to_string()));
    }

    #[test]
    fn test_unterminated_string() {
        assert!(parse_string_literal("\"/data/ryu/").is_err());
    }

    #[test]
    fn test_number_literals() {
        let (rest, result) = parse_integer_literal("123").unwrap();
        assert_eq!(result, Literal::Integer(123));
        assert_eq!(rest, "");

        let (rest, result) = parse_integer_literal("-42 * 2").unwrap();
        assert_eq!(result, Literal::Integer(-42));
        assert_eq!(rest, " * 2");
    }

    #[test]
    fn test_integer_out_of_range() {
        assert!(parse_integer_literal("99999999999999999999").is_err());
    }
}
