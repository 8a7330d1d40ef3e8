//! # Comment Token Handling
//!
//! Line comments start with `//` or `#` and run to the end of the line. The line
//! ending itself is left in the input so it still terminates the statement.

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::not_line_ending,
    combinator::map,
    error::context,
    sequence::preceded,
};

use super::token::{ParserResult, Token};

#[tracing::instrument(level = "debug", skip(input))]
pub fn parse_comment(input: &str) -> ParserResult<Token> {
    context(
        "line comment",
        map(
            preceded(alt((tag("//"), tag("#"))), not_line_ending),
            |content: &str| Token::Comment(content.trim().to_string()),
        ),
    )(input)
}
