//! # Parser Combinators
//!
//! Building blocks composed by the statement and expression parsers.
//!
//! * **Basic**: `Equal`, `Satisfy`, `EndOfInput`
//! * **Sequential**: `Preceded`, `Delimited`, `Tuple2`, `Tuple3`
//! * **Alternative**: `Choice`
//! * **Repetition**: `Many`
//! * **Transformation**: `Map`, `AsUnit`
//! * **Recursion**: `Rule`
//! * **Error handling**: `WithContext`

use super::core::ParseError;
use super::core::ParseResult;
use super::core::Parser;
use std::fmt;
use std::marker::PhantomData;

/// Equal: Matches a specific value in the input and consumes it.
#[derive(Clone)]
pub struct Equal<I> {
    value: I,
}

impl<I> Equal<I> {
    pub fn new(value: I) -> Self {
        Self { value }
    }
}

impl<I: Clone + PartialEq + fmt::Display> Parser<I, I> for Equal<I> {
    fn parse(&self, input: &[I], pos: usize) -> ParseResult<I> {
        match input.get(pos) {
            Some(found) if *found == self.value => Ok((pos + 1, found.clone())),
            Some(found) => Err(ParseError::Unexpected {
                expected: self.value.to_string(),
                found: found.to_string(),
                position: pos,
                context: None,
            }),
            None => Err(ParseError::UnexpectedEOF {
                message: format!("expected {}", self.value),
                position: pos,
                context: None,
            }),
        }
    }
}

/// Satisfy: Consumes one token if the predicate maps it to a value.
pub struct Satisfy<I, O, F> {
    f: F,
    expected: &'static str,
    _phantom: PhantomData<(I, O)>,
}

impl<I, O, F> Satisfy<I, O, F> {
    pub fn new(f: F, expected: &'static str) -> Self {
        Self {
            f,
            expected,
            _phantom: PhantomData,
        }
    }
}

impl<I, O, F> Parser<I, O> for Satisfy<I, O, F>
where
    I: fmt::Display,
    F: Fn(&I) -> Option<O>,
{
    fn parse(&self, input: &[I], pos: usize) -> ParseResult<O> {
        match input.get(pos) {
            Some(found) => match (self.f)(found) {
                Some(output) => Ok((pos + 1, output)),
                None => Err(ParseError::Unexpected {
                    expected: self.expected.to_string(),
                    found: found.to_string(),
                    position: pos,
                    context: None,
                }),
            },
            None => Err(ParseError::UnexpectedEOF {
                message: format!("expected {}", self.expected),
                position: pos,
                context: None,
            }),
        }
    }
}

/// EndOfInput: Succeeds only when every token has been consumed.
pub struct EndOfInput<I> {
    _phantom: PhantomData<I>,
}

impl<I> EndOfInput<I> {
    pub fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

impl<I> Default for EndOfInput<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: fmt::Display> Parser<I, ()> for EndOfInput<I> {
    fn parse(&self, input: &[I], pos: usize) -> ParseResult<()> {
        match input.get(pos) {
            None => Ok((pos, ())),
            Some(found) => Err(ParseError::Unexpected {
                expected: "end of statement".to_string(),
                found: found.to_string(),
                position: pos,
                context: None,
            }),
        }
    }
}

/// Choice: Tries alternatives in order from the same position.
///
/// When every alternative fails, the error that got furthest into the input is
/// reported, since it is usually the one closest to what the author meant.
pub struct Choice<I, O> {
    parsers: Vec<Box<dyn Parser<I, O>>>,
}

impl<I, O> Choice<I, O> {
    pub fn new(parsers: Vec<Box<dyn Parser<I, O>>>) -> Self {
        Self { parsers }
    }
}

impl<I, O> Parser<I, O> for Choice<I, O> {
    fn parse(&self, input: &[I], pos: usize) -> ParseResult<O> {
        let mut furthest: Option<ParseError> = None;
        for parser in &self.parsers {
            match parser.parse(input, pos) {
                Ok(result) => return Ok(result),
                Err(err) => {
                    let replace = match &furthest {
                        Some(best) => err.get_position() > best.get_position(),
                        None => true,
                    };
                    if replace {
                        furthest = Some(err);
                    }
                }
            }
        }
        Err(furthest.unwrap_or(ParseError::Failure {
            message: "no alternative matched".to_string(),
            position: pos,
            context: None,
        }))
    }
}

/// Preceded: Runs two parsers and keeps the second result.
pub struct Preceded<P1, P2, O1> {
    parser1: P1,
    parser2: P2,
    _phantom: PhantomData<O1>,
}

impl<P1, P2, O1> Preceded<P1, P2, O1> {
    pub fn new(parser1: P1, parser2: P2) -> Self {
        Self {
            parser1,
            parser2,
            _phantom: PhantomData,
        }
    }
}

impl<I, O1, O2, P1, P2> Parser<I, O2> for Preceded<P1, P2, O1>
where
    P1: Parser<I, O1>,
    P2: Parser<I, O2>,
{
    fn parse(&self, input: &[I], pos: usize) -> ParseResult<O2> {
        let (pos, _) = self.parser1.parse(input, pos)?;
        self.parser2.parse(input, pos)
    }
}

/// Delimited: Runs three parsers and keeps the middle result.
pub struct Delimited<L, P, R, OL, OR> {
    left: L,
    parser: P,
    right: R,
    _phantom: PhantomData<(OL, OR)>,
}

impl<L, P, R, OL, OR> Delimited<L, P, R, OL, OR> {
    pub fn new(left: L, parser: P, right: R) -> Self {
        Self {
            left,
            parser,
            right,
            _phantom: PhantomData,
        }
    }
}

impl<I, O, OL, OR, L, P, R> Parser<I, O> for Delimited<L, P, R, OL, OR>
where
    L: Parser<I, OL>,
    P: Parser<I, O>,
    R: Parser<I, OR>,
{
    fn parse(&self, input: &[I], pos: usize) -> ParseResult<O> {
        let (pos, _) = self.left.parse(input, pos)?;
        let (pos, output) = self.parser.parse(input, pos)?;
        let (pos, _) = self.right.parse(input, pos)?;
        Ok((pos, output))
    }
}

pub struct Tuple2<P1, P2> {
    parser1: P1,
    parser2: P2,
}

impl<P1, P2> Tuple2<P1, P2> {
    pub fn new(parser1: P1, parser2: P2) -> Self {
        Self { parser1, parser2 }
    }
}

impl<I, O1, O2, P1, P2> Parser<I, (O1, O2)> for Tuple2<P1, P2>
where
    P1: Parser<I, O1>,
    P2: Parser<I, O2>,
{
    fn parse(&self, input: &[I], pos: usize) -> ParseResult<(O1, O2)> {
        let (pos, o1) = self.parser1.parse(input, pos)?;
        let (pos, o2) = self.parser2.parse(input, pos)?;
        Ok((pos, (o1, o2)))
    }
}

pub struct Tuple3<P1, P2, P3> {
    parser1: P1,
    parser2: P2,
    parser3: P3,
}

impl<P1, P2, P3> Tuple3<P1, P2, P3> {
    pub fn new(parser1: P1, parser2: P2, parser3: P3) -> Self {
        Self {
            parser1,
            parser2,
            parser3,
        }
    }
}

impl<I, O1, O2, O3, P1, P2, P3> Parser<I, (O1, O2, O3)> for Tuple3<P1, P2, P3>
where
    P1: Parser<I, O1>,
    P2: Parser<I, O2>,
    P3: Parser<I, O3>,
{
    fn parse(&self, input: &[I], pos: usize) -> ParseResult<(O1, O2, O3)> {
        let (pos, o1) = self.parser1.parse(input, pos)?;
        let (pos, o2) = self.parser2.parse(input, pos)?;
        let (pos, o3) = self.parser3.parse(input, pos)?;
        Ok((pos, (o1, o2, o3)))
    }
}

/// Map: Transforms the output of a parser.
pub struct Map<P, F, A> {
    parser: P,
    f: F,
    _phantom: PhantomData<A>,
}

impl<P, F, A> Map<P, F, A> {
    pub fn new(parser: P, f: F) -> Self {
        Self {
            parser,
            f,
            _phantom: PhantomData,
        }
    }
}

impl<I, A, B, P, F> Parser<I, B> for Map<P, F, A>
where
    P: Parser<I, A>,
    F: Fn(A) -> B,
{
    fn parse(&self, input: &[I], pos: usize) -> ParseResult<B> {
        let (pos, a) = self.parser.parse(input, pos)?;
        Ok((pos, (self.f)(a)))
    }
}

/// AsUnit: Discards the output of a parser.
pub struct AsUnit<P, O> {
    parser: P,
    _phantom: PhantomData<O>,
}

impl<P, O> AsUnit<P, O> {
    pub fn new(parser: P) -> Self {
        Self {
            parser,
            _phantom: PhantomData,
        }
    }
}

impl<I, O, P> Parser<I, ()> for AsUnit<P, O>
where
    P: Parser<I, O>,
{
    fn parse(&self, input: &[I], pos: usize) -> ParseResult<()> {
        let (pos, _) = self.parser.parse(input, pos)?;
        Ok((pos, ()))
    }
}

/// Many: Applies a parser zero or more times.
pub struct Many<P> {
    parser: P,
}

impl<P> Many<P> {
    pub fn new(parser: P) -> Self {
        Self { parser }
    }
}

impl<I, O, P> Parser<I, Vec<O>> for Many<P>
where
    P: Parser<I, O>,
{
    fn parse(&self, input: &[I], mut pos: usize) -> ParseResult<Vec<O>> {
        let mut results = Vec::new();
        while let Ok((next_pos, value)) = self.parser.parse(input, pos) {
            // a parser that consumes nothing would loop forever
            if next_pos == pos {
                break;
            }
            results.push(value);
            pos = next_pos;
        }
        Ok((pos, results))
    }
}

/// Rule: Wraps a plain parsing function.
///
/// Recursive grammar rules are written as functions so that their types stay
/// nameable; `Rule` lets them take part in combinators.
pub struct Rule<I, O> {
    f: fn(&[I], usize) -> ParseResult<O>,
}

impl<I, O> Rule<I, O> {
    pub fn new(f: fn(&[I], usize) -> ParseResult<O>) -> Self {
        Self { f }
    }
}

impl<I, O> Parser<I, O> for Rule<I, O> {
    fn parse(&self, input: &[I], pos: usize) -> ParseResult<O> {
        (self.f)(input, pos)
    }
}

/// WithContext: Annotates errors with the name of the rule being parsed.
pub struct WithContext<P> {
    parser: P,
    context: &'static str,
}

impl<P> WithContext<P> {
    pub fn new(parser: P, context: &'static str) -> Self {
        Self { parser, context }
    }
}

impl<I, O, P> Parser<I, O> for WithContext<P>
where
    P: Parser<I, O>,
{
    fn parse(&self, input: &[I], pos: usize) -> ParseResult<O> {
        self.parser
            .parse(input, pos)
            .map_err(|e| e.with_context(self.context))
    }
}
