//! # Tokenizer
//!
//! Lexical analysis for ndnc scripts. Raw script text is turned into a stream of
//! [`TokenSpan`](token::TokenSpan)s, each carrying its line and column so that the
//! analyzer can point at the offending token when a script is malformed.
//!
//! ## Component Structure
//!
//! * [`token`]: Core token types and the [`Tokenizer`](token::Tokenizer) driver
//! * [`keyword`]: Reserved words (`print`, `let`, `interest`)
//! * [`symbol`]: Operators and delimiters
//! * [`literal`]: String and integer literals
//! * [`whitespace`]: Whitespace and newline handling
//! * [`comment`]: `//` and `#` line comments
//!
//! Newlines are statement terminators, so they survive preprocessing while
//! whitespace and comments do not.
//!
//! ```rust
//! use ndnc::tokenizer::token::{Token, Tokenizer};
//!
//! let tokens = Tokenizer::new().tokenize("print 6 * 7").unwrap();
//! assert!(matches!(tokens[0].token, Token::Keyword(_)));
//! ```

pub mod comment;
pub mod keyword;
pub mod literal;
pub mod symbol;
pub mod token;
pub mod whitespace;
