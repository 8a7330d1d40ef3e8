use thiserror::Error;

use crate::analyzer::ParseError;
use crate::config::ConfigError;
use crate::eval::EvalError;
use crate::tokenizer::token::{Span, TokenizerError};

/// Exit status for an interest name without a trailing `/`.
pub const EXIT_INVALID_NAME: i32 = 3;
pub const EXIT_FAILURE: i32 = 1;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Tokenize(#[from] TokenizerError),
    #[error("Parse error at {span}: {error}")]
    Parse { error: ParseError, span: Span },
    #[error("{0}")]
    Eval(#[from] EvalError),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Process exit status the binary reports for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Eval(EvalError::InvalidName { .. }) => EXIT_INVALID_NAME,
            _ => EXIT_FAILURE,
        }
    }
}
