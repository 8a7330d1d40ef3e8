//! # ndnc
//!
//! Interpreter for small scripts that print values, do integer arithmetic
//! and fetch named data over Named Data Networking.
//!
//! ```text
//! Source → Tokenizer → Preprocessor → Analyzer → Runtime → Evaluator ⇄ Resolver ⇄ Network
//! ```
//!
//! ```rust
//! use ndnc::{analyzer::parse_source, config::NdncConfig, runtime::Runner};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> ndnc::Result<()> {
//! let program = parse_source("let a = 3\nprint a * 2")?;
//! let mut out = Vec::new();
//! Runner::offline(&NdncConfig::default()).run(&program, &mut out).await?;
//! assert_eq!(out, b"6\n");
//! # Ok(())
//! # }
//! ```

pub mod analyzer;
pub mod ast;
pub mod config;
pub mod error;
pub mod eval;
pub mod network;
pub mod preprocessor;
pub mod resolver;
pub mod runtime;
pub mod tokenizer;

pub use error::{Error, Result};
