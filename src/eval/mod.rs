//! # Evaluation
//!
//! Executes an [`ast::Program`](crate::ast::Program) statement by statement.
//!
//! * [`value`]: the two runtime value kinds and their coercion rules
//! * [`context`]: the variable [`Environment`](context::Environment)
//! * [`expression`]: expression evaluation and arithmetic
//! * [`statement`]: `print`, `let` and bare expressions
//! * [`evaluator`]: the program driver and [`EvalError`](evaluator::EvalError)
//!
//! Evaluation is eager. Siblings are evaluated left to right, except that a
//! division evaluates its divisor first. The only suspension point is an
//! Interest sent through the [`Resolver`](crate::resolver::Resolver).

pub mod context;
pub mod evaluator;
pub mod expression;
pub mod statement;
pub mod value;

pub use context::Environment;
pub use evaluator::{EvalError, EvalResult, Evaluator};
pub use value::Value;
