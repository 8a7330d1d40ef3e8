use std::io::Write;

use thiserror::Error;

use super::{
    context::Environment,
    statement::{StatementEvaluator, StatementResult},
};
use crate::ast::Program;
use crate::network::NetworkError;
use crate::resolver::Resolver;

#[derive(Error, Debug)]
pub enum EvalError {
    #[error("invalid interest name `{name}`: names must end with `/`")]
    InvalidName { name: String },
    #[error("undefined variable `{0}`")]
    UndefinedVariable(String),
    #[error("type mismatch: `{operation}` expects integers, found {left} and {right}")]
    TypeMismatch {
        operation: &'static str,
        left: &'static str,
        right: &'static str,
    },
    #[error("division by zero")]
    DivisionByZero,
    #[error("integer overflow in `{0}`")]
    Overflow(&'static str),
    #[error("interest for `{name}` failed: {source}")]
    Network {
        name: String,
        #[source]
        source: NetworkError,
    },
    #[error("unsupported node: {0}")]
    UnsupportedNode(String),
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

pub type EvalResult<T> = Result<T, EvalError>;

#[derive(Default)]
pub struct Evaluator {
    statement_evaluator: StatementEvaluator,
}

impl Evaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs every statement in order, stopping at the first failure.
    pub async fn execute<W: Write>(
        &self,
        program: &Program,
        env: &mut Environment,
        resolver: &mut Resolver,
        out: &mut W,
    ) -> EvalResult<Vec<StatementResult>> {
        let mut results = Vec::with_capacity(program.statements.len());
        for statement in &program.statements {
            let result = self
                .statement_evaluator
                .eval_statement(statement, env, resolver, out)
                .await?;
            results.push(result);
        }
        Ok(results)
    }
}
