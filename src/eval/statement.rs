use std::io::Write;
use std::sync::Arc;

use tracing::debug;

use super::{context::Environment, expression::ExpressionEvaluator, value::Value};
use crate::ast::{Expression, Statement};
use crate::eval::evaluator::EvalResult;
use crate::resolver::Resolver;

/// What a statement did, for callers that want more than the output stream.
#[derive(Debug, Clone, PartialEq)]
pub enum StatementResult {
    /// The value was written to the output.
    Printed(Value),
    /// The value was bound to a variable.
    Assigned { name: String, value: Value },
}

pub struct StatementEvaluator {
    pub expression_evaluator: Arc<ExpressionEvaluator>,
}

impl Default for StatementEvaluator {
    fn default() -> Self {
        Self {
            expression_evaluator: Arc::new(ExpressionEvaluator::new()),
        }
    }
}

impl StatementEvaluator {
    pub fn new(expression_evaluator: Arc<ExpressionEvaluator>) -> Self {
        Self {
            expression_evaluator,
        }
    }

    pub async fn eval_statement<W: Write>(
        &self,
        statement: &Statement,
        env: &mut Environment,
        resolver: &mut Resolver,
        out: &mut W,
    ) -> EvalResult<StatementResult> {
        match statement {
            // a bare expression is printed exactly like `print`
            Statement::Print(expr) | Statement::Expression(expr) => {
                self.eval_print(expr, env, resolver, out).await
            }
            Statement::Assignment { name, value } => {
                self.eval_assignment(name, value, env, resolver).await
            }
        }
    }

    async fn eval_print<W: Write>(
        &self,
        expr: &Expression,
        env: &Environment,
        resolver: &mut Resolver,
        out: &mut W,
    ) -> EvalResult<StatementResult> {
        let value = self.eval_expression(expr, env, resolver).await?;
        writeln!(out, "{}", value)?;
        out.flush()?;
        Ok(StatementResult::Printed(value))
    }

    async fn eval_assignment(
        &self,
        name: &str,
        expr: &Expression,
        env: &mut Environment,
        resolver: &mut Resolver,
    ) -> EvalResult<StatementResult> {
        let value = self.eval_expression(expr, env, resolver).await?;
        debug!(%name, value = %value, "assign");
        env.assign(name, value.clone());
        Ok(StatementResult::Assigned {
            name: name.to_string(),
            value,
        })
    }

    pub async fn eval_expression(
        &self,
        expr: &Expression,
        env: &Environment,
        resolver: &mut Resolver,
    ) -> EvalResult<Value> {
        self.expression_evaluator
            .eval_expression(expr, env, resolver)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::evaluator::EvalError;
    use crate::resolver::LocalStore;

    async fn run(statement: &Statement, env: &mut Environment) -> (EvalResult<StatementResult>, String) {
        let mut resolver = Resolver::offline(LocalStore::default());
        let mut out = Vec::new();
        let result = StatementEvaluator::default()
            .eval_statement(statement, env, &mut resolver, &mut out)
            .await;
        (result, String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn test_print_writes_line() {
        let mut env = Environment::new();
        let (result, out) = run(&Statement::Print(Expression::IntegerLiteral(5)), &mut env).await;
        assert_eq!(result.unwrap(), StatementResult::Printed(Value::Integer(5)));
        assert_eq!(out, "5\n");
    }

    #[tokio::test]
    async fn test_bare_expression_prints() {
        let mut env = Environment::new();
        let statement = Statement::Expression(Expression::multiply(
            Expression::IntegerLiteral(6),
            Expression::IntegerLiteral(7),
        ));
        let (_, out) = run(&statement, &mut env).await;
        assert_eq!(out, "42\n");
    }

    #[tokio::test]
    async fn test_assignment_is_silent() {
        let mut env = Environment::new();
        let statement = Statement::Assignment {
            name: "x".to_string(),
            value: Expression::IntegerLiteral(10),
        };
        let (result, out) = run(&statement, &mut env).await;
        assert!(matches!(result, Ok(StatementResult::Assigned { .. })));
        assert_eq!(out, "");
        assert_eq!(env.lookup("x"), Some(&Value::Integer(10)));
    }

    #[tokio::test]
    async fn test_failed_print_writes_nothing() {
        let mut env = Environment::new();
        let (result, out) = run(&Statement::Print(Expression::variable("nope")), &mut env).await;
        assert!(matches!(result, Err(EvalError::UndefinedVariable(_))));
        assert_eq!(out, "");
    }
}
