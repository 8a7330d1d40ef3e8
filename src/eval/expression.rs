use async_recursion::async_recursion;
use tracing::debug;

use super::context::Environment;
use super::value::Value;
use crate::ast::Expression;
use crate::eval::evaluator::{EvalError, EvalResult};
use crate::resolver::Resolver;

#[derive(Debug, Default)]
pub struct ExpressionEvaluator;

impl ExpressionEvaluator {
    pub fn new() -> Self {
        Self
    }

    #[async_recursion]
    pub async fn eval_expression(
        &self,
        expr: &Expression,
        env: &Environment,
        resolver: &mut Resolver,
    ) -> EvalResult<Value> {
        match expr {
            Expression::StringLiteral(text) => Ok(Value::Text(text.clone())),
            Expression::IntegerLiteral(value) => Ok(Value::Integer(*value)),
            Expression::Variable(name) => Self::eval_variable(name, env),
            Expression::Interest(name) => resolver.resolve(name).await,
            Expression::Multiply(left, right) => {
                let left = self.eval_expression(left, env, resolver).await?;
                let right = self.eval_expression(right, env, resolver).await?;
                Self::multiply(&left, &right)
            }
            Expression::Divide(left, right) => self.eval_divide(left, right, env, resolver).await,
            Expression::Call { function, .. } => {
                Err(EvalError::UnsupportedNode(format!("call to `{}`", function)))
            }
        }
    }

    fn eval_variable(name: &str, env: &Environment) -> EvalResult<Value> {
        env.lookup(name)
            .cloned()
            .ok_or_else(|| EvalError::UndefinedVariable(name.to_string()))
    }

    /// The divisor is evaluated first so that a zero divisor fails before
    /// the dividend has any effect (including network access).
    async fn eval_divide(
        &self,
        left: &Expression,
        right: &Expression,
        env: &Environment,
        resolver: &mut Resolver,
    ) -> EvalResult<Value> {
        let divisor = self.eval_expression(right, env, resolver).await?;
        if divisor == Value::Integer(0) {
            debug!("zero divisor, dividend not evaluated");
            return Err(EvalError::DivisionByZero);
        }
        let dividend = self.eval_expression(left, env, resolver).await?;
        Self::divide(&dividend, &divisor)
    }

    pub fn multiply(left: &Value, right: &Value) -> EvalResult<Value> {
        let (l, r) = Self::integers("*", left, right)?;
        l.checked_mul(r)
            .map(Value::Integer)
            .ok_or(EvalError::Overflow("*"))
    }

    pub fn divide(left: &Value, right: &Value) -> EvalResult<Value> {
        let (l, r) = Self::integers("/", left, right)?;
        if r == 0 {
            return Err(EvalError::DivisionByZero);
        }
        floor_div(l, r)
            .map(Value::Integer)
            .ok_or(EvalError::Overflow("/"))
    }

    fn integers(operation: &'static str, left: &Value, right: &Value) -> EvalResult<(i64, i64)> {
        match (left, right) {
            (Value::Integer(l), Value::Integer(r)) => Ok((*l, *r)),
            _ => Err(EvalError::TypeMismatch {
                operation,
                left: left.type_name(),
                right: right.type_name(),
            }),
        }
    }
}

/// Integer division rounding toward negative infinity. `None` on overflow.
pub fn floor_div(l: i64, r: i64) -> Option<i64> {
    let quotient = l.checked_div(r)?;
    if l % r != 0 && ((l < 0) != (r < 0)) {
        quotient.checked_sub(1)
    } else {
        Some(quotient)
    }
}
