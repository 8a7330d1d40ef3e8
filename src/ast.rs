//! Program model produced by the analyzer and consumed by the runtime.
//!
//! Statement order is execution order. Interest names are stored exactly as
//! written; the trailing `/` requirement is enforced when the interest is
//! resolved, not here.

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl Program {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `print <expr>`
    Print(Expression),
    /// `let <name> = <expr>`
    Assignment { name: String, value: Expression },
    /// A bare expression; its value is printed like `print`.
    Expression(Expression),
}

impl Statement {
    /// The expression this statement evaluates.
    pub fn expression(&self) -> &Expression {
        match self {
            Statement::Print(expr) | Statement::Expression(expr) => expr,
            Statement::Assignment { value, .. } => value,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    StringLiteral(String),
    IntegerLiteral(i64),
    Variable(String),
    /// `interest "<name>"`
    Interest(String),
    Multiply(Box<Expression>, Box<Expression>),
    Divide(Box<Expression>, Box<Expression>),
    /// `name(argument)`: accepted by the grammar, rejected by the evaluator.
    Call {
        function: String,
        argument: Box<Expression>,
    },
}

impl Expression {
    pub fn string(value: &str) -> Self {
        Expression::StringLiteral(value.to_string())
    }

    pub fn variable(name: &str) -> Self {
        Expression::Variable(name.to_string())
    }

    pub fn interest(name: &str) -> Self {
        Expression::Interest(name.to_string())
    }

    pub fn multiply(left: Expression, right: Expression) -> Self {
        Expression::Multiply(Box::new(left), Box::new(right))
    }

    pub fn divide(left: Expression, right: Expression) -> Self {
        Expression::Divide(Box::new(left), Box::new(right))
    }
}
