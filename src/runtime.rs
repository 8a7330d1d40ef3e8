//! # Runtime
//!
//! Chooses how a program runs before its first statement executes.
//!
//! A static pre-scan ([`needs_network`]) decides whether a session is wanted.
//! Programs that never touch the network run in [`ExecutionMode::Direct`].
//! Otherwise the [`Runner`] opens a session through its
//! [`SessionConnector`] and runs in [`ExecutionMode::Networked`], releasing
//! the session on every exit path. If the session cannot be opened the run
//! degrades to `Direct`, and interests are answered from local or synthetic
//! data.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::ast::{Expression, Program};
use crate::config::NdncConfig;
use crate::eval::{EvalResult, Environment, Evaluator};
use crate::network::{FaceConnector, SessionConnector};
use crate::resolver::{LocalStore, Resolver};

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum ExecutionMode {
    Direct,
    Networked,
}

/// Whether running `program` may need a session.
///
/// Any variable reference counts, since no value-flow analysis tracks whether
/// a variable was bound from an interest. This over-approximation is
/// intentional: some purely local scripts will open a session they never use.
pub fn needs_network(program: &Program) -> bool {
    program
        .statements
        .iter()
        .any(|statement| expression_needs_network(statement.expression()))
}

fn expression_needs_network(expr: &Expression) -> bool {
    match expr {
        Expression::Interest(_) | Expression::Variable(_) => true,
        Expression::StringLiteral(_) | Expression::IntegerLiteral(_) => false,
        Expression::Multiply(left, right) | Expression::Divide(left, right) => {
            expression_needs_network(left) || expression_needs_network(right)
        }
        Expression::Call { argument, .. } => expression_needs_network(argument),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub mode: ExecutionMode,
    /// A session was wanted but the run went ahead without one.
    pub degraded: bool,
    pub environment: Environment,
}

pub struct Runner {
    store: LocalStore,
    interest_lifetime: Duration,
    connector: Option<Arc<dyn SessionConnector>>,
    evaluator: Evaluator,
}

impl Runner {
    /// Runner that connects a face to `config.face` when a session is needed.
    pub fn new(config: &NdncConfig) -> Self {
        let connector = FaceConnector::new(config.face.clone(), config.connect_timeout);
        Self::with_connector(config, Arc::new(connector))
    }

    pub fn with_connector(config: &NdncConfig, connector: Arc<dyn SessionConnector>) -> Self {
        Self {
            store: config.local_store(),
            interest_lifetime: config.interest_lifetime,
            connector: Some(connector),
            evaluator: Evaluator::new(),
        }
    }

    /// Runner that never opens a session.
    pub fn offline(config: &NdncConfig) -> Self {
        Self {
            store: config.local_store(),
            interest_lifetime: config.interest_lifetime,
            connector: None,
            evaluator: Evaluator::new(),
        }
    }

    pub async fn run<W: Write>(&self, program: &Program, out: &mut W) -> EvalResult<RunReport> {
        let mut environment = Environment::new();

        if !needs_network(program) {
            debug!(mode = %ExecutionMode::Direct, "program needs no session");
            self.run_direct(program, &mut environment, out).await?;
            return Ok(RunReport {
                mode: ExecutionMode::Direct,
                degraded: false,
                environment,
            });
        }

        let Some(connector) = &self.connector else {
            info!("offline run requested, interests use local data");
            self.run_direct(program, &mut environment, out).await?;
            return Ok(RunReport {
                mode: ExecutionMode::Direct,
                degraded: true,
                environment,
            });
        };

        match connector.open().await {
            Ok(session) => {
                info!(mode = %ExecutionMode::Networked, "session opened");
                let mut resolver = Resolver::with_session(self.store.clone(), session)
                    .with_interest_lifetime(self.interest_lifetime);
                let result = self
                    .evaluator
                    .execute(program, &mut environment, &mut resolver, out)
                    .await;
                resolver.release().await;
                result?;
                Ok(RunReport {
                    mode: ExecutionMode::Networked,
                    degraded: false,
                    environment,
                })
            }
            Err(e) => {
                warn!(error = %e, "could not open session, falling back to offline data");
                self.run_direct(program, &mut environment, out).await?;
                Ok(RunReport {
                    mode: ExecutionMode::Direct,
                    degraded: true,
                    environment,
                })
            }
        }
    }

    async fn run_direct<W: Write>(
        &self,
        program: &Program,
        environment: &mut Environment,
        out: &mut W,
    ) -> EvalResult<()> {
        let mut resolver = Resolver::offline(self.store.clone());
        self.evaluator
            .execute(program, environment, &mut resolver, out)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Statement;
    use crate::eval::{EvalError, Value};
    use crate::network::session::{MockContentSession, MockSessionConnector};
    use crate::network::{ContentSession, Data, NetworkError};

    fn program(statements: Vec<Statement>) -> Program {
        Program::new(statements)
    }

    fn print(expr: Expression) -> Statement {
        Statement::Print(expr)
    }

    fn refusing_connector() -> Arc<MockSessionConnector> {
        let mut connector = MockSessionConnector::new();
        connector
            .expect_open()
            .times(1)
            .returning(|| Err(NetworkError::InvalidAddress("test".to_string())));
        Arc::new(connector)
    }

    #[test]
    fn test_needs_network() {
        assert!(!needs_network(&program(vec![print(Expression::multiply(
            Expression::IntegerLiteral(6),
            Expression::IntegerLiteral(7),
        ))])));
        assert!(needs_network(&program(vec![print(Expression::divide(
            Expression::IntegerLiteral(6),
            Expression::interest("/data/ryu/"),
        ))])));
        // variables are assumed to be network-derived
        assert!(needs_network(&program(vec![
            Statement::Assignment {
                name: "a".to_string(),
                value: Expression::IntegerLiteral(3),
            },
            print(Expression::variable("a")),
        ])));
        assert!(needs_network(&program(vec![print(Expression::Call {
            function: "f".to_string(),
            argument: Box::new(Expression::interest("/x/")),
        })])));
        assert!(!needs_network(&Program::default()));
    }

    #[tokio::test]
    async fn test_direct_mode_never_connects() {
        let mut connector = MockSessionConnector::new();
        connector.expect_open().never();
        let runner = Runner::with_connector(&NdncConfig::default(), Arc::new(connector));

        let mut out = Vec::new();
        let report = runner
            .run(&program(vec![print(Expression::string("hello"))]), &mut out)
            .await
            .unwrap();
        assert_eq!(report.mode, ExecutionMode::Direct);
        assert!(!report.degraded);
        assert_eq!(String::from_utf8(out).unwrap(), "hello\n");
    }

    #[tokio::test]
    async fn test_networked_mode_releases_session() {
        let mut connector = MockSessionConnector::new();
        connector.expect_open().times(1).returning(|| {
            let mut session = MockContentSession::new();
            session
                .expect_express_interest()
                .times(1)
                .returning(|interest| Ok(Data::new(interest.name.clone(), "21")));
            session.expect_close().times(1).returning(|| Ok(()));
            Ok(Box::new(session) as Box<dyn ContentSession>)
        });
        let runner = Runner::with_connector(&NdncConfig::default(), Arc::new(connector));

        let mut out = Vec::new();
        let report = runner
            .run(
                &program(vec![
                    Statement::Assignment {
                        name: "n".to_string(),
                        value: Expression::interest("/data/ryu/"),
                    },
                    print(Expression::multiply(
                        Expression::variable("n"),
                        Expression::IntegerLiteral(2),
                    )),
                    print(Expression::interest("/data/ryu-local/")),
                ]),
                &mut out,
            )
            .await
            .unwrap();
        assert_eq!(report.mode, ExecutionMode::Networked);
        assert_eq!(report.environment.lookup("n"), Some(&Value::Integer(21)));
        assert_eq!(String::from_utf8(out).unwrap(), "42\nsuccess\n");
    }

    #[tokio::test]
    async fn test_session_released_on_failure() {
        let mut connector = MockSessionConnector::new();
        connector.expect_open().times(1).returning(|| {
            let mut session = MockContentSession::new();
            session.expect_express_interest().times(1).returning(|interest| {
                Err(NetworkError::Timeout {
                    name: interest.name.to_string(),
                    lifetime: interest.lifetime,
                })
            });
            session.expect_close().times(1).returning(|| Ok(()));
            Ok(Box::new(session) as Box<dyn ContentSession>)
        });
        let runner = Runner::with_connector(&NdncConfig::default(), Arc::new(connector));

        let mut out = Vec::new();
        let err = runner
            .run(
                &program(vec![
                    print(Expression::interest("/data/ryu/")),
                    print(Expression::string("unreached")),
                ]),
                &mut out,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, EvalError::Network { .. }));
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_session_failure_degrades_to_offline() {
        let runner = Runner::with_connector(&NdncConfig::default(), refusing_connector());

        let mut out = Vec::new();
        let report = runner
            .run(&program(vec![print(Expression::interest("/data/x/"))]), &mut out)
            .await
            .unwrap();
        assert_eq!(report.mode, ExecutionMode::Direct);
        assert!(report.degraded);
        assert_eq!(String::from_utf8(out).unwrap(), "offline-data:_data_x_\n");
    }

    #[tokio::test]
    async fn test_degraded_run_still_fails_on_invalid_name() {
        let runner = Runner::with_connector(&NdncConfig::default(), refusing_connector());

        let mut out = Vec::new();
        let err = runner
            .run(&program(vec![print(Expression::interest("/data/ryu"))]), &mut out)
            .await
            .unwrap_err();
        assert!(matches!(err, EvalError::InvalidName { .. }));
    }

    #[tokio::test]
    async fn test_offline_runner() {
        let runner = Runner::offline(&NdncConfig::default());
        let mut out = Vec::new();
        let report = runner
            .run(&program(vec![print(Expression::interest("/data/ryu-local/"))]), &mut out)
            .await
            .unwrap();
        assert!(report.degraded);
        assert_eq!(String::from_utf8(out).unwrap(), "success\n");
    }
}
