use std::sync::Arc;

use ndnc::{
    analyzer::parse_source,
    config::NdncConfig,
    eval::{EvalError, Value},
    network::{
        session::{MockContentSession, MockSessionConnector},
        ContentSession, Data, NetworkError,
    },
    runtime::{ExecutionMode, RunReport, Runner},
    Error,
};
use pretty_assertions::assert_eq;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[ctor::ctor]
fn init_tests() {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

async fn run_with(runner: &Runner, script: &str) -> (Result<RunReport, Error>, String) {
    let mut out = Vec::new();
    let result = match parse_source(script) {
        Ok(program) => runner.run(&program, &mut out).await.map_err(Error::from),
        Err(e) => Err(e),
    };
    (result, String::from_utf8(out).unwrap())
}

async fn run_offline(script: &str) -> (Result<RunReport, Error>, String) {
    run_with(&Runner::offline(&NdncConfig::default()), script).await
}

/// Connector whose sessions answer every interest with `payload`.
fn answering_connector(payload: &'static str) -> Arc<MockSessionConnector> {
    let mut connector = MockSessionConnector::new();
    connector.expect_open().returning(move || {
        let mut session = MockContentSession::new();
        session
            .expect_express_interest()
            .returning(move |interest| Ok(Data::new(interest.name.clone(), payload)));
        session.expect_close().times(1).returning(|| Ok(()));
        Ok(Box::new(session) as Box<dyn ContentSession>)
    });
    Arc::new(connector)
}

#[tokio::test]
async fn test_print_hello() {
    let (result, out) = run_offline(r#"print "hello""#).await;
    let report = result.unwrap();
    assert_eq!(report.mode, ExecutionMode::Direct);
    assert!(!report.degraded);
    assert_eq!(out, "hello\n");
}

#[tokio::test]
async fn test_let_and_multiply() {
    let (result, out) = run_offline("let a = 3\nprint a * 2").await;
    assert!(result.is_ok());
    assert_eq!(out, "6\n");
}

#[tokio::test]
async fn test_bare_expressions_print() {
    let (_, out) = run_offline("6 * 7; 7 / 2\n-7 / 2").await;
    assert_eq!(out, "42\n3\n-4\n");
}

#[tokio::test]
async fn test_variable_overwrite() {
    let (result, out) = run_offline("let x = 10\nx\nlet x = \"ten\"\nprint x").await;
    let report = result.unwrap();
    assert_eq!(out, "10\nten\n");
    assert_eq!(report.environment.lookup("x"), Some(&Value::from("ten")));
}

#[tokio::test]
async fn test_local_store_and_synthetic_offline() {
    let (_, out) = run_offline(
        r#"
        print interest "/data/ryu-local/"
        print interest "/data/x/"
        "#,
    )
    .await;
    assert_eq!(out, "success\noffline-data:_data_x_\n");
}

#[tokio::test]
async fn test_invalid_name_stops_program() {
    let (result, out) = run_offline(
        r#"print "before"
print interest "/data/ryu"
print "after""#,
    )
    .await;
    let err = result.unwrap_err();
    assert!(matches!(err, Error::Eval(EvalError::InvalidName { .. })));
    assert_eq!(err.exit_code(), 3);
    assert_eq!(out, "before\n");
}

#[tokio::test]
async fn test_division_by_zero_before_dividend() {
    let (result, out) = run_offline("print undefined_name / 0").await;
    assert!(matches!(
        result,
        Err(Error::Eval(EvalError::DivisionByZero))
    ));
    assert_eq!(out, "");
}

#[tokio::test]
async fn test_text_arithmetic_is_rejected() {
    let (result, _) = run_offline(r#"print "a" * 2"#).await;
    assert!(matches!(
        result,
        Err(Error::Eval(EvalError::TypeMismatch { .. }))
    ));
}

#[tokio::test]
async fn test_call_fails_at_runtime_not_parse_time() {
    let (result, out) = run_offline("print 1\nprint double(2)").await;
    assert!(matches!(
        result,
        Err(Error::Eval(EvalError::UnsupportedNode(_)))
    ));
    assert_eq!(out, "1\n");
}

#[tokio::test]
async fn test_networked_run_coerces_payload() {
    let runner = Runner::with_connector(&NdncConfig::default(), answering_connector("  21\n"));
    let (result, out) = run_with(
        &runner,
        r#"let n = interest "/data/ryu/"
print n * 2
print interest "/data/ryu-local/""#,
    )
    .await;
    let report = result.unwrap();
    assert_eq!(report.mode, ExecutionMode::Networked);
    assert!(!report.degraded);
    assert_eq!(out, "42\nsuccess\n");
}

#[tokio::test]
async fn test_unreachable_forwarder_degrades() {
    let mut connector = MockSessionConnector::new();
    connector
        .expect_open()
        .times(1)
        .returning(|| Err(NetworkError::Closed));
    let runner = Runner::with_connector(&NdncConfig::default(), Arc::new(connector));

    let (result, out) = run_with(&runner, r#"print interest "/data/ryu/""#).await;
    let report = result.unwrap();
    assert_eq!(report.mode, ExecutionMode::Direct);
    assert!(report.degraded);
    assert_eq!(out, "offline-data:_data_ryu_\n");
}

#[tokio::test]
async fn test_parse_errors_carry_position() {
    let (result, out) = run_offline("print 1\nlet = 2").await;
    match result {
        Err(Error::Parse { span, .. }) => assert_eq!(span.line, 2),
        other => panic!("expected parse error, got {:?}", other.map(|r| r.mode)),
    }
    assert_eq!(out, "");
}
