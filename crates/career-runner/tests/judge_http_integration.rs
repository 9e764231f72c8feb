//! End-to-end runs against the mock Judge0 server
//!
//! These tests drive `CodeRunner` over real HTTP so the wire format, query
//! parameters, auth headers and error body extraction are all exercised.

use career_runner::{CodeRunner, RunnerConfig, RunnerError};
use judge_mock::{JudgeScript, MockJudgeServer, ScriptedResponse};
use serde_json::json;
use std::time::Duration;

fn config_for(server: &MockJudgeServer) -> RunnerConfig {
    RunnerConfig::default()
        .with_base_url(server.address())
        .with_poll_interval(Duration::from_millis(5))
        .with_request_timeout(Duration::from_secs(5))
}

#[tokio::test]
async fn test_run_reaches_terminal_status() {
    let script = JudgeScript::echo()
        .with_submit(ScriptedResponse::token("abc"))
        .with_polls(vec![
            ScriptedResponse::queued(),
            ScriptedResponse::processing(),
            ScriptedResponse::accepted("hello\n", "0.01", 1234),
        ]);
    let server = MockJudgeServer::start(script).await.unwrap();
    let runner = CodeRunner::new(config_for(&server)).unwrap();

    let output = runner.run("print('hello')", "py").await;

    assert_eq!(output, "hello\n\nStatus: Accepted | Time: 0.01s | Memory: 1234 KB");

    let submissions = server.submissions().await;
    assert_eq!(submissions.len(), 1);
    assert_eq!(
        submissions[0].query.as_deref(),
        Some("base64_encoded=false&wait=false")
    );
    assert_eq!(
        submissions[0].body,
        Some(json!({"source_code": "print('hello')", "language_id": 71}))
    );

    let polls = server.polls().await;
    assert_eq!(polls.len(), 3);
    assert!(polls.iter().all(|poll| poll.path == "/submissions/abc"));
    assert!(polls
        .iter()
        .all(|poll| poll.query.as_deref() == Some("base64_encoded=false")));

    server.shutdown().await;
}

#[tokio::test]
async fn test_echo_service_returns_source() {
    let server = MockJudgeServer::start(JudgeScript::echo()).await.unwrap();
    let runner = CodeRunner::new(config_for(&server)).unwrap();

    let report = runner.execute("console.log(1)", "JS").await.unwrap();

    assert!(report.as_str().starts_with("console.log(1)\n\nStatus: Accepted"));
    server.shutdown().await;
}

#[tokio::test]
async fn test_submit_error_field_is_extracted() {
    let script = JudgeScript::echo()
        .with_submit(ScriptedResponse::json(500, json!({"error": "boom"})));
    let server = MockJudgeServer::start(script).await.unwrap();
    let runner = CodeRunner::new(config_for(&server)).unwrap();

    assert_eq!(runner.run("print(1)", "python").await, "Submission failed: boom");
    assert!(server.polls().await.is_empty());

    server.shutdown().await;
}

#[tokio::test]
async fn test_submit_plain_text_and_empty_bodies() {
    let server = MockJudgeServer::start(
        JudgeScript::echo().with_submit(ScriptedResponse::text(429, "Too many requests")),
    )
    .await
    .unwrap();
    let runner = CodeRunner::new(config_for(&server)).unwrap();
    assert_eq!(
        runner.run("print(1)", "python").await,
        "Submission failed: Too many requests"
    );
    server.shutdown().await;

    let server = MockJudgeServer::start(
        JudgeScript::echo().with_submit(ScriptedResponse::text(503, "")),
    )
    .await
    .unwrap();
    let runner = CodeRunner::new(config_for(&server)).unwrap();
    assert_eq!(
        runner.run("print(1)", "python").await,
        "Submission failed: Request failed (503)."
    );
    server.shutdown().await;
}

#[tokio::test]
async fn test_missing_token() {
    let script = JudgeScript::echo().with_submit(ScriptedResponse::json(200, json!({})));
    let server = MockJudgeServer::start(script).await.unwrap();
    let runner = CodeRunner::new(config_for(&server)).unwrap();

    let result = runner.execute("print(1)", "python").await;

    assert_eq!(result, Err(RunnerError::MissingToken));
    assert!(!RunnerError::MissingToken
        .to_string()
        .starts_with("Submission failed"));
    assert!(server.polls().await.is_empty());

    server.shutdown().await;
}

#[tokio::test]
async fn test_non_string_token_is_missing() {
    let script = JudgeScript::echo().with_submit(ScriptedResponse::json(201, json!({"token": 123})));
    let server = MockJudgeServer::start(script).await.unwrap();
    let runner = CodeRunner::new(config_for(&server)).unwrap();

    let result = runner.execute("print(1)", "python").await;

    assert_eq!(result, Err(RunnerError::MissingToken));
    assert!(server.polls().await.is_empty());

    server.shutdown().await;
}

#[tokio::test]
async fn test_token_with_reserved_characters_stays_one_segment() {
    let script = JudgeScript::echo().with_submit(ScriptedResponse::token("a?b#c/d"));
    let server = MockJudgeServer::start(script).await.unwrap();
    let runner = CodeRunner::new(config_for(&server)).unwrap();

    let output = runner.run("print(1)", "python").await;

    assert!(output.starts_with("print(1)\n\nStatus: Accepted"), "got: {}", output);

    let polls = server.polls().await;
    assert_eq!(polls.len(), 1);
    assert_eq!(polls[0].path, "/submissions/a?b#c/d");
    assert_eq!(polls[0].query.as_deref(), Some("base64_encoded=false"));

    server.shutdown().await;
}

#[tokio::test]
async fn test_poll_failure_aborts() {
    let script = JudgeScript::echo()
        .with_submit(ScriptedResponse::token("abc"))
        .with_polls(vec![
            ScriptedResponse::queued(),
            ScriptedResponse::json(401, json!({"message": "Invalid API key"})),
            ScriptedResponse::accepted("never", "0.01", 1),
        ]);
    let server = MockJudgeServer::start(script).await.unwrap();
    let runner = CodeRunner::new(config_for(&server)).unwrap();

    assert_eq!(
        runner.run("print(1)", "python").await,
        "Failed to fetch result: Invalid API key"
    );
    assert_eq!(server.polls().await.len(), 2);

    server.shutdown().await;
}

#[tokio::test]
async fn test_budget_exhaustion_over_http() {
    let script = JudgeScript::echo()
        .with_submit(ScriptedResponse::token("abc"))
        .pending_for(10);
    let server = MockJudgeServer::start(script).await.unwrap();
    let runner = CodeRunner::new(config_for(&server).with_max_poll_attempts(3)).unwrap();

    assert_eq!(
        runner.run("while True: pass", "python").await,
        "Execution timed out while waiting for the response."
    );
    assert_eq!(server.polls().await.len(), 3);

    server.shutdown().await;
}

#[tokio::test]
async fn test_malformed_result_is_an_execution_failure() {
    let script = JudgeScript::echo()
        .with_submit(ScriptedResponse::token("abc"))
        .with_polls(vec![ScriptedResponse::text(200, "<html>oops</html>")]);
    let server = MockJudgeServer::start(script).await.unwrap();
    let runner = CodeRunner::new(config_for(&server)).unwrap();

    let output = runner.run("print(1)", "python").await;

    assert!(output.starts_with("Execution failed: "), "got: {}", output);
    server.shutdown().await;
}

#[tokio::test]
async fn test_auth_headers_sent_as_pair() {
    let server = MockJudgeServer::start(JudgeScript::echo()).await.unwrap();
    let runner = CodeRunner::new(
        config_for(&server).with_auth("secret-key", "judge0-ce.p.rapidapi.com"),
    )
    .unwrap();

    runner.run("puts 1", "ruby").await;

    let requests = server.requests().await;
    assert_eq!(requests.len(), 2);
    for request in requests {
        assert_eq!(request.api_key.as_deref(), Some("secret-key"));
        assert_eq!(request.api_host.as_deref(), Some("judge0-ce.p.rapidapi.com"));
    }

    server.shutdown().await;
}

#[tokio::test]
async fn test_half_configured_auth_sends_no_headers() {
    let server = MockJudgeServer::start(JudgeScript::echo()).await.unwrap();
    let mut config = config_for(&server);
    config.api_key = Some("secret-key".to_string());
    let runner = CodeRunner::new(config).unwrap();

    runner.run("puts 1", "ruby").await;

    for request in server.requests().await {
        assert!(request.api_key.is_none());
        assert!(request.api_host.is_none());
    }

    server.shutdown().await;
}

#[tokio::test]
async fn test_unreachable_service_never_panics() {
    // Nothing listens on port 1
    let config = RunnerConfig::default()
        .with_base_url("http://127.0.0.1:1")
        .with_request_timeout(Duration::from_secs(2));
    let runner = CodeRunner::new(config).unwrap();

    let output = runner.run("print(1)", "python").await;

    assert!(output.starts_with("Execution failed: "), "got: {}", output);
    assert_ne!(output, "Execution failed: ");
}

#[tokio::test]
async fn test_unsupported_language_skips_network() {
    let server = MockJudgeServer::start(JudgeScript::echo()).await.unwrap();
    let runner = CodeRunner::new(config_for(&server)).unwrap();

    assert_eq!(
        runner.run("key: value", "yml").await,
        "This language (yml) is not supported for execution."
    );
    assert!(server.requests().await.is_empty());

    server.shutdown().await;
}

#[tokio::test]
async fn test_concurrent_runs_are_independent() {
    let server = MockJudgeServer::start(JudgeScript::echo()).await.unwrap();
    let runner = CodeRunner::new(config_for(&server)).unwrap();

    let (first, second) = tokio::join!(
        runner.run("first", "python"),
        runner.run("second", "bash")
    );

    assert!(first.starts_with("first\n\n"));
    assert!(second.starts_with("second\n\n"));
    assert_eq!(server.submissions().await.len(), 2);

    server.shutdown().await;
}
