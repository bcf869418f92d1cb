use fotarh_check::core::suite::{ARITHMETIC_CHECK, READ_CHECK};
use fotarh_check::{CheckOutcome, CliConfig, Suite, TomlConfig};
use httpmock::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn config_for(server: &MockServer) -> CliConfig {
    CliConfig {
        emulator_host: server.address().to_string(),
        ..CliConfig::default()
    }
}

#[tokio::test]
async fn test_suite_passes_against_empty_emulator() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/v1/projects/fotarh-956e1/databases/(default)/documents/bill/testDoc");
        then.status(404).json_body(serde_json::json!({
            "error": {
                "code": 404,
                "message": "Document not found.",
                "status": "NOT_FOUND"
            }
        }));
    });

    let suite = Suite::standard(&config_for(&server)).unwrap();
    let report = suite.run().await;

    assert!(report.passed());
    let names: Vec<&str> = report.results.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec![ARITHMETIC_CHECK, READ_CHECK]);
    assert!(report.to_string().contains("2 passing"));
    api_mock.assert();
}

#[tokio::test]
async fn test_wrong_service_fails_read_check() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET);
        then.status(404).body("<html>nginx 404</html>");
    });

    let report = Suite::standard(&config_for(&server)).unwrap().run().await;

    assert!(!report.passed());
    assert!(report.results[0].outcome.is_passed());
    assert!(!report.results[1].outcome.is_passed());
    api_mock.assert();
}

#[tokio::test]
async fn test_read_failure_leaves_arithmetic_passing() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path_contains("/documents/bill/testDoc");
        then.status(503).body("emulator shutting down");
    });

    let report = Suite::standard(&config_for(&server)).unwrap().run().await;

    assert!(!report.passed());
    assert_eq!(report.results[0].outcome, CheckOutcome::Passed);
    assert_eq!(
        report.results[1].outcome,
        CheckOutcome::failed("Emulator returned 503: emulator shutting down")
    );
    api_mock.assert();
}

#[tokio::test]
async fn test_suite_from_toml_file() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/v1/projects/toml-project/databases/(default)/documents/invoices/march");
        then.status(200).json_body(serde_json::json!({
            "name": "projects/toml-project/databases/(default)/documents/invoices/march",
            "fields": {}
        }));
    });

    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = format!(
        r#"
[emulator]
host = "{}"
project_id = "toml-project"

[read]
collection = "invoices"
doc = "march"

[runner]
timeout_ms = 3000
"#,
        server.address()
    );
    temp_file.write_all(toml_content.as_bytes()).unwrap();

    let config = TomlConfig::from_file(temp_file.path()).unwrap();
    let report = Suite::standard(&config).unwrap().run().await;

    assert!(report.passed());
    api_mock.assert();
}

#[tokio::test]
async fn test_invalid_emulator_host_is_rejected_at_setup() {
    let config = CliConfig {
        emulator_host: "   ".to_string(),
        ..CliConfig::default()
    };
    assert!(Suite::standard(&config).is_err());
}
