use assert_cmd::Command;
use mockito::Matcher;
use predicates::prelude::*;
use serde_json::json;
use std::fs::write;
use tempfile::NamedTempFile;

/// Config pointing both platforms at the local mock server.
fn config_for(server_url: &str) -> NamedTempFile {
    let config = NamedTempFile::new().expect("Creating temp config file failed");
    let yaml = format!(
        "languages:\n  - Python\n  - C\nheadhunter:\n  base_url: \"{server_url}\"\nsuperjob:\n  base_url: \"{server_url}\"\nretry:\n  max_attempts: 1\n"
    );
    write(config.path(), yaml).expect("Writing temp config failed");
    config
}

fn mock_headhunter(server: &mut mockito::ServerGuard) -> mockito::Mock {
    server
        .mock("GET", "/vacancies")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            json!({
                "items": [
                    {"salary": {"from": 100000, "to": 200000, "currency": "RUR"}},
                    {"salary": null}
                ],
                "found": 42,
                "pages": 1
            })
            .to_string(),
        )
        .expect(2)
        .create()
}

#[test]
fn report_without_superjob_key_prints_both_tables() {
    let mut server = mockito::Server::new();
    let hh = mock_headhunter(&mut server);
    let sj = server
        .mock("GET", "/2.0/vacancies/")
        .match_query(Matcher::Any)
        .expect(0)
        .create();
    let config = config_for(&server.url());

    let mut cmd = Command::cargo_bin("devsalary").expect("Binary exists");
    cmd.arg("report")
        .arg("--config")
        .arg(config.path())
        .env_remove("SECRET_KEY_SUPERJOB");

    cmd.assert()
        .success()
        .stdout(
            predicate::str::contains("+HeadHunter Moscow")
                .and(predicate::str::contains("+SuperJob Moscow"))
                .and(predicate::str::contains("| Python "))
                .and(predicate::str::contains("150000")),
        )
        .stderr(predicate::str::contains("SuperJob statistics skipped"));

    hh.assert();
    sj.assert();
}

#[test]
fn report_as_json_with_superjob_key() {
    let mut server = mockito::Server::new();
    let hh = mock_headhunter(&mut server);
    let sj = server
        .mock("GET", "/2.0/vacancies/")
        .match_header("x-api-app-id", "secret")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            json!({
                "objects": [{"payment_from": 50000, "payment_to": 0, "currency": "rub"}],
                "total": 1,
                "more": false
            })
            .to_string(),
        )
        .expect(2)
        .create();
    let config = config_for(&server.url());

    let mut cmd = Command::cargo_bin("devsalary").expect("Binary exists");
    cmd.arg("report")
        .arg("--config")
        .arg(config.path())
        .arg("--format")
        .arg("json")
        .env("SECRET_KEY_SUPERJOB", "secret");

    let output = cmd.assert().success().get_output().stdout.clone();
    let report: serde_json::Value =
        serde_json::from_slice(&output).expect("stdout should be JSON");

    assert_eq!(
        report["HeadHunter Moscow"]["C"],
        json!({"vacancies_found": 42, "vacancies_processed": 1, "average_salary": 150000})
    );
    assert_eq!(
        report["SuperJob Moscow"]["Python"],
        json!({"vacancies_found": 1, "vacancies_processed": 1, "average_salary": 60000})
    );

    hh.assert();
    sj.assert();
}

#[test]
fn unreachable_platform_fails_the_run() {
    let mut server = mockito::Server::new();
    let _hh = server
        .mock("GET", "/vacancies")
        .match_query(Matcher::Any)
        .with_status(500)
        .create();
    let config = config_for(&server.url());

    let mut cmd = Command::cargo_bin("devsalary").expect("Binary exists");
    cmd.arg("report")
        .arg("--config")
        .arg(config.path())
        .env_remove("SECRET_KEY_SUPERJOB");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("HeadHunter statistics failed"));
}

use std::sync::{Arc, Mutex};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{layer::Context, Layer, Registry};

/// Custom Layer to collect emitted event messages.
struct EventCollector {
    events: Arc<Mutex<Vec<String>>>,
}

impl<S> Layer<S> for EventCollector
where
    S: tracing::Subscriber,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        self.events.lock().unwrap().push(format!("{:?}", event));
    }
}

#[tokio::test]
async fn emits_trace_initialised_event() {
    let events = Arc::new(Mutex::new(Vec::new()));
    let collector = EventCollector {
        events: events.clone(),
    };
    let subscriber = Registry::default().with(collector);
    let _guard = tracing::subscriber::set_default(subscriber);

    use devsalary::cli::{run, Cli, Commands, OutputFormat};

    // A missing config file makes run() fail right after start-up.
    let cli = Cli {
        command: Commands::Report {
            config: Some(std::path::PathBuf::from("does-not-exist.yaml")),
            format: OutputFormat::Table,
        },
    };

    let result = run(cli).await;
    assert!(result.is_err());

    let event_msgs = events.lock().unwrap();
    assert!(
        event_msgs.iter().any(|msg| msg.contains("trace_initialised")),
        "Expected a 'trace_initialised' trace event, got: {:?}",
        event_msgs
    );
}
