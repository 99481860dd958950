use devsalary_core::config::{RetryPolicy, SuperJobSettings};
use devsalary_core::contract::{FetchError, VacancyFetcher};
use devsalary_core::fetch::SuperJobFetcher;
use mockito::Matcher;
use serde_json::json;

const PATH: &str = "/2.0/vacancies/";

fn fetcher_for(server: &mockito::Server, retry: RetryPolicy) -> SuperJobFetcher {
    let settings = SuperJobSettings {
        base_url: server.url(),
        ..Default::default()
    };
    SuperJobFetcher::new(settings, "test-secret", retry).expect("client should build")
}

fn page(n: &str) -> Matcher {
    Matcher::UrlEncoded("page".into(), n.into())
}

#[tokio::test]
async fn stops_when_more_is_false() {
    let mut server = mockito::Server::new_async().await;

    let first = server
        .mock("GET", PATH)
        .match_header("x-api-app-id", "test-secret")
        .match_query(Matcher::AllOf(vec![
            page("0"),
            Matcher::UrlEncoded("keyword".into(), "\"Rust\"".into()),
            Matcher::UrlEncoded("town".into(), "4".into()),
            Matcher::UrlEncoded("catalogues".into(), "48".into()),
            Matcher::UrlEncoded("period".into(), "30".into()),
            Matcher::UrlEncoded("count".into(), "100".into()),
        ]))
        .with_status(200)
        .with_body(
            json!({
                "objects": [{"id": 10}, {"id": 11}],
                "total": 3,
                "more": true
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;
    let second = server
        .mock("GET", PATH)
        .match_header("x-api-app-id", "test-secret")
        .match_query(page("1"))
        .with_status(200)
        .with_body(json!({"objects": [{"id": 12}], "total": 3, "more": false}).to_string())
        .expect(1)
        .create_async()
        .await;
    let third = server
        .mock("GET", PATH)
        .match_query(page("2"))
        .with_status(200)
        .with_body(json!({"objects": [{"id": 13}], "total": 3, "more": false}).to_string())
        .expect(0)
        .create_async()
        .await;

    let fetched = fetcher_for(&server, RetryPolicy::attempts(1))
        .fetch("Rust")
        .await
        .expect("fetch should succeed");

    first.assert_async().await;
    second.assert_async().await;
    third.assert_async().await;

    assert_eq!(fetched.reported_total, 3);
    let ids: Vec<_> = fetched
        .records
        .iter()
        .map(|r| r["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, [10, 11, 12]);
}

#[tokio::test]
async fn rejected_key_exhausts_retries() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", PATH)
        .match_query(Matcher::Any)
        .with_status(403)
        .with_body(r#"{"error": {"code": 403, "message": "Invalid app_key"}}"#)
        .expect(2)
        .create_async()
        .await;

    let err = fetcher_for(&server, RetryPolicy::attempts(2))
        .fetch("PHP")
        .await
        .expect_err("fetch should give up");

    mock.assert_async().await;
    assert!(matches!(
        err,
        FetchError::RetriesExhausted { attempts: 2, page: 0, .. }
    ));
}

#[tokio::test]
async fn undecodable_body_counts_as_failure() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>captcha</html>")
        .expect(1)
        .create_async()
        .await;

    let err = fetcher_for(&server, RetryPolicy::attempts(1))
        .fetch("Swift")
        .await
        .expect_err("fetch should fail");

    mock.assert_async().await;
    match err {
        FetchError::RetriesExhausted { last_error, .. } => {
            assert!(last_error.contains("decode"), "got {last_error}");
        }
        other => panic!("expected RetriesExhausted, got {other:?}"),
    }
}
