use std::time::Duration;

use mockito::Matcher;
use wgts_core::error::ServiceError;
use wgts_core::services::ObjectListing;
use wgts_orcabus::{ApiError, OrcabusClient};

fn client(server: &mockito::Server) -> OrcabusClient {
    OrcabusClient::with_base_urls(server.url(), server.url(), "tok", Duration::from_secs(5))
}

#[test]
fn follows_pagination_links() {
    let mut server = mockito::Server::new();
    let next = format!(
        "{}/api/v1/s3/attributes?portalRunId=run1&currentState=true&page=2",
        server.url()
    );
    let first = server
        .mock("GET", "/api/v1/s3/attributes")
        .match_query(Matcher::Regex("^portalRunId=run1&currentState=true$".into()))
        .match_header("authorization", "Bearer tok")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(format!(
            r#"{{"links": {{"next": "{next}", "previous": null}},
                "results": [{{"bucket": "b", "key": "run1/cache/x", "size": 1}}]}}"#
        ))
        .expect(1)
        .create();
    let second = server
        .mock("GET", "/api/v1/s3/attributes")
        .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
        .match_header("authorization", "Bearer tok")
        .with_status(200)
        .with_body(
            r#"{"links": {"next": null},
                "results": [{"bucket": "b", "key": "run1/out/y.bam"}]}"#,
        )
        .expect(1)
        .create();

    let objects = client(&server).list_objects("run1").unwrap();

    let keys: Vec<_> = objects.iter().map(|o| o.key.as_str()).collect();
    assert_eq!(keys, ["run1/cache/x", "run1/out/y.bam"]);
    assert!(objects.iter().all(|o| o.bucket == "b"));
    first.assert();
    second.assert();
}

#[test]
fn empty_listing_is_not_an_error() {
    let mut server = mockito::Server::new();
    let _m = server
        .mock("GET", "/api/v1/s3/attributes")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"links": {"next": null}, "results": []}"#)
        .create();

    assert!(client(&server).file_objects("run1").unwrap().is_empty());
}

#[test]
fn error_status_is_reported() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/api/v1/s3/attributes")
        .match_query(Matcher::Any)
        .with_status(503)
        .expect(1)
        .create();

    let err = client(&server).file_objects("run1").unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 503, .. }), "{err}");
    assert!(matches!(ServiceError::from(err), ServiceError::Unavailable(_)));
    mock.assert();
}

#[test]
fn malformed_body_is_a_decode_error() {
    let mut server = mockito::Server::new();
    let _m = server
        .mock("GET", "/api/v1/s3/attributes")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>oops</html>")
        .create();

    let err = client(&server).list_objects("run1").unwrap_err();
    assert!(matches!(err, ServiceError::Decode(_)), "{err}");
}

#[test]
fn debug_output_hides_token() {
    let client = OrcabusClient::new("dev.example.org", "secret-token", Duration::from_secs(1));
    let debug = format!("{client:?}");
    assert!(debug.contains("https://file.dev.example.org"));
    assert!(debug.contains("https://workflow.dev.example.org"));
    assert!(!debug.contains("secret-token"));
}
