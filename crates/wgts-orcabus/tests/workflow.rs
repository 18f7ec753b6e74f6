use std::time::Duration;

use mockito::Matcher;
use wgts_core::error::ServiceError;
use wgts_core::services::WorkflowMetadata;
use wgts_orcabus::OrcabusClient;
use wgts_orcabus::secrets::parse_token;

const RUN: &str = r#"{
    "links": {"next": null},
    "results": [{
        "orcabusId": "wfr.01ABC",
        "portalRunId": "run1",
        "workflowRunName": "oncoanalyser-wgts-dna-run1",
        "workflow": {"orcabusId": "wfl.01", "workflowName": "oncoanalyser-wgts-dna", "workflowVersion": "2.1.0"},
        "currentState": {"status": "SUCCEEDED", "timestamp": "2025-02-01T10:00:00Z"}
    }]
}"#;

fn client(server: &mockito::Server) -> OrcabusClient {
    OrcabusClient::with_base_urls(server.url(), server.url(), "tok", Duration::from_secs(5))
}

fn mock_run(server: &mut mockito::Server) -> mockito::Mock {
    server
        .mock("GET", "/api/v1/workflowrun")
        .match_query(Matcher::UrlEncoded("portalRunId".into(), "run1".into()))
        .match_header("authorization", "Bearer tok")
        .with_status(200)
        .with_body(RUN)
        .create()
}

#[test]
fn fetches_workflow_run() {
    let mut server = mockito::Server::new();
    let _m = mock_run(&mut server);

    let run = client(&server).workflow_run("run1").unwrap();
    assert_eq!(run.orcabus_id, "wfr.01ABC");
    assert_eq!(run.workflow.workflow_version, "2.1.0");
    assert_eq!(run.current_state.unwrap().status, "SUCCEEDED");
    assert_eq!(run.extra["workflowRunName"], "oncoanalyser-wgts-dna-run1");
}

#[test]
fn unknown_run_is_not_found() {
    let mut server = mockito::Server::new();
    let _m = server
        .mock("GET", "/api/v1/workflowrun")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"links": {"next": null}, "results": []}"#)
        .create();

    let err = client(&server).workflow_run("nope").unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)), "{err}");
}

#[test]
fn latest_payload_uses_newest_state_with_payload() {
    let mut server = mockito::Server::new();
    let _run = mock_run(&mut server);
    let _states = server
        .mock("GET", "/api/v1/workflowrun/wfr.01ABC/state")
        .with_status(200)
        .with_body(
            r#"[
                {"status": "READY", "timestamp": "2025-02-01T08:00:00Z", "payload": "pld.old"},
                {"status": "SUCCEEDED", "timestamp": "2025-02-01T10:00:00.5+00:00", "payload": "pld.new"},
                {"status": "RESOLVED", "timestamp": "2025-02-01T11:00:00Z", "payload": null}
            ]"#,
        )
        .create();
    let payload = server
        .mock("GET", "/api/v1/payload/pld.new")
        .with_status(200)
        .with_body(
            r#"{
                "orcabusId": "pld.new",
                "payloadRefId": "x",
                "version": "2024.07.01",
                "data": {
                    "outputs": {"dnaOncoanalyserAnalysisRelPath": "oncoanalyser/2025"},
                    "engineParameters": {"outputUri": "s3://b/run1/"}
                }
            }"#,
        )
        .expect(1)
        .create();

    let latest = client(&server).latest_payload("run1").unwrap();
    assert_eq!(
        latest.data.output_str("dnaOncoanalyserAnalysisRelPath"),
        Some("oncoanalyser/2025")
    );
    assert_eq!(latest.data.output_uri(), Some("s3://b/run1/"));
    payload.assert();
}

#[test]
fn missing_payload_endpoint_maps_to_not_found() {
    let mut server = mockito::Server::new();
    let _run = mock_run(&mut server);
    let _states = server
        .mock("GET", "/api/v1/workflowrun/wfr.01ABC/state")
        .with_status(200)
        .with_body(r#"[{"status": "READY", "timestamp": "2025-02-01T08:00:00Z", "payload": "pld.gone"}]"#)
        .create();
    let _payload = server
        .mock("GET", "/api/v1/payload/pld.gone")
        .with_status(404)
        .create();

    let err = client(&server).latest_payload("run1").unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)), "{err}");
}

#[test]
fn token_secret_formats() {
    assert_eq!(parse_token(r#"{"id_token": "abc"}"#).unwrap(), "abc");
    assert_eq!(parse_token("  raw-token\n").unwrap(), "raw-token");
    assert!(parse_token("").is_err());
    assert!(parse_token(r#"{"access_token": "abc"}"#).is_err());
}
