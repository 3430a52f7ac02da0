//! End-to-end runs against stubbed GTA and Teams endpoints.
//!
//! Each test starts two wiremock servers, one standing in for the GTA API and
//! one for the Teams webhook, and drives `execute` exactly like the binary
//! does. Call-count expectations are verified when the servers drop.

use clap::Parser;
use gta_teams_notify::{
    execute, ApiError, AppError, CommandLineInput, ConfigurationError, NotificationError,
    RunOutcome,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GTA_PATH: &str = "/api/v1/data/";
const TEAMS_PATH: &str = "/webhookb2/channel";
const API_KEY: &str = "test-key";

struct Stubs {
    gta: MockServer,
    teams: MockServer,
}

impl Stubs {
    async fn start() -> Self {
        Self {
            gta: MockServer::start().await,
            teams: MockServer::start().await,
        }
    }

    fn cli(&self, extra: &[&str]) -> CommandLineInput {
        let gta_url = format!("{}{}", self.gta.uri(), GTA_PATH);
        let mut args = vec!["gta-teams-notify", "--gta-url", gta_url.as_str()];
        args.extend_from_slice(extra);
        CommandLineInput::parse_from(args)
    }

    fn env(&self) -> impl Fn(&str) -> Option<String> {
        env_of(&[
            ("GTA_API_KEY", API_KEY.to_string()),
            ("WEBHOOK_URL", format!("{}{}", self.teams.uri(), TEAMS_PATH)),
        ])
    }

    async fn gta_responds(&self, response: ResponseTemplate) {
        Mock::given(method("POST"))
            .and(path(GTA_PATH))
            .respond_with(response)
            .expect(1)
            .mount(&self.gta)
            .await;
    }

    async fn teams_responds(&self, response: ResponseTemplate, calls: u64) {
        Mock::given(method("POST"))
            .and(path(TEAMS_PATH))
            .respond_with(response)
            .expect(calls)
            .mount(&self.teams)
            .await;
    }

    async fn teams_body(&self) -> Value {
        let requests = self.teams.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        requests[0].body_json().unwrap()
    }
}

fn env_of(pairs: &[(&str, String)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect();
    move |name| map.get(name).cloned()
}

fn sample_intervention() -> Value {
    json!({
        "intervention_id": 135792,
        "state_act_title": "United States: Additional duties on imports of steel",
        "intervention_url": "https://globaltradealert.org/intervention/135792",
        "gta_evaluation": "Red",
        "intervention_type": "Import tariff",
        "mast_chapter": "Tariff measures",
        "implementation_level": "National",
        "date_implemented": "2024-01-01",
        "is_in_force": 1,
        "implementing_jurisdictions": [{"name": "United States of America"}],
        "affected_jurisdictions": [
            {"name": "China"}, {"name": "Germany"}, {"name": "Japan"},
            {"name": "Mexico"}, {"name": "Canada"}, {"name": "Brazil"}, {"name": "India"}
        ],
        "affected_products": [720610, 720711],
        "affected_sectors": [411]
    })
}

#[tokio::test]
async fn missing_webhook_url_fails_before_any_request() {
    let stubs = Stubs::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&stubs.gta)
        .await;
    stubs.teams_responds(ResponseTemplate::new(200), 0).await;

    let err = execute(
        &stubs.cli(&[]),
        env_of(&[("GTA_API_KEY", API_KEY.to_string())]),
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err,
        AppError::Configuration(ConfigurationError::Missing("WEBHOOK_URL"))
    ));
}

#[tokio::test]
async fn missing_api_key_fails_before_any_request() {
    let stubs = Stubs::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&stubs.gta)
        .await;
    stubs.teams_responds(ResponseTemplate::new(200), 0).await;

    let webhook = format!("{}{}", stubs.teams.uri(), TEAMS_PATH);
    let err = execute(&stubs.cli(&[]), env_of(&[("WEBHOOK_URL", webhook)]))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Configuration error: missing GTA_API_KEY");
}

#[tokio::test]
async fn sends_default_query_with_api_key_header() {
    let stubs = Stubs::start().await;
    Mock::given(method("POST"))
        .and(path(GTA_PATH))
        .and(header("authorization", "APIKey test-key"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "limit": 1,
            "offset": 0,
            "request_data": {"implementer": [840]}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([sample_intervention()])))
        .expect(1)
        .mount(&stubs.gta)
        .await;
    stubs
        .teams_responds(ResponseTemplate::new(200).set_body_string("1"), 1)
        .await;

    let outcome = execute(&stubs.cli(&[]), stubs.env()).await.unwrap();
    assert_eq!(outcome, RunOutcome::Sent { records: 1 });

    let body = stubs.teams_body().await;
    assert_eq!(body["type"], "message");
    let card = &body["attachments"][0]["content"];
    assert_eq!(
        body["attachments"][0]["contentType"],
        "application/vnd.microsoft.card.adaptive"
    );
    assert_eq!(
        card["body"][0]["text"],
        "United States: Additional duties on imports of steel"
    );
    assert_eq!(
        card["body"][4]["items"][1]["text"],
        "China, Germany, Japan, Mexico, Canada, and 2 more."
    );
}

#[tokio::test]
async fn single_record_text_message_contains_fields() {
    let stubs = Stubs::start().await;
    stubs
        .gta_responds(ResponseTemplate::new(200).set_body_json(json!([
            {"title": "X", "date": "2024-01-01", "jurisdiction": "USA"}
        ])))
        .await;
    stubs.teams_responds(ResponseTemplate::new(200), 1).await;

    execute(&stubs.cli(&["--format", "text"]), stubs.env())
        .await
        .unwrap();

    let body = stubs.teams_body().await;
    let text = body["text"].as_str().unwrap();
    assert!(text.contains("X"));
    assert!(text.contains("2024-01-01"));
    assert!(text.contains("USA"));
}

#[tokio::test]
async fn empty_result_skips_teams() {
    let stubs = Stubs::start().await;
    stubs
        .gta_responds(ResponseTemplate::new(200).set_body_json(json!({"interventions": []})))
        .await;
    stubs.teams_responds(ResponseTemplate::new(200), 0).await;

    let outcome = execute(&stubs.cli(&[]), stubs.env()).await.unwrap();
    assert_eq!(outcome, RunOutcome::Suppressed);
}

#[tokio::test]
async fn empty_result_sends_notice_when_requested() {
    let stubs = Stubs::start().await;
    stubs
        .gta_responds(ResponseTemplate::new(200).set_body_json(json!([])))
        .await;
    stubs.teams_responds(ResponseTemplate::new(200), 1).await;

    execute(&stubs.cli(&["--send-empty"]), stubs.env())
        .await
        .unwrap();

    assert_eq!(
        stubs.teams_body().await,
        json!({"text": "No new interventions found."})
    );
}

#[tokio::test]
async fn gta_server_error_aborts_run() {
    let stubs = Stubs::start().await;
    stubs
        .gta_responds(ResponseTemplate::new(500).set_body_string("internal failure"))
        .await;
    stubs.teams_responds(ResponseTemplate::new(200), 0).await;

    let err = execute(&stubs.cli(&[]), stubs.env()).await.unwrap_err();

    match err {
        AppError::Api(ApiError::Status { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "internal failure");
        }
        other => panic!("expected GTA status error, got {other:?}"),
    }
}

#[tokio::test]
async fn gta_non_json_body_is_unparsable() {
    let stubs = Stubs::start().await;
    stubs
        .gta_responds(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .await;
    stubs.teams_responds(ResponseTemplate::new(200), 0).await;

    let err = execute(&stubs.cli(&[]), stubs.env()).await.unwrap_err();
    assert!(matches!(err, AppError::Api(ApiError::Unparsable { .. })));
}

#[tokio::test]
async fn teams_rejection_is_notification_error() {
    let stubs = Stubs::start().await;
    stubs
        .gta_responds(ResponseTemplate::new(200).set_body_json(json!([sample_intervention()])))
        .await;
    stubs
        .teams_responds(
            ResponseTemplate::new(400).set_body_string("Bad payload received by generic incoming webhook."),
            1,
        )
        .await;

    let err = execute(&stubs.cli(&[]), stubs.env()).await.unwrap_err();

    assert_eq!(err.stage(), "teams");
    match err {
        AppError::Notification(NotificationError::Status { status, body }) => {
            assert_eq!(status, 400);
            assert!(body.starts_with("Bad payload"));
        }
        other => panic!("expected Teams status error, got {other:?}"),
    }
}

#[tokio::test]
async fn slow_gta_response_times_out() {
    let stubs = Stubs::start().await;
    stubs
        .gta_responds(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_secs(3)),
        )
        .await;
    stubs.teams_responds(ResponseTemplate::new(200), 0).await;

    let err = execute(&stubs.cli(&["--timeout", "1"]), stubs.env())
        .await
        .unwrap_err();

    match err {
        AppError::Api(api) => assert!(api.is_timeout(), "expected timeout, got {api:?}"),
        other => panic!("expected GTA error, got {other:?}"),
    }
}

#[tokio::test]
async fn dry_run_never_calls_teams() {
    let stubs = Stubs::start().await;
    stubs
        .gta_responds(ResponseTemplate::new(200).set_body_json(json!([sample_intervention()])))
        .await;
    stubs.teams_responds(ResponseTemplate::new(200), 0).await;

    let outcome = execute(&stubs.cli(&["--dry-run", "--format", "text"]), stubs.env())
        .await
        .unwrap();

    match outcome {
        RunOutcome::DryRun { payload } => {
            let json = payload.to_json().unwrap();
            assert!(json.contains("Additional duties on imports of steel"));
        }
        other => panic!("expected dry run, got {other:?}"),
    }
}
