//! Integration tests for jeedom-client
//!
//! These tests spin up a mock Jeedom server and use the client against it,
//! checking both what is sent on the wire and how replies are classified.

use jeedom_client::testing::{unreachable_base_url, MockJeedom, TEST_API_KEY};
use jeedom_client::{
    ConfigOverrides, JeedomClient, JeedomClientError, ScenarioAction, DEFAULT_USER_AGENT,
};
use rstest::rstest;
use serde_json::{json, Value};

// =============================================================================
// Test Helpers
// =============================================================================

async fn create_mock_server() -> MockJeedom {
    MockJeedom::start()
        .await
        .expect("Failed to start mock server")
}

#[derive(Debug, Clone, Copy)]
enum RawOp {
    Scenario,
    Command,
    Message,
}

#[derive(Debug, Clone, Copy)]
enum JsonOp {
    Object,
    Equipment,
    EquipmentCommands,
    FullData,
}

async fn call_raw(client: &JeedomClient, op: RawOp) -> jeedom_client::Result<String> {
    match op {
        RawOp::Scenario => client.scenario(1, ScenarioAction::Start, None).await,
        RawOp::Command => client.command(4).await,
        RawOp::Message => client.message("alert", "hello").await,
    }
}

async fn call_json(client: &JeedomClient, op: JsonOp) -> jeedom_client::Result<Value> {
    match op {
        JsonOp::Object => client.object().await,
        JsonOp::Equipment => client.equipment(3).await,
        JsonOp::EquipmentCommands => client.equipment_commands(12).await,
        JsonOp::FullData => client.full_data().await,
    }
}

// =============================================================================
// Request Execution Tests
// =============================================================================

#[tokio::test]
async fn test_accepts_any_2xx_response() {
    let server = create_mock_server().await;
    server.reply(201, "jeedom");

    let result = server.client.command(4).await.unwrap();
    assert_eq!(result, "jeedom");
}

#[tokio::test]
async fn test_request_sends_fixed_pair_then_params() {
    let server = create_mock_server().await;
    server.reply(200, "ok");

    server
        .client
        .request("cmd", &[("id", "4".to_string())])
        .await
        .unwrap();

    let request = server.last_request().unwrap();
    assert_eq!(
        request.query,
        vec![
            ("apikey".to_string(), TEST_API_KEY.to_string()),
            ("type".to_string(), "cmd".to_string()),
            ("id".to_string(), "4".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_caller_params_override_apikey_and_type() {
    let server = create_mock_server().await;

    server
        .client
        .request(
            "cmd",
            &[("apikey", "other".to_string()), ("type", "fullData".to_string())],
        )
        .await
        .unwrap();

    let request = server.last_request().unwrap();
    assert_eq!(request.query_value("apikey"), Some("other"));
    assert_eq!(request.query_value("type"), Some("fullData"));
    assert_eq!(request.query.len(), 2);
}

#[tokio::test]
async fn test_errors_on_bad_status_code() {
    let server = create_mock_server().await;
    server.reply(500, "{}");

    let err = server.client.request("cmd", &[]).await.unwrap_err();
    assert!(matches!(
        err,
        JeedomClientError::HttpStatus { status: 500, .. }
    ));
    assert_eq!(err.to_string(), "HTTP Error: 500 Internal Server Error");
}

#[tokio::test]
async fn test_non_standard_status_has_reason_text() {
    let server = create_mock_server().await;
    server.reply(599, "");

    let err = server.client.command(4).await.unwrap_err();
    assert_eq!(err.status(), Some(599));
    assert_eq!(err.to_string(), "HTTP Error: 599 Unknown Status");
}

#[tokio::test]
async fn test_errors_on_network_failure() {
    let base_url = unreachable_base_url().await.unwrap();
    let client = JeedomClient::new(&base_url, "1234").unwrap();

    let err = client.command(4).await.unwrap_err();
    assert!(err.is_transport(), "expected transport error, got {:?}", err);
}

#[tokio::test]
async fn test_missing_base_url_fails_per_call() {
    let client = JeedomClient::from_overrides(ConfigOverrides::new()).unwrap();

    let err = client.command(4).await.unwrap_err();
    assert!(matches!(err, JeedomClientError::MissingBaseUrl));
}

// =============================================================================
// Header Tests
// =============================================================================

#[tokio::test]
async fn test_default_headers_sent() {
    let server = create_mock_server().await;

    server.client.command(1).await.unwrap();

    let request = server.last_request().unwrap();
    assert_eq!(request.header("accept"), Some("*/*"));
    assert_eq!(request.header("connection"), Some("close"));
    assert_eq!(request.header("user-agent"), Some(DEFAULT_USER_AGENT));
}

#[tokio::test]
async fn test_custom_headers_augment_defaults() {
    let server = MockJeedom::start_with(
        ConfigOverrides::new()
            .api_key("12345")
            .header("foo", "bar"),
    )
    .await
    .unwrap();

    server.client.command(1).await.unwrap();

    let request = server.last_request().unwrap();
    assert_eq!(request.header("foo"), Some("bar"));
    assert_eq!(request.header("User-Agent"), Some(DEFAULT_USER_AGENT));
    assert_eq!(request.query_value("apikey"), Some("12345"));
}

#[tokio::test]
async fn test_user_agent_override() {
    let server = MockJeedom::start_with(ConfigOverrides::new().header("User-Agent", "test"))
        .await
        .unwrap();

    server.client.object().await.unwrap();

    let request = server.last_request().unwrap();
    assert_eq!(request.header("user-agent"), Some("test"));
    assert_eq!(request.query_value("apikey"), Some(""));
}

#[tokio::test]
async fn test_header_override_ignores_case() {
    let server = MockJeedom::start_with(ConfigOverrides::new().header("USER-AGENT", "custom"))
        .await
        .unwrap();

    let headers = &server.client.config().request_options.headers;
    assert_eq!(headers.get("USER-AGENT").map(String::as_str), Some("custom"));
    assert!(!headers.contains_key("User-Agent"));

    server.client.command(1).await.unwrap();

    let request = server.last_request().unwrap();
    assert_eq!(request.header("user-agent"), Some("custom"));
}

// =============================================================================
// Action Tests (raw text)
// =============================================================================

#[tokio::test]
async fn test_scenario_query() {
    let server = create_mock_server().await;
    server.reply(200, "ok");

    let result = server
        .client
        .scenario(7, ScenarioAction::Start, Some("foo=1 bar=2"))
        .await
        .unwrap();
    assert_eq!(result, "ok");

    let request = server.last_request().unwrap();
    assert_eq!(request.query_value("type"), Some("scenario"));
    assert_eq!(request.query_value("id"), Some("7"));
    assert_eq!(request.query_value("action"), Some("start"));
    assert_eq!(request.query_value("tags"), Some("foo=1 bar=2"));
}

#[tokio::test]
async fn test_scenario_without_tags_omits_param() {
    let server = create_mock_server().await;

    server
        .client
        .scenario(7, ScenarioAction::Deactivate, None)
        .await
        .unwrap();

    let request = server.last_request().unwrap();
    assert_eq!(request.query_value("action"), Some("désactiver"));
    assert_eq!(request.query_value("tags"), None);
}

#[tokio::test]
async fn test_command_query() {
    let server = create_mock_server().await;

    server.client.command(4).await.unwrap();

    let request = server.last_request().unwrap();
    assert_eq!(request.query_value("type"), Some("cmd"));
    assert_eq!(request.query_value("id"), Some("4"));
}

#[tokio::test]
async fn test_message_query() {
    let server = create_mock_server().await;

    server
        .client
        .message("alarm", "Door open & window open")
        .await
        .unwrap();

    let request = server.last_request().unwrap();
    assert_eq!(request.query_value("type"), Some("message"));
    assert_eq!(request.query_value("category"), Some("alarm"));
    assert_eq!(request.query_value("message"), Some("Door open & window open"));
}

#[rstest]
#[case::scenario(RawOp::Scenario)]
#[case::command(RawOp::Command)]
#[case::message(RawOp::Message)]
#[tokio::test]
async fn test_raw_op_allows_empty_response(#[case] op: RawOp) {
    let server = create_mock_server().await;
    server.reply(201, "");

    assert_eq!(call_raw(&server.client, op).await.unwrap(), "");
}

#[rstest]
#[case::scenario(RawOp::Scenario)]
#[case::command(RawOp::Command)]
#[case::message(RawOp::Message)]
#[tokio::test]
async fn test_raw_op_does_not_parse_json(#[case] op: RawOp) {
    let server = create_mock_server().await;
    server.reply(200, r#"{"a":1}"#);

    assert_eq!(call_raw(&server.client, op).await.unwrap(), r#"{"a":1}"#);
}

#[rstest]
#[case::scenario(RawOp::Scenario)]
#[case::command(RawOp::Command)]
#[case::message(RawOp::Message)]
#[tokio::test]
async fn test_raw_op_rejects_server_error(#[case] op: RawOp) {
    let server = create_mock_server().await;
    server.reply(500, "oops");

    let err = call_raw(&server.client, op).await.unwrap_err();
    assert_eq!(err.status(), Some(500));
}

// =============================================================================
// Read Tests (JSON)
// =============================================================================

#[tokio::test]
async fn test_equipment_query() {
    let server = create_mock_server().await;
    server.reply(200, "[]");

    server.client.equipment(3).await.unwrap();

    let request = server.last_request().unwrap();
    assert_eq!(request.query_value("type"), Some("eqLogic"));
    assert_eq!(request.query_value("object_id"), Some("3"));
}

#[tokio::test]
async fn test_equipment_commands_query() {
    let server = create_mock_server().await;
    server.reply(200, "[]");

    server.client.equipment_commands(12).await.unwrap();

    let request = server.last_request().unwrap();
    assert_eq!(request.query_value("type"), Some("command"));
    assert_eq!(request.query_value("eqLogic_id"), Some("12"));
}

#[tokio::test]
async fn test_object_and_full_data_send_no_params() {
    let server = create_mock_server().await;
    server.reply(200, "[]");

    server.client.object().await.unwrap();
    server.client.full_data().await.unwrap();

    let requests = server.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].query_value("type"), Some("object"));
    assert_eq!(requests[0].query.len(), 2);
    assert_eq!(requests[1].query_value("type"), Some("fullData"));
    assert_eq!(requests[1].query.len(), 2);
}

#[rstest]
#[case::object(JsonOp::Object)]
#[case::equipment(JsonOp::Equipment)]
#[case::equipment_commands(JsonOp::EquipmentCommands)]
#[case::full_data(JsonOp::FullData)]
#[tokio::test]
async fn test_json_op_parses_body(#[case] op: JsonOp) {
    let server = create_mock_server().await;
    server.reply(200, r#"{"a":1}"#);

    assert_eq!(call_json(&server.client, op).await.unwrap(), json!({"a": 1}));
}

#[rstest]
#[case::object(JsonOp::Object)]
#[case::equipment(JsonOp::Equipment)]
#[case::equipment_commands(JsonOp::EquipmentCommands)]
#[case::full_data(JsonOp::FullData)]
#[tokio::test]
async fn test_json_op_allows_empty_response(#[case] op: JsonOp) {
    let server = create_mock_server().await;
    server.reply(200, "");

    assert_eq!(
        call_json(&server.client, op).await.unwrap(),
        Value::String(String::new())
    );
}

#[rstest]
#[case::object(JsonOp::Object)]
#[case::equipment(JsonOp::Equipment)]
#[case::equipment_commands(JsonOp::EquipmentCommands)]
#[case::full_data(JsonOp::FullData)]
#[tokio::test]
async fn test_json_op_rejects_malformed_body(#[case] op: JsonOp) {
    let server = create_mock_server().await;
    server.reply(200, "not json");

    let err = call_json(&server.client, op).await.unwrap_err();
    match &err {
        JeedomClientError::ResponseFormat { body, .. } => assert_eq!(body, "not json"),
        other => panic!("expected ResponseFormat, got {:?}", other),
    }
    assert!(err.to_string().contains("not json"));
}

#[rstest]
#[case::object(JsonOp::Object)]
#[case::equipment(JsonOp::Equipment)]
#[case::equipment_commands(JsonOp::EquipmentCommands)]
#[case::full_data(JsonOp::FullData)]
#[tokio::test]
async fn test_json_op_status_error_wins_over_body(#[case] op: JsonOp) {
    let server = create_mock_server().await;
    server.reply(404, r#"{"error":"not found"}"#);

    let err = call_json(&server.client, op).await.unwrap_err();
    assert!(matches!(
        err,
        JeedomClientError::HttpStatus { status: 404, .. }
    ));
}

#[tokio::test]
async fn test_full_data_round_trip() {
    let server = create_mock_server().await;
    let tree = json!([
        {
            "id": "1",
            "name": "Salon",
            "eqLogics": [
                {
                    "id": "12",
                    "name": "Lampe",
                    "cmds": [
                        {"id": "40", "name": "On", "type": "action"},
                        {"id": "41", "name": "Etat", "type": "info", "state": 1}
                    ]
                }
            ]
        }
    ]);
    server.reply(200, tree.to_string());

    assert_eq!(server.client.full_data().await.unwrap(), tree);
}

// =============================================================================
// Concurrency Tests
// =============================================================================

#[tokio::test]
async fn test_concurrent_calls_are_independent() {
    let server = create_mock_server().await;
    server.reply(200, "ok");

    let client = server.client.clone();
    let (a, b, c) = tokio::join!(client.command(1), client.command(2), server.client.command(3));
    assert_eq!(a.unwrap(), "ok");
    assert_eq!(b.unwrap(), "ok");
    assert_eq!(c.unwrap(), "ok");

    let mut ids: Vec<String> = server
        .requests()
        .iter()
        .filter_map(|r| r.query_value("id").map(String::from))
        .collect();
    ids.sort();
    assert_eq!(ids, vec!["1", "2", "3"]);
}
