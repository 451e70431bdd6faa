#![allow(clippy::unwrap_used)]
// Integration tests for `ZabbixClient` using wiremock.

use serde_json::json;
use url::Url;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use zabvox_api::{Error, NewItem, NewTrigger, ZabbixClient};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ZabbixClient) {
    let server = MockServer::start().await;
    let endpoint = Url::parse(&format!("{}/api_jsonrpc.php", server.uri())).unwrap();
    let client = ZabbixClient::with_client(reqwest::Client::new(), endpoint);
    (server, client)
}

fn rpc_result(result: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "jsonrpc": "2.0",
        "result": result,
        "id": 1,
    }))
}

fn rpc_error(code: i64, message: &str, data: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "jsonrpc": "2.0",
        "error": { "code": code, "message": message, "data": data },
        "id": 1,
    }))
}

// ── Authentication ──────────────────────────────────────────────────

#[tokio::test]
async fn test_login_stores_token() {
    let (server, mut client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api_jsonrpc.php"))
        .and(body_partial_json(json!({ "method": "user.login" })))
        .respond_with(rpc_result(json!("0424bd59b807674191e7d77572075f33")))
        .mount(&server)
        .await;

    let secret: secrecy::SecretString = "zabbix".to_string().into();
    assert!(!client.is_authenticated());
    client.login("Admin", &secret).await.unwrap();
    assert!(client.is_authenticated());
}

#[tokio::test]
async fn test_login_failure_maps_to_authentication_error() {
    let (server, mut client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api_jsonrpc.php"))
        .respond_with(rpc_error(
            -32602,
            "Invalid params.",
            "Incorrect user name or password or account is temporarily blocked.",
        ))
        .mount(&server)
        .await;

    let secret: secrecy::SecretString = "wrong".to_string().into();
    let result = client.login("Admin", &secret).await;

    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_calls_after_login_carry_auth_token() {
    let (server, mut client) = setup().await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "method": "user.login" })))
        .respond_with(rpc_result(json!("deadbeef")))
        .mount(&server)
        .await;

    // host.get must carry the stored token as `auth`.
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "method": "host.get",
            "auth": "deadbeef",
        })))
        .respond_with(rpc_result(json!([
            { "hostid": "10105", "host": "gatewayd", "name": "Gateway D" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let secret: secrecy::SecretString = "zabbix".to_string().into();
    client.login("Admin", &secret).await.unwrap();

    let host = client.host_by_name("gatewayd").await.unwrap();
    assert_eq!(host.hostid, "10105");
    assert_eq!(host.display_name(), "Gateway D");
}

// ── Host resolution ─────────────────────────────────────────────────

#[tokio::test]
async fn test_host_lookup_falls_back_to_visible_name() {
    let (server, client) = setup().await;

    // Technical-name filter misses...
    Mock::given(method("POST"))
        .and(body_partial_json(
            json!({ "method": "host.get", "params": { "filter": { "host": ["Gateway D"] } } }),
        ))
        .respond_with(rpc_result(json!([])))
        .mount(&server)
        .await;

    // ...visible-name filter hits.
    Mock::given(method("POST"))
        .and(body_partial_json(
            json!({ "method": "host.get", "params": { "filter": { "name": ["Gateway D"] } } }),
        ))
        .respond_with(rpc_result(json!([
            { "hostid": "10105", "host": "gatewayd", "name": "Gateway D" }
        ])))
        .mount(&server)
        .await;

    let host = client.host_by_name("Gateway D").await.unwrap();
    assert_eq!(host.host, "gatewayd");
}

#[tokio::test]
async fn test_host_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "method": "host.get" })))
        .respond_with(rpc_result(json!([])))
        .mount(&server)
        .await;

    let result = client.host_by_name("missing").await;
    assert!(matches!(result, Err(Error::HostNotFound { .. })));
}

#[tokio::test]
async fn test_agent_interface_prefers_type_1() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "method": "host.get" })))
        .respond_with(rpc_result(json!([
            { "hostid": "10105", "host": "gatewayd" }
        ])))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "method": "hostinterface.get" })))
        .respond_with(rpc_result(json!([
            { "interfaceid": "7", "type": "2" },
            { "interfaceid": "3", "type": "1" },
        ])))
        .mount(&server)
        .await;

    let host = client.host_by_name("gatewayd").await.unwrap();
    let iface = client.agent_interface(&host).await.unwrap();
    assert_eq!(iface.interfaceid, "3");
}

// ── Items ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_item_by_key_absent_and_present() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(body_partial_json(
            json!({ "method": "item.get", "params": { "filter": { "key_": "asterisk.telmex" } } }),
        ))
        .respond_with(rpc_result(json!([{ "itemid": "23296" }])))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(body_partial_json(
            json!({ "method": "item.get", "params": { "filter": { "key_": "asterisk.new_peer" } } }),
        ))
        .respond_with(rpc_result(json!([])))
        .mount(&server)
        .await;

    let existing = client.item_by_key("10105", "asterisk.telmex").await.unwrap();
    assert_eq!(existing.unwrap().itemid, "23296");

    let missing = client.item_by_key("10105", "asterisk.new_peer").await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_create_item_returns_first_id() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "method": "item.create",
            "params": { "key_": "asterisk.pjsip.trunk01", "value_type": 0 },
        })))
        .respond_with(rpc_result(json!({ "itemids": ["24500"] })))
        .mount(&server)
        .await;

    let mut item = NewItem::base("10105", "pjsip_status_trunk01", "asterisk.pjsip.trunk01", 0, 0);
    item.units = Some("ms".into());
    item.delay = Some("1m".into());

    let id = client.create_item(&item).await.unwrap();
    assert_eq!(id, "24500");
}

#[tokio::test]
async fn test_items_with_key_prefix_filters_substring_hits() {
    let (server, client) = setup().await;

    // Server-side `search` is substring matching; the client must drop the
    // entry that merely contains the prefix mid-key.
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "method": "item.get" })))
        .respond_with(rpc_result(json!([
            { "itemid": "1", "key_": "asterisk.pjsip.trunk01", "name": "pjsip_status_trunk01", "value_type": "0" },
            { "itemid": "2", "key_": "other.asterisk.pjsip.x", "name": "stray", "value_type": "0" },
        ])))
        .mount(&server)
        .await;

    let items = client
        .items_with_key_prefix("10105", "asterisk.pjsip.")
        .await
        .unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].key.as_deref(), Some("asterisk.pjsip.trunk01"));
}

// ── Triggers ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_trigger_exists() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "method": "trigger.get",
            "params": { "filter": { "description": "status_tsip_asterisk.telmex" } },
        })))
        .respond_with(rpc_result(json!([{ "triggerid": "13000" }])))
        .mount(&server)
        .await;

    assert!(client
        .trigger_exists("10105", "status_tsip_asterisk.telmex")
        .await
        .unwrap());
}

#[tokio::test]
async fn test_create_trigger() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "method": "trigger.create" })))
        .respond_with(rpc_result(json!({ "triggerids": ["13001"] })))
        .mount(&server)
        .await;

    let trigger = NewTrigger {
        description: "status_tsip_asterisk.telmex".into(),
        expression: "last(/Gateway D/asterisk.telmex)=0".into(),
        priority: 5,
        status: 0,
        manual_close: 0,
        recovery_mode: None,
        recovery_expression: None,
        comments: None,
        opdata: None,
        tags: vec![],
    };
    let id = client.create_trigger(&trigger).await.unwrap();
    assert_eq!(id, "13001");
}

// ── Error surfaces ──────────────────────────────────────────────────

#[tokio::test]
async fn test_api_error_member_is_surfaced() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .respond_with(rpc_error(
            -32602,
            "Invalid params.",
            "Item with key \"asterisk.telmex\" already exists on \"gatewayd\".",
        ))
        .mount(&server)
        .await;

    let result = client.item_by_key("10105", "asterisk.telmex").await;
    match result {
        Err(Error::Api { code, data, .. }) => {
            assert_eq!(code, -32602);
            assert!(data.unwrap().contains("already exists"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_non_2xx_status_is_surfaced() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let result = client.host_by_name("gatewayd").await;
    assert!(matches!(result, Err(Error::HttpStatus { status: 502 })));
}
