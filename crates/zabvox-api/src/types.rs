//! Wire types for the Zabbix object model.
//!
//! Reference rows (`Host`, `ItemRef`, ...) mirror what the server returns
//! for the `output` field lists the client requests; Zabbix serializes every
//! scalar as a string, so ids and numeric flags arrive as `String`. Draft
//! payloads (`NewItem`, `NewTrigger`, ...) are what the client sends to the
//! `*.create` / `*.update` methods.

use serde::{Deserialize, Serialize};

// ── Reference rows ───────────────────────────────────────────────────

/// A host as returned by `host.get`.
#[derive(Debug, Clone, Deserialize)]
pub struct Host {
    pub hostid: String,

    /// Technical host name.
    pub host: String,

    /// Visible name -- trigger expressions reference this one.
    #[serde(default)]
    pub name: Option<String>,
}

impl Host {
    /// The name trigger expressions must use: visible when set, else technical.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.host)
    }
}

/// A host interface as returned by `hostinterface.get`.
#[derive(Debug, Clone, Deserialize)]
pub struct HostInterface {
    pub interfaceid: String,

    /// Interface type; `"1"` is a Zabbix agent interface.
    #[serde(rename = "type")]
    pub interface_type: String,
}

impl HostInterface {
    pub const AGENT: &'static str = "1";

    pub fn is_agent(&self) -> bool {
        self.interface_type == Self::AGENT
    }
}

/// An item as returned by `item.get`.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemRef {
    pub itemid: String,

    #[serde(rename = "key_", default)]
    pub key: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub value_type: Option<String>,
}

/// A trigger as returned by `trigger.get`.
#[derive(Debug, Clone, Deserialize)]
pub struct TriggerRef {
    pub triggerid: String,

    #[serde(default)]
    pub description: Option<String>,
}

/// `item.create` / `item.update` response payload.
#[derive(Debug, Deserialize)]
pub struct ItemIds {
    pub itemids: Vec<String>,
}

/// `trigger.create` response payload.
#[derive(Debug, Deserialize)]
pub struct TriggerIds {
    pub triggerids: Vec<String>,
}

// ── Draft payloads ───────────────────────────────────────────────────

/// Full attribute set for `item.create`.
///
/// Only the fields the provisioning suites use are modeled; optional fields
/// are skipped on the wire when unset so agent items and HTTP-agent items
/// share one type.
#[derive(Debug, Clone, Serialize)]
pub struct NewItem {
    pub hostid: String,
    pub name: String,
    #[serde(rename = "key_")]
    pub key: String,

    /// Item type: 0 = Zabbix agent, 2 = trapper, 19 = HTTP agent.
    #[serde(rename = "type")]
    pub item_type: u8,

    /// Value type: 0 = float, 3 = unsigned, 4 = text.
    pub value_type: u8,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub interfaceid: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,

    /// Update interval (`"1m"`); trapper items carry none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay: Option<String>,

    /// History retention, seconds or time-suffixed (`"90d"`).
    pub history: String,

    /// Trends retention; `"0"` disables trends (text items).
    pub trends: String,

    /// 0 = enabled.
    pub status: u8,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    // HTTP-agent fields (type 19 only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_method: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_type: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posts: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<std::collections::BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_codes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_redirects: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retrieve_mode: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_format: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verify_peer: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verify_host: Option<u8>,
}

impl NewItem {
    /// A minimal draft with the fields every suite sets; callers fill in
    /// the rest with struct update syntax.
    pub fn base(hostid: &str, name: &str, key: &str, item_type: u8, value_type: u8) -> Self {
        Self {
            hostid: hostid.to_owned(),
            name: name.to_owned(),
            key: key.to_owned(),
            item_type,
            value_type,
            interfaceid: None,
            units: None,
            delay: None,
            history: "90d".into(),
            trends: "365d".into(),
            status: 0,
            description: None,
            timeout: None,
            url: None,
            request_method: None,
            post_type: None,
            posts: None,
            headers: None,
            status_codes: None,
            follow_redirects: None,
            retrieve_mode: None,
            output_format: None,
            verify_peer: None,
            verify_host: None,
        }
    }
}

/// Attribute overwrite for `item.update` (upsert-always suites).
#[derive(Debug, Clone, Serialize)]
pub struct ItemUpdate {
    pub itemid: String,
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: u8,
    pub value_type: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
    pub history: String,
    pub trends: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Full attribute set for `trigger.create`.
#[derive(Debug, Clone, Serialize)]
pub struct NewTrigger {
    pub description: String,

    /// Boolean expression over item history; built by string templating,
    /// evaluated server-side.
    pub expression: String,

    /// Severity 1-5 (Info..Disaster).
    pub priority: u8,

    /// 0 = enabled.
    pub status: u8,

    pub manual_close: u8,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub recovery_mode: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recovery_expression: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opdata: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<TriggerTag>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TriggerTag {
    pub tag: String,
    pub value: String,
}

impl TriggerTag {
    pub fn new(tag: &str, value: &str) -> Self {
        Self {
            tag: tag.to_owned(),
            value: value.to_owned(),
        }
    }
}
