// Zabbix JSON-RPC HTTP client
//
// Wraps `reqwest::Client` with the JSON-RPC 2.0 envelope, session-token
// attachment, and error-member unwrapping. All endpoint groups (hosts,
// items, triggers) are implemented as inherent methods via separate files
// to keep this module focused on transport mechanics.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::debug;
use url::Url;

use crate::error::Error;

/// Transport knobs for building the underlying HTTP client.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Verify the server TLS certificate. Off by default because most
    /// on-premise Zabbix frontends run behind self-signed certificates.
    pub verify_tls: bool,

    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            verify_tls: false,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Raw client for the Zabbix JSON-RPC API (`api_jsonrpc.php`).
///
/// Owns the session token explicitly: `login` stores it, and every
/// subsequent [`call`](Self::call) attaches it as the `auth` member.
/// No token survives the process -- each run authenticates from scratch.
pub struct ZabbixClient {
    http: reqwest::Client,
    endpoint: Url,
    token: Option<String>,
    request_id: AtomicU64,
}

impl ZabbixClient {
    /// Create a new client for the given API endpoint
    /// (e.g. `http://zabbix.example.com/zabbix/api_jsonrpc.php`).
    pub fn new(endpoint: Url, options: &ClientOptions) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(!options.verify_tls)
            .timeout(options.timeout)
            .build()
            .map_err(Error::Transport)?;

        Ok(Self {
            http,
            endpoint,
            token: None,
            request_id: AtomicU64::new(1),
        })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, endpoint: Url) -> Self {
        Self {
            http,
            endpoint,
            token: None,
            request_id: AtomicU64::new(1),
        }
    }

    /// The API endpoint URL.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// `true` once a session token has been obtained via `login`.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    // ── Authentication ───────────────────────────────────────────────

    /// Authenticate via `user.login` and store the session token.
    ///
    /// The token is opaque and valid for the process lifetime only; it is
    /// attached to every subsequent request and never persisted.
    pub async fn login(&mut self, username: &str, password: &SecretString) -> Result<(), Error> {
        let params = json!({
            "user": username,
            "password": password.expose_secret(),
        });

        let result = self.call("user.login", params).await.map_err(|e| match e {
            Error::Api { message, data, .. } => Error::Authentication {
                message: data.unwrap_or(message),
            },
            other => other,
        })?;

        let token = result
            .as_str()
            .ok_or_else(|| Error::Authentication {
                message: "login returned a non-string token".into(),
            })?
            .to_owned();

        debug!("login successful");
        self.token = Some(token);
        Ok(())
    }

    // ── JSON-RPC core ────────────────────────────────────────────────

    /// Issue a JSON-RPC call and return the raw `result` value.
    ///
    /// Attaches the session token (when present), raises [`Error::Api`]
    /// when the response carries an `error` member, and surfaces transport
    /// failures and non-2xx statuses as distinct errors.
    pub async fn call(&self, method: &str, params: Value) -> Result<Value, Error> {
        let id = self.request_id.fetch_add(1, Ordering::Relaxed);
        let request = RpcRequest {
            jsonrpc: "2.0",
            method,
            params: &params,
            id,
            auth: self.token.as_deref(),
        };

        debug!(method, id, "POST {}", self.endpoint);

        let resp = self
            .http
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                status: status.as_u16(),
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;

        let envelope: RpcResponse =
            serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body: body.clone(),
            })?;

        if let Some(err) = envelope.error {
            return Err(Error::Api {
                code: err.code,
                message: err.message,
                data: err.data.map(|v| match v {
                    Value::String(s) => s,
                    other => other.to_string(),
                }),
            });
        }

        envelope.result.ok_or_else(|| Error::Deserialization {
            message: "response carried neither result nor error".into(),
            body,
        })
    }

    /// Like [`call`](Self::call), but deserializes the `result` into `T`.
    pub(crate) async fn call_as<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
    ) -> Result<T, Error> {
        let result = self.call(method, params).await?;
        serde_json::from_value(result.clone()).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body: result.to_string(),
        })
    }
}

// ── Wire envelope ────────────────────────────────────────────────────

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    method: &'a str,
    params: &'a Value,
    id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    auth: Option<&'a str>,
}

#[derive(serde::Deserialize)]
struct RpcResponse {
    result: Option<Value>,
    error: Option<RpcError>,
}

#[derive(serde::Deserialize)]
struct RpcError {
    code: i64,
    message: String,
    data: Option<Value>,
}
