// Remote-API-based discovery
//
// Queries the Wolkvox real-time endpoint for the latency feed and groups
// the nested per-agent records by their composite `agent_id`
// (`<code>-<name>`). The only discovery strategy with a retry: the feed
// is intermittently empty, so a bounded fixed-delay retry runs before
// giving up.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::CoreError;

const MAX_ATTEMPTS: u32 = 2;
const RETRY_DELAY: Duration = Duration::from_secs(3);

/// Connection parameters for the Wolkvox real-time API.
#[derive(Debug, Clone)]
pub struct AgentFeed {
    /// Endpoint URL, e.g. `https://wv0041.wolkvox.com/api/v2/real_time.php`.
    pub api_url: String,
    /// Operation server id, sent as the `wolkvox_server` header.
    pub server: String,
    /// API token, sent as the `wolkvox-token` header.
    pub token: String,
    pub timeout: Duration,
    /// Verify the feed's TLS certificate; carries the same resolved
    /// setting as the Zabbix client (`--insecure` turns it off).
    pub verify_tls: bool,
}

#[derive(Deserialize)]
struct Feed {
    #[serde(default)]
    data: Vec<FeedEntry>,
}

#[derive(Deserialize)]
struct FeedEntry {
    #[serde(default)]
    by_agent: Vec<AgentRecord>,
}

#[derive(Deserialize)]
struct AgentRecord {
    #[serde(default)]
    agent_id: String,
}

impl AgentFeed {
    /// Fetch the latency feed and return `code -> display name`, sorted by
    /// code. Retries [`MAX_ATTEMPTS`] times with a fixed delay; an empty
    /// feed on the last attempt is fatal.
    pub async fn agents(&self) -> Result<BTreeMap<String, String>, CoreError> {
        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(!self.verify_tls)
            .timeout(self.timeout)
            .build()
            .map_err(|e| CoreError::AgentFeed {
                attempts: 0,
                message: e.to_string(),
            })?;

        let mut last_error = String::from("feed returned no agents");
        for attempt in 1..=MAX_ATTEMPTS {
            match self.fetch_once(&client).await {
                Ok(agents) if !agents.is_empty() => {
                    debug!(count = agents.len(), attempt, "agents discovered");
                    return Ok(agents);
                }
                Ok(_) => {
                    warn!(attempt, "latency feed empty");
                }
                Err(message) => {
                    warn!(attempt, %message, "latency feed request failed");
                    last_error = message;
                }
            }
            if attempt < MAX_ATTEMPTS {
                tokio::time::sleep(RETRY_DELAY).await;
            }
        }

        Err(CoreError::AgentFeed {
            attempts: MAX_ATTEMPTS,
            message: last_error,
        })
    }

    async fn fetch_once(&self, client: &reqwest::Client) -> Result<BTreeMap<String, String>, String> {
        let feed: Feed = client
            .get(format!("{}?api=latency", self.api_url))
            .header("wolkvox_server", &self.server)
            .header("wolkvox-token", &self.token)
            .send()
            .await
            .map_err(|e| e.to_string())?
            .error_for_status()
            .map_err(|e| e.to_string())?
            .json()
            .await
            .map_err(|e| e.to_string())?;

        Ok(group_agents(&feed))
    }
}

/// Group nested per-agent records into `code -> name`.
///
/// `agent_id` is `<code>-<name>`; records without the separator are not
/// agents and are dropped. A code seen twice keeps the first name.
fn group_agents(feed: &Feed) -> BTreeMap<String, String> {
    let mut agents = BTreeMap::new();
    for entry in &feed.data {
        for record in &entry.by_agent {
            let Some((code, name)) = record.agent_id.split_once('-') else {
                continue;
            };
            if code.is_empty() {
                continue;
            }
            let name = if name.is_empty() { code } else { name };
            agents.entry(code.to_owned()).or_insert_with(|| name.to_owned());
        }
    }
    agents
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{header, method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn feed(ids: &[&str]) -> Feed {
        Feed {
            data: vec![FeedEntry {
                by_agent: ids
                    .iter()
                    .map(|id| AgentRecord {
                        agent_id: (*id).to_owned(),
                    })
                    .collect(),
            }],
        }
    }

    #[test]
    fn groups_by_code_and_keeps_first_name() {
        let agents = group_agents(&feed(&["1001-Alice", "1002-Bob", "1001-Duplicate"]));
        assert_eq!(agents.len(), 2);
        assert_eq!(agents["1001"], "Alice");
        assert_eq!(agents["1002"], "Bob");
    }

    #[test]
    fn records_without_separator_are_dropped() {
        let agents = group_agents(&feed(&["supervisor", "1003-Carol"]));
        assert_eq!(agents.len(), 1);
        assert!(agents.contains_key("1003"));
    }

    #[test]
    fn name_containing_dashes_survives_split() {
        let agents = group_agents(&feed(&["1004-Mary-Jane Perez"]));
        assert_eq!(agents["1004"], "Mary-Jane Perez");
    }

    // The feed client is built with certificate verification on by
    // default; only --insecure turns it off.
    #[tokio::test]
    async fn verifying_client_fetches_and_groups_the_feed() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(query_param("api", "latency"))
            .and(header("wolkvox_server", "wv0041"))
            .and(header("wolkvox-token", "tok123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{ "by_agent": [
                    { "agent_id": "1001-Alice" },
                    { "agent_id": "1002-Bob" },
                ]}],
            })))
            .mount(&server)
            .await;

        let feed = AgentFeed {
            api_url: server.uri(),
            server: "wv0041".into(),
            token: "tok123".into(),
            timeout: Duration::from_secs(5),
            verify_tls: true,
        };

        let agents = feed.agents().await.unwrap();
        assert_eq!(agents.len(), 2);
        assert_eq!(agents["1001"], "Alice");
    }
}
