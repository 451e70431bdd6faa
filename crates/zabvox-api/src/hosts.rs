// Host and interface resolution methods
//
// Scripts target a single host per run; resolution tries the technical
// `host` name first and falls back to the visible `name`, matching how
// operators configure either one in the frontend.

use serde_json::json;
use tracing::debug;

use crate::client::ZabbixClient;
use crate::error::Error;
use crate::types::{Host, HostInterface};

impl ZabbixClient {
    /// Resolve a host by technical name, falling back to visible name.
    ///
    /// `host.get` with `filter.host`, then `filter.name`.
    pub async fn host_by_name(&self, name: &str) -> Result<Host, Error> {
        let output = json!(["hostid", "host", "name"]);

        let hosts: Vec<Host> = self
            .call_as(
                "host.get",
                json!({ "filter": { "host": [name] }, "output": output }),
            )
            .await?;
        if let Some(host) = hosts.into_iter().next() {
            debug!(hostid = %host.hostid, "resolved host by technical name");
            return Ok(host);
        }

        let hosts: Vec<Host> = self
            .call_as(
                "host.get",
                json!({ "filter": { "name": [name] }, "output": output }),
            )
            .await?;
        match hosts.into_iter().next() {
            Some(host) => {
                debug!(hostid = %host.hostid, "resolved host by visible name");
                Ok(host)
            }
            None => Err(Error::HostNotFound { name: name.into() }),
        }
    }

    /// Find the interface agent items bind to.
    ///
    /// Prefers a Zabbix agent interface (type 1); falls back to the first
    /// interface of any type; errors when the host has none.
    pub async fn agent_interface(&self, host: &Host) -> Result<HostInterface, Error> {
        let interfaces: Vec<HostInterface> = self
            .call_as(
                "hostinterface.get",
                json!({
                    "hostids": host.hostid,
                    "output": ["interfaceid", "type"],
                }),
            )
            .await?;

        interfaces
            .iter()
            .find(|i| i.is_agent())
            .or_else(|| interfaces.first())
            .cloned()
            .ok_or_else(|| Error::NoAgentInterface {
                name: host.host.clone(),
            })
    }
}
