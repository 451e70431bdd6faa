// Trigger lookup, creation, and deletion methods
//
// Triggers have no key; their description is the uniqueness anchor.
// A description collision is always a skip, never a duplicate.

use serde_json::json;
use tracing::debug;

use crate::client::ZabbixClient;
use crate::error::Error;
use crate::types::{NewTrigger, TriggerIds, TriggerRef};

impl ZabbixClient {
    /// `true` when a trigger with exactly this description exists on the host.
    pub async fn trigger_exists(&self, hostid: &str, description: &str) -> Result<bool, Error> {
        let triggers: Vec<TriggerRef> = self
            .call_as(
                "trigger.get",
                json!({
                    "hostids": hostid,
                    "filter": { "description": description },
                    "output": ["triggerid"],
                }),
            )
            .await?;
        Ok(!triggers.is_empty())
    }

    /// List triggers whose description starts with `prefix`.
    ///
    /// The server search is substring-based, so the prefix condition is
    /// re-checked client-side.
    pub async fn triggers_with_description_prefix(
        &self,
        hostid: &str,
        prefix: &str,
    ) -> Result<Vec<TriggerRef>, Error> {
        let triggers: Vec<TriggerRef> = self
            .call_as(
                "trigger.get",
                json!({
                    "hostids": hostid,
                    "search": { "description": prefix },
                    "output": ["triggerid", "description"],
                }),
            )
            .await?;
        Ok(triggers
            .into_iter()
            .filter(|t| t.description.as_deref().is_some_and(|d| d.starts_with(prefix)))
            .collect())
    }

    /// Create a trigger, returning its new id.
    pub async fn create_trigger(&self, trigger: &NewTrigger) -> Result<String, Error> {
        debug!(description = %trigger.description, "trigger.create");
        let params = serde_json::to_value(trigger).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body: String::new(),
        })?;
        let ids: TriggerIds = self.call_as("trigger.create", params).await?;
        ids.triggerids
            .into_iter()
            .next()
            .ok_or_else(|| Error::Deserialization {
                message: "trigger.create returned no triggerids".into(),
                body: String::new(),
            })
    }

    /// Delete triggers by id. No-op on an empty slice.
    pub async fn delete_triggers(&self, ids: &[String]) -> Result<(), Error> {
        if ids.is_empty() {
            return Ok(());
        }
        debug!(count = ids.len(), "trigger.delete");
        let _: TriggerIds = self.call_as("trigger.delete", json!(ids)).await?;
        Ok(())
    }
}
