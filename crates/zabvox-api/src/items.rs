// Item lookup, creation, and update methods

use serde_json::json;
use tracing::debug;

use crate::client::ZabbixClient;
use crate::error::Error;
use crate::types::{ItemIds, ItemRef, ItemUpdate, NewItem};

impl ZabbixClient {
    /// Look up an item by its unique key on a host.
    ///
    /// The key is the idempotence anchor: one entity derives one key, and
    /// existence of that key decides create vs skip/update.
    pub async fn item_by_key(&self, hostid: &str, key: &str) -> Result<Option<ItemRef>, Error> {
        let items: Vec<ItemRef> = self
            .call_as(
                "item.get",
                json!({
                    "hostids": hostid,
                    "filter": { "key_": key },
                    "output": ["itemid"],
                }),
            )
            .await?;
        Ok(items.into_iter().next())
    }

    /// List items whose key starts with `prefix` (substring search on the
    /// server, prefix-filtered client-side).
    pub async fn items_with_key_prefix(
        &self,
        hostid: &str,
        prefix: &str,
    ) -> Result<Vec<ItemRef>, Error> {
        let items: Vec<ItemRef> = self
            .call_as(
                "item.get",
                json!({
                    "hostids": hostid,
                    "search": { "key_": prefix },
                    "output": ["itemid", "key_", "name", "value_type"],
                }),
            )
            .await?;
        Ok(items
            .into_iter()
            .filter(|i| i.key.as_deref().is_some_and(|k| k.starts_with(prefix)))
            .collect())
    }

    /// Create an item, returning its new id.
    pub async fn create_item(&self, item: &NewItem) -> Result<String, Error> {
        debug!(key = %item.key, "item.create");
        let params = serde_json::to_value(item).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body: String::new(),
        })?;
        let ids: ItemIds = self.call_as("item.create", params).await?;
        ids.itemids
            .into_iter()
            .next()
            .ok_or_else(|| Error::Deserialization {
                message: "item.create returned no itemids".into(),
                body: String::new(),
            })
    }

    /// Overwrite an existing item's attributes (upsert-always suites).
    pub async fn update_item(&self, update: &ItemUpdate) -> Result<(), Error> {
        debug!(itemid = %update.itemid, "item.update");
        let params = serde_json::to_value(update).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body: String::new(),
        })?;
        let _: ItemIds = self.call_as("item.update", params).await?;
        Ok(())
    }
}
