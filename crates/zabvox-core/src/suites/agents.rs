//! Agent-latency suite: trapper items fed by the latency collector.
//!
//! Runs under the upsert policy so a renamed agent gets its item name
//! refreshed instead of drifting.

use std::collections::BTreeMap;

use zabvox_api::NewItem;

use crate::provision::ItemDraft;

/// Trapper item drafts, one per agent, keyed `agent.latency[<code>]`.
pub fn latency_items(hostid: &str, agents: &BTreeMap<String, String>) -> Vec<ItemDraft> {
    agents
        .iter()
        .map(|(code, name)| {
            let key = format!("agent.latency[{code}]");
            let item_name = format!("Agent {code} - {name} - Latency");
            let item = NewItem {
                units: Some("ms".into()),
                description: Some(format!("Latencia del agente {code}")),
                ..NewItem::base(hostid, &item_name, &key, 2, 0)
            };
            ItemDraft {
                key,
                label: format!("{code} - {name}"),
                item,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn latency_item_attributes() {
        let agents: BTreeMap<String, String> = [("1001".to_owned(), "Alice".to_owned())].into();
        let drafts = latency_items("10084", &agents);
        assert_eq!(drafts.len(), 1);
        let item = &drafts[0].item;
        assert_eq!(drafts[0].key, "agent.latency[1001]");
        assert_eq!(item.name, "Agent 1001 - Alice - Latency");
        assert_eq!(item.item_type, 2);
        assert_eq!(item.value_type, 0);
        assert_eq!(item.units.as_deref(), Some("ms"));
        assert_eq!(item.history, "90d");
        assert_eq!(item.trends, "365d");
        assert!(item.delay.is_none());
    }

    #[test]
    fn drafts_follow_map_order() {
        let agents: BTreeMap<String, String> = [
            ("1002".to_owned(), "Bob".to_owned()),
            ("1001".to_owned(), "Alice".to_owned()),
        ]
        .into();
        let drafts = latency_items("10084", &agents);
        assert_eq!(drafts[0].key, "agent.latency[1001]");
        assert_eq!(drafts[1].key, "agent.latency[1002]");
    }
}
