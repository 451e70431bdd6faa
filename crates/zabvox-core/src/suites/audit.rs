//! Audit-log suite: per alert type, a `.data`/`.count` item pair and a
//! counter-delta trigger, all namespaced by the Wolkvox operation.
//!
//! Items run under the upsert policy. Triggers are rebuilt from the
//! catalog: the caller first deletes everything under the operation's
//! description prefix, then creates the current set.

use zabvox_api::{Host, NewItem, NewTrigger, TriggerTag};

use crate::catalog::{ALERT_TYPES, AlertType};
use crate::provision::{ItemDraft, TriggerDraft};

/// Description prefix shared by every trigger of one operation; also the
/// deletion scope for the rebuild pass.
pub fn trigger_prefix(operation: &str) -> String {
    format!("[{}]", operation.to_uppercase())
}

fn key_base(operation: &str, alert: &AlertType) -> String {
    format!("{operation}.audit.{}", alert.key)
}

/// Item-pair drafts for every alert type: `.data` holds the event JSON
/// (text, no trends), `.count` the running event counter the triggers
/// watch.
pub fn audit_items(hostid: &str, operation: &str) -> Vec<ItemDraft> {
    let op_upper = operation.to_uppercase();
    let mut drafts = Vec::with_capacity(ALERT_TYPES.len() * 2);

    for alert in ALERT_TYPES {
        let base = key_base(operation, alert);

        let data_key = format!("{base}.data");
        let data_item = NewItem {
            history: "30d".into(),
            trends: "0".into(),
            description: Some(format!("[{operation}] {} - JSON data", alert.description)),
            ..NewItem::base(
                hostid,
                &format!("[{op_upper}] Audit - {} - Data", alert.name),
                &data_key,
                2,
                4,
            )
        };
        drafts.push(ItemDraft {
            key: data_key,
            label: format!("{} data", alert.name),
            item: data_item,
        });

        let count_key = format!("{base}.count");
        let count_item = NewItem {
            history: "30d".into(),
            description: Some(format!(
                "[{operation}] {} - Event counter for alerts",
                alert.description
            )),
            ..NewItem::base(
                hostid,
                &format!("[{op_upper}] Audit - {} - Count", alert.name),
                &count_key,
                2,
                3,
            )
        };
        drafts.push(ItemDraft {
            key: count_key,
            label: format!("{} count", alert.name),
            item: count_item,
        });
    }

    drafts
}

/// Trigger drafts for every alert type.
///
/// The expression fires on any counter increment between the last two
/// values and recovers when the delta returns to zero; opdata surfaces
/// the event JSON from the paired `.data` item.
pub fn audit_triggers(host: &Host, operation: &str) -> Vec<TriggerDraft> {
    let prefix = trigger_prefix(operation);
    let host_name = host.host.as_str();

    ALERT_TYPES
        .iter()
        .map(|alert| {
            let base = key_base(operation, alert);
            let delta = format!("last(/{host_name}/{base}.count)-last(/{host_name}/{base}.count,#2)");
            let description = format!("{prefix} {}", alert.trigger_name);
            let trigger = NewTrigger {
                description: description.clone(),
                expression: format!("{delta}>0"),
                priority: alert.severity,
                status: 0,
                manual_close: 1,
                recovery_mode: Some(1),
                recovery_expression: Some(format!("{delta}=0")),
                comments: Some(format!("{} - Audit Log Event", alert.description)),
                opdata: Some(format!("{{ITEM.LASTVALUE:{base}.data}}")),
                tags: vec![
                    TriggerTag::new("component", "audit_log"),
                    TriggerTag::new("operation", operation),
                    TriggerTag::new("alert_type", alert.key),
                ],
            };
            TriggerDraft {
                description,
                label: alert.trigger_name.to_owned(),
                trigger,
            }
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn host() -> Host {
        Host {
            hostid: "10084".into(),
            host: "monitoralo".into(),
            name: None,
        }
    }

    #[test]
    fn item_pairs_cover_every_alert_type() {
        let drafts = audit_items("stargroup", "stargroup");
        assert_eq!(drafts.len(), ALERT_TYPES.len() * 2);
    }

    #[test]
    fn data_and_count_attributes_differ() {
        let drafts = audit_items("10084", "stargroup");
        let data = drafts
            .iter()
            .find(|d| d.key == "stargroup.audit.studio_compile.data")
            .unwrap();
        let count = drafts
            .iter()
            .find(|d| d.key == "stargroup.audit.studio_compile.count")
            .unwrap();

        assert_eq!(data.item.name, "[STARGROUP] Audit - Studio Compile - Data");
        assert_eq!(data.item.value_type, 4);
        assert_eq!(data.item.trends, "0");

        assert_eq!(count.item.name, "[STARGROUP] Audit - Studio Compile - Count");
        assert_eq!(count.item.value_type, 3);
        assert_eq!(count.item.trends, "365d");
        assert_eq!(count.item.history, "30d");
    }

    #[test]
    fn trigger_delta_expression_and_recovery() {
        let drafts = audit_triggers(&host(), "stargroup");
        let t = drafts
            .iter()
            .find(|d| d.description == "[STARGROUP] Delete Action Detected")
            .unwrap();
        assert_eq!(
            t.trigger.expression,
            "last(/monitoralo/stargroup.audit.delete_action.count)-last(/monitoralo/stargroup.audit.delete_action.count,#2)>0"
        );
        assert_eq!(
            t.trigger.recovery_expression.as_deref(),
            Some("last(/monitoralo/stargroup.audit.delete_action.count)-last(/monitoralo/stargroup.audit.delete_action.count,#2)=0")
        );
        assert_eq!(t.trigger.recovery_mode, Some(1));
        assert_eq!(t.trigger.priority, 4);
        assert_eq!(t.trigger.manual_close, 1);
        assert_eq!(
            t.trigger.opdata.as_deref(),
            Some("{ITEM.LASTVALUE:stargroup.audit.delete_action.data}")
        );
    }

    #[test]
    fn prefix_uppercases_the_operation() {
        assert_eq!(trigger_prefix("stargroup"), "[STARGROUP]");
        let drafts = audit_triggers(&host(), "stargroup");
        assert!(
            drafts
                .iter()
                .all(|d| d.description.starts_with("[STARGROUP] "))
        );
    }
}
