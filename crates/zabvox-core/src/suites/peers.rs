//! SIP and PJSIP peer suites: status items, call-count items, and the
//! status-zero triggers derived from already-provisioned status items.
//!
//! The two channel technologies share every mechanism and differ only in
//! key namespace, item naming, and the status value type (SIP peer status
//! is an unsigned qualify time, PJSIP RTT comes back fractional).

use zabvox_api::{Host, ItemRef, NewItem, NewTrigger, TriggerTag};

use crate::provision::{ItemDraft, TriggerDraft};

/// Channel technology of an Asterisk peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tech {
    Sip,
    Pjsip,
}

impl Tech {
    /// Status item key namespace (`asterisk.` / `asterisk.pjsip.`).
    pub fn status_key_prefix(self) -> &'static str {
        match self {
            Tech::Sip => "asterisk.",
            Tech::Pjsip => "asterisk.pjsip.",
        }
    }

    /// Call-count item key namespace.
    pub fn calls_key_prefix(self) -> &'static str {
        match self {
            Tech::Sip => "asterisk.calls.",
            Tech::Pjsip => "asterisk.calls.pjsip.",
        }
    }

    /// Status item name prefix; the trigger suite recovers the peer name
    /// from it.
    pub fn status_name_prefix(self) -> &'static str {
        match self {
            Tech::Sip => "sip_status_",
            Tech::Pjsip => "pjsip_status_",
        }
    }

    /// Default trigger description prefix.
    pub fn trigger_prefix(self) -> &'static str {
        match self {
            Tech::Sip => "status_tsip_asterisk.",
            Tech::Pjsip => "status_tpjsip_asterisk.",
        }
    }

    /// Status value type: 3 (unsigned) for SIP, 0 (float) for PJSIP RTT.
    fn status_value_type(self) -> u8 {
        match self {
            Tech::Sip => 3,
            Tech::Pjsip => 0,
        }
    }
}

// History/trends in seconds, as the agent-item scripts have always sent
// them (90 and 365 days).
const STATUS_HISTORY: &str = "7776000";
const STATUS_TRENDS: &str = "31536000";

/// Status item drafts: one agent item per peer, polled every minute,
/// qualify time in ms.
pub fn status_items(
    hostid: &str,
    interfaceid: &str,
    tech: Tech,
    peers: &[String],
) -> Vec<ItemDraft> {
    peers
        .iter()
        .map(|peer| {
            let key = format!("{}{peer}", tech.status_key_prefix());
            let name = format!("{}{peer}", tech.status_name_prefix());
            let item = NewItem {
                interfaceid: Some(interfaceid.to_owned()),
                units: Some("ms".into()),
                delay: Some("1m".into()),
                history: STATUS_HISTORY.into(),
                trends: STATUS_TRENDS.into(),
                ..NewItem::base(hostid, &name, &key, 0, tech.status_value_type())
            };
            ItemDraft {
                key,
                label: peer.clone(),
                item,
            }
        })
        .collect()
}

/// Call-count item drafts: one agent item per peer backed by the
/// matching `UserParameter` on the host.
pub fn calls_items(
    hostid: &str,
    interfaceid: &str,
    tech: Tech,
    peers: &[String],
) -> Vec<ItemDraft> {
    peers
        .iter()
        .map(|peer| {
            let key = format!("{}{peer}", tech.calls_key_prefix());
            let name = match tech {
                Tech::Sip => format!("countcalls_tsip_{peer}"),
                Tech::Pjsip => format!("Llamadas activas PJSIP: {peer}"),
            };
            let item = NewItem {
                interfaceid: Some(interfaceid.to_owned()),
                units: Some("calls".into()),
                delay: Some("1m".into()),
                history: STATUS_HISTORY.into(),
                trends: STATUS_TRENDS.into(),
                ..NewItem::base(hostid, &name, &key, 0, 3)
            };
            ItemDraft {
                key,
                label: peer.clone(),
                item,
            }
        })
        .collect()
}

/// Keep only the rows that are real peer status items for `tech`.
///
/// The server-side key search matches substrings; this narrows it to
/// what the status-item suite actually writes: matching name and key
/// namespace, no `[` in the key (rules out bracketed keys sharing the
/// namespace), and for SIP the unsigned value type.
pub fn status_item_candidates(tech: Tech, items: Vec<ItemRef>) -> Vec<ItemRef> {
    items
        .into_iter()
        .filter(|it| {
            let name = it.name.as_deref().unwrap_or_default();
            let key = it.key.as_deref().unwrap_or_default();
            if !name.starts_with(tech.status_name_prefix()) {
                return false;
            }
            if !key.starts_with(tech.status_key_prefix()) || key.contains('[') {
                return false;
            }
            match tech {
                Tech::Sip => it.value_type.as_deref() == Some("3"),
                Tech::Pjsip => true,
            }
        })
        .collect()
}

/// Status-zero trigger drafts over existing status items.
///
/// Expression references the host's visible name; a qualify time of zero
/// means the peer stopped answering, hence Disaster severity.
pub fn status_triggers(
    tech: Tech,
    host: &Host,
    items: &[ItemRef],
    trigger_prefix: &str,
) -> Vec<TriggerDraft> {
    items
        .iter()
        .filter_map(|it| {
            let key = it.key.as_deref()?;
            let name = it.name.as_deref().unwrap_or_default();
            let peer = name
                .strip_prefix(tech.status_name_prefix())
                .or_else(|| key.strip_prefix(tech.status_key_prefix()))?;
            let description = format!("{trigger_prefix}{peer}");
            let trigger = NewTrigger {
                description: description.clone(),
                expression: format!("last(/{}/{key})=0", host.display_name()),
                priority: 5,
                status: 0,
                manual_close: 0,
                recovery_mode: None,
                recovery_expression: None,
                comments: None,
                opdata: None,
                tags: vec![
                    TriggerTag::new("service", "asterisk"),
                    TriggerTag::new("peer", peer),
                ],
            };
            Some(TriggerDraft {
                description,
                label: peer.to_owned(),
                trigger,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn host() -> Host {
        Host {
            hostid: "10084".into(),
            host: "gatewayp".into(),
            name: Some("Gateway Primario".into()),
        }
    }

    fn item_ref(key: &str, name: &str, value_type: &str) -> ItemRef {
        ItemRef {
            itemid: "1".into(),
            key: Some(key.into()),
            name: Some(name.into()),
            value_type: Some(value_type.into()),
        }
    }

    #[test]
    fn sip_status_item_attributes() {
        let drafts = status_items("10084", "5", Tech::Sip, &["Telmex_New".into()]);
        assert_eq!(drafts.len(), 1);
        let d = &drafts[0];
        assert_eq!(d.key, "asterisk.Telmex_New");
        assert_eq!(d.item.name, "sip_status_Telmex_New");
        assert_eq!(d.item.item_type, 0);
        assert_eq!(d.item.value_type, 3);
        assert_eq!(d.item.units.as_deref(), Some("ms"));
        assert_eq!(d.item.delay.as_deref(), Some("1m"));
        assert_eq!(d.item.history, "7776000");
        assert_eq!(d.item.trends, "31536000");
        assert_eq!(d.item.interfaceid.as_deref(), Some("5"));
    }

    #[test]
    fn pjsip_status_items_are_float() {
        let drafts = status_items("10084", "5", Tech::Pjsip, &["Trunk01".into()]);
        assert_eq!(drafts[0].key, "asterisk.pjsip.Trunk01");
        assert_eq!(drafts[0].item.name, "pjsip_status_Trunk01");
        assert_eq!(drafts[0].item.value_type, 0);
    }

    #[test]
    fn key_derivation_is_deterministic() {
        let a = status_items("10084", "5", Tech::Sip, &["Movistar".into()]);
        let b = status_items("10084", "5", Tech::Sip, &["Movistar".into()]);
        assert_eq!(a[0].key, b[0].key);
    }

    #[test]
    fn calls_items_use_the_calls_namespace() {
        let sip = calls_items("10084", "5", Tech::Sip, &["Movistar".into()]);
        assert_eq!(sip[0].key, "asterisk.calls.Movistar");
        assert_eq!(sip[0].item.name, "countcalls_tsip_Movistar");
        assert_eq!(sip[0].item.units.as_deref(), Some("calls"));

        let pjsip = calls_items("10084", "5", Tech::Pjsip, &["Trunk01".into()]);
        assert_eq!(pjsip[0].key, "asterisk.calls.pjsip.Trunk01");
    }

    #[test]
    fn candidate_filter_drops_bracketed_and_foreign_items() {
        let items = vec![
            item_ref("asterisk.Movistar", "sip_status_Movistar", "3"),
            // DID item shares nothing but would match a loose name search.
            item_ref("freeswitch.did.calls[123]", "sip_status_fake", "3"),
            // Bracketed key inside the namespace.
            item_ref("asterisk.calls[x]", "sip_status_x", "3"),
            // Float value type is not a SIP status item.
            item_ref("asterisk.Telmex", "sip_status_Telmex", "0"),
        ];
        let kept = status_item_candidates(Tech::Sip, items);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].key.as_deref(), Some("asterisk.Movistar"));
    }

    #[test]
    fn trigger_expression_uses_visible_host_name() {
        let items = vec![item_ref("asterisk.Movistar", "sip_status_Movistar", "3")];
        let drafts = status_triggers(Tech::Sip, &host(), &items, "status_tsip_asterisk.");
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].description, "status_tsip_asterisk.Movistar");
        assert_eq!(
            drafts[0].trigger.expression,
            "last(/Gateway Primario/asterisk.Movistar)=0"
        );
        assert_eq!(drafts[0].trigger.priority, 5);
        assert_eq!(drafts[0].trigger.tags[1].value, "Movistar");
    }

    #[test]
    fn trigger_peer_falls_back_to_key_suffix() {
        let items = vec![ItemRef {
            itemid: "1".into(),
            key: Some("asterisk.pjsip.Trunk02".into()),
            name: Some(String::new()),
            value_type: Some("0".into()),
        }];
        let drafts = status_triggers(Tech::Pjsip, &host(), &items, "status_tpjsip_asterisk.");
        assert_eq!(drafts[0].label, "Trunk02");
    }
}
