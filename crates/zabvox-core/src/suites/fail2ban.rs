//! Fail2ban suite: the fixed four-item trapper catalog fed by the
//! collection script on the host.

use zabvox_api::NewItem;

use crate::catalog::FAIL2BAN_ITEMS;
use crate::provision::ItemDraft;

pub fn fail2ban_items(hostid: &str) -> Vec<ItemDraft> {
    FAIL2BAN_ITEMS
        .iter()
        .map(|entry| {
            let item = NewItem {
                units: (!entry.units.is_empty()).then(|| entry.units.to_owned()),
                history: "31d".into(),
                description: Some(entry.description.to_owned()),
                ..NewItem::base(hostid, entry.name, entry.key, 2, 3)
            };
            ItemDraft {
                key: entry.key.to_owned(),
                label: entry.name.to_owned(),
                item,
            }
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn catalog_becomes_four_trapper_drafts() {
        let drafts = fail2ban_items("10084");
        assert_eq!(drafts.len(), 4);
        assert!(drafts.iter().all(|d| d.item.item_type == 2));
        assert!(drafts.iter().all(|d| d.item.history == "31d"));
        assert!(drafts.iter().all(|d| d.item.trends == "365d"));
    }

    #[test]
    fn status_item_has_no_units() {
        let drafts = fail2ban_items("10084");
        let status = drafts.iter().find(|d| d.key == "fail2ban.status").unwrap();
        assert!(status.item.units.is_none());
        let total = drafts
            .iter()
            .find(|d| d.key == "fail2ban.banned.total")
            .unwrap();
        assert_eq!(total.item.units.as_deref(), Some("IPs"));
    }
}
