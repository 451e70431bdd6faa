//! DID call-count suite: HTTP-agent items that POST the DID to the
//! FreeSWITCH counting endpoint once a minute.

use zabvox_api::NewItem;

use crate::discovery::file::Did;
use crate::provision::ItemDraft;

/// HTTP-agent item drafts, one per roster entry.
///
/// The item itself does the polling server-side, so no interface binding
/// and no agent on the host. TLS verification stays off: the counting
/// endpoint runs on a self-signed cert.
pub fn did_items(hostid: &str, api_url: &str, dids: &[Did]) -> Vec<ItemDraft> {
    dids.iter()
        .map(|did| {
            let key = format!("freeswitch.did.calls[{}]", did.did);
            let name = format!("{}_{}", did.did, did.account);
            let description = format!(
                "Monitoreo de llamadas entrantes DID\nPaís: {}\nCuenta: {}\nIP de Desborde: {}",
                did.country, did.account, did.overflow_ip
            );
            let posts = format!("{{\n    \"did\":\"{}\"\n}}", did.did);
            let item = NewItem {
                units: Some("calls".into()),
                delay: Some("1m".into()),
                description: Some(description),
                timeout: Some("3s".into()),
                url: Some(api_url.to_owned()),
                request_method: Some(1),
                post_type: Some(0),
                posts: Some(posts),
                headers: Some(
                    [("Content-Type".to_owned(), "application/json".to_owned())]
                        .into_iter()
                        .collect(),
                ),
                status_codes: Some("200".into()),
                follow_redirects: Some(1),
                retrieve_mode: Some(0),
                output_format: Some(0),
                verify_peer: Some(0),
                verify_host: Some(0),
                ..NewItem::base(hostid, &name, &key, 19, 3)
            };
            ItemDraft {
                key,
                label: did.did.clone(),
                item,
            }
        })
        .collect()
}
