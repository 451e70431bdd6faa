//! Discovery and provisioning logic for the Zabbix VoIP suites.
//!
//! This crate owns everything between "what exists on the phone system"
//! and "what the Zabbix server should hold":
//!
//! - **[`discovery`]** -- three entity sources with one contract: scrape a
//!   Zabbix agent configuration file or DID roster ([`discovery::file`]),
//!   parse `asterisk -rx` console output ([`discovery::exec`]), or query
//!   the Wolkvox real-time API ([`discovery::http`]).
//!
//! - **[`suites`]** -- per-suite draft builders that turn discovered
//!   entities into fully-specified item/trigger payloads (SIP/PJSIP
//!   peers, DIDs, agent latency, audit log, fail2ban).
//!
//! - **[`provision`]** -- the generic engine: look each draft up on the
//!   server, create what is missing, and on existence either skip
//!   ([`ExistsPolicy::CreateOnly`]) or overwrite
//!   ([`ExistsPolicy::Upsert`]). Per-entity failures never abort a run.
//!
//! - **[`catalog`]** -- the fixed audit alert-type and fail2ban tables.

pub mod catalog;
pub mod discovery;
pub mod error;
pub mod provision;
pub mod suites;

pub use error::CoreError;
pub use provision::{
    Action, ExistsPolicy, ItemDraft, Outcome, Record, Summary, TriggerDraft, apply_items,
    apply_triggers, delete_triggers_with_prefix,
};
