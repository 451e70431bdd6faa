// zabvox-api: Async Rust client for the Zabbix JSON-RPC management API

pub mod client;
pub mod error;
pub mod types;

mod hosts;
mod items;
mod triggers;

pub use client::{ClientOptions, ZabbixClient};
pub use error::Error;
pub use types::{
    Host, HostInterface, ItemIds, ItemRef, ItemUpdate, NewItem, NewTrigger, TriggerIds,
    TriggerRef, TriggerTag,
};
