//! Entity discovery strategies.
//!
//! Three interchangeable sources, one contract: produce a deduplicated,
//! sorted list of unique entity identifiers. Sorting is not needed for
//! correctness (keys are derived per entity) but keeps run output
//! deterministic and readable.
//!
//! - [`file`] -- scrape `UserParameter=` lines from a Zabbix agent
//!   configuration file, or read a tab-separated DID roster.
//! - [`exec`] -- scrape the output of `asterisk -rx` console commands.
//! - [`http`] -- query the Wolkvox real-time API for agent latency feeds.
//!
//! Text-scraping of console output is inherently brittle; it lives behind
//! these functions so a structured source can replace it without touching
//! the provisioning engine.

pub mod exec;
pub mod file;
pub mod http;
