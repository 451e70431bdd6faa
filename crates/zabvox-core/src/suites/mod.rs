//! Draft builders, one module per provisioning suite.
//!
//! A suite turns discovered entities (plus the target host context) into
//! fully-specified item/trigger drafts; the engine in
//! [`crate::provision`] decides what to do with each draft. Builders are
//! pure so the attribute sets are testable without a server.

pub mod agents;
pub mod audit;
pub mod did;
pub mod fail2ban;
pub mod peers;
