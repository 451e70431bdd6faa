//! Clap derive structures for the `zabvox` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// zabvox -- provision Zabbix monitoring for VoIP platforms
#[derive(Debug, Parser)]
#[command(
    name = "zabvox",
    version,
    about = "Provision Zabbix items and triggers for VoIP monitoring",
    long_about = "Provisions Zabbix monitoring objects for Asterisk peers, FreeSWITCH DIDs,\n\
        Wolkvox agents, audit logs, and fail2ban via the JSON-RPC management API.\n\n\
        Each suite discovers its entities (agent configuration, asterisk console,\n\
        or remote API), diffs them against the server, and creates what is missing.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Configuration profile to use
    #[arg(long, short = 'p', env = "ZBXPROV_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Zabbix API endpoint URL (e.g. http://zabbix/zabbix/api_jsonrpc.php)
    #[arg(long, env = "ZBXPROV_URL", global = true)]
    pub url: Option<String>,

    /// Zabbix API username
    #[arg(long, short = 'u', env = "ZBXPROV_USERNAME", global = true)]
    pub username: Option<String>,

    /// Zabbix API password
    #[arg(long, env = "ZBXPROV_PASSWORD", global = true, hide_env = true)]
    pub password: Option<String>,

    /// Target host name in Zabbix (technical or visible)
    #[arg(long, short = 'H', env = "ZBXPROV_HOST", global = true)]
    pub host: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "ZBXPROV_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "ZBXPROV_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "ZBXPROV_TIMEOUT", default_value = "30", global = true)]
    pub timeout: u64,

    /// Print the plan without creating, updating, or deleting anything
    #[arg(long, global = true)]
    pub dry_run: bool,
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Per-entity lines plus a summary table (default, interactive)
    Table,
    /// Pretty-printed JSON report
    Json,
    /// One `STATUS<TAB>key` line per entity (scripting)
    Plain,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Provision SIP peer monitoring (chan_sip)
    Sip(SipArgs),

    /// Provision PJSIP endpoint monitoring
    Pjsip(PjsipArgs),

    /// Provision FreeSWITCH DID call-count monitoring
    Did(DidArgs),

    /// Provision Wolkvox agent monitoring
    Agents(AgentsArgs),

    /// Provision Wolkvox audit-log monitoring
    Audit(AuditArgs),

    /// Provision fail2ban monitoring
    Fail2ban(Fail2banArgs),

    /// Inspect the resolved configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── SIP / PJSIP ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SipArgs {
    #[command(subcommand)]
    pub command: PeerCommand,
}

#[derive(Debug, Args)]
pub struct PjsipArgs {
    #[command(subcommand)]
    pub command: PeerCommand,
}

/// Shared SIP/PJSIP subcommands; the parent decides the technology.
#[derive(Debug, Subcommand)]
pub enum PeerCommand {
    /// Create status items for peers discovered on the asterisk console
    Items {
        /// Path to the asterisk control binary
        #[arg(long, env = "ZBXPROV_ASTERISK_BIN", default_value = "/usr/sbin/asterisk")]
        asterisk_bin: PathBuf,
    },

    /// Create call-count items for peers from the agent configuration
    Calls {
        /// Zabbix agent configuration file to scrape for UserParameter lines
        #[arg(
            long,
            env = "ZBXPROV_AGENT_CONF",
            default_value = "/etc/zabbix/zabbix_agentd.conf"
        )]
        agent_conf: PathBuf,

        /// Where to discover peers from
        #[arg(long, value_enum, default_value = "agent-conf")]
        source: CallsSource,

        /// Path to the asterisk control binary (for --source console)
        #[arg(long, env = "ZBXPROV_ASTERISK_BIN", default_value = "/usr/sbin/asterisk")]
        asterisk_bin: PathBuf,

        /// Extra peer names to provision in addition to discovered ones
        #[arg(long)]
        extra: Vec<String>,
    },

    /// Create status-zero triggers for existing status items
    Triggers {
        /// Trigger description prefix (default depends on the technology)
        #[arg(long)]
        trigger_prefix: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CallsSource {
    /// Scrape `UserParameter=` lines from the agent configuration
    AgentConf,
    /// Parse the asterisk console peer listing
    Console,
}

// ── DID ──────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct DidArgs {
    #[command(subcommand)]
    pub command: DidCommand,
}

#[derive(Debug, Subcommand)]
pub enum DidCommand {
    /// Create HTTP-agent call-count items for a DID roster
    Items {
        /// Tab-separated roster file: did, country, account, overflow IP
        #[arg(long)]
        roster: PathBuf,

        /// Counting endpoint the items poll
        #[arg(long, env = "ZBXPROV_DID_API_URL")]
        api_url: String,
    },
}

// ── Agents ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AgentsArgs {
    #[command(subcommand)]
    pub command: AgentsCommand,
}

#[derive(Debug, Subcommand)]
pub enum AgentsCommand {
    /// Create/update latency trapper items for Wolkvox agents
    Latency {
        /// Wolkvox real-time API URL
        #[arg(long, env = "ZBXPROV_WOLKVOX_API_URL")]
        api_url: String,

        /// Wolkvox operation server id (wolkvox_server header)
        #[arg(long, env = "ZBXPROV_WOLKVOX_SERVER")]
        server: String,

        /// Wolkvox API token (wolkvox-token header)
        #[arg(long, env = "ZBXPROV_WOLKVOX_TOKEN", hide_env = true)]
        token: String,
    },
}

// ── Audit ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AuditArgs {
    #[command(subcommand)]
    pub command: AuditCommand,
}

#[derive(Debug, Subcommand)]
pub enum AuditCommand {
    /// Create/update the audit-log item pairs for an operation
    Items {
        /// Wolkvox operation name (prefixes keys and item names)
        operation: String,
    },

    /// Rebuild the audit-log triggers for an operation
    Triggers {
        /// Wolkvox operation name
        operation: String,
    },
}

// ── Fail2ban ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct Fail2banArgs {
    #[command(subcommand)]
    pub command: Fail2banCommand,
}

#[derive(Debug, Subcommand)]
pub enum Fail2banCommand {
    /// Create the fixed fail2ban trapper item set
    Items,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the resolved configuration for the active profile
    Show,

    /// List configured profiles
    Profiles,

    /// Print the configuration file path
    Path,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
