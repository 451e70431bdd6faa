//! Static catalogs.
//!
//! The audit-log alert types and the fail2ban item set are fixed by the
//! collectors that feed them; the keys here must match what those
//! collectors send, so they live in one table instead of being scattered
//! through the draft builders.

/// One audit-log alert type: detected by substring match on the audit
/// feed's `action` field, materialized as a `.data`/`.count` item pair
/// and one delta trigger.
#[derive(Debug, Clone, Copy)]
pub struct AlertType {
    /// Key segment, e.g. `studio_compile` in `<op>.audit.studio_compile.*`.
    pub key: &'static str,
    /// Short name used in item names.
    pub name: &'static str,
    /// Trigger description suffix (differs from `name` for some types).
    pub trigger_name: &'static str,
    pub description: &'static str,
    /// Substring the collector matches in the audit action field.
    pub pattern: &'static str,
    /// Trigger severity (1 = Info .. 5 = Disaster).
    pub severity: u8,
}

pub const ALERT_TYPES: &[AlertType] = &[
    AlertType {
        key: "studio_compile",
        name: "Studio Compile",
        trigger_name: "Studio Compile Detected",
        description: "Compilación en wolkvox Studio",
        pattern: "wolkvox studio: compile",
        severity: 2,
    },
    AlertType {
        key: "diagram_studio",
        name: "Diagram Studio",
        trigger_name: "Diagram Studio Change",
        description: "Cambios en Diagram Studio",
        pattern: "DIAGRAM STUDIO:",
        severity: 1,
    },
    AlertType {
        key: "delete_action",
        name: "Delete Action",
        trigger_name: "Delete Action Detected",
        description: "Acción de eliminación",
        pattern: "Delete",
        severity: 4,
    },
    AlertType {
        key: "refix",
        name: "Refix Action",
        trigger_name: "Refix Action",
        description: "Acciones de Refix",
        pattern: "REFIX:",
        severity: 1,
    },
    AlertType {
        key: "api_configuration",
        name: "API Configuration",
        trigger_name: "API Configuration Change",
        description: "Cambios en configuración de API",
        pattern: "API Configuration",
        severity: 2,
    },
    AlertType {
        key: "tts_activated",
        name: "TTS Component Activated",
        trigger_name: "TTS Component Activated",
        description: "Componente TTS activado",
        pattern: "The TTS component has been activated",
        severity: 1,
    },
    AlertType {
        key: "nlp_ai_activated",
        name: "NLP AI Activated",
        trigger_name: "NLP AI Activated",
        description: "Componente NLP AI activado",
        pattern: "The NLP AI component has been activated",
        severity: 1,
    },
    AlertType {
        key: "general_nlp_activated",
        name: "General NLP Activated",
        trigger_name: "General NLP Activated",
        description: "Componente General NLP activado",
        pattern: "The General NLP component has been activated",
        severity: 1,
    },
    AlertType {
        key: "predictive_stop",
        name: "Predictive Campaign Stop",
        trigger_name: "Predictive Campaign Stopped",
        description: "Detención de campaña predictiva",
        pattern: "PREDICTIVE: Stop campaign",
        severity: 2,
    },
    AlertType {
        key: "profile_change",
        name: "Profile Change",
        trigger_name: "Profile Change",
        description: "Cambio de perfil de usuario",
        pattern: "changed their profile",
        severity: 1,
    },
];

/// One fail2ban trapper item fed by the collection script on the host.
#[derive(Debug, Clone, Copy)]
pub struct Fail2banItem {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub units: &'static str,
}

pub const FAIL2BAN_ITEMS: &[Fail2banItem] = &[
    Fail2banItem {
        key: "fail2ban.status",
        name: "Fail2ban Status",
        description: "Estado del servicio fail2ban: 1=activo, 0=caido",
        units: "",
    },
    Fail2banItem {
        key: "fail2ban.banned.total",
        name: "Fail2ban Banned Total",
        description: "Total de IPs baneadas en todas las jails",
        units: "IPs",
    },
    Fail2banItem {
        key: "fail2ban.banned.asterisk",
        name: "Fail2ban Banned Asterisk",
        description: "IPs baneadas en jail asterisk-iptables",
        units: "IPs",
    },
    Fail2banItem {
        key: "fail2ban.banned.ssh",
        name: "Fail2ban Banned SSH",
        description: "IPs baneadas en jail sshd",
        units: "IPs",
    },
];

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn alert_type_keys_are_unique() {
        let keys: BTreeSet<&str> = ALERT_TYPES.iter().map(|a| a.key).collect();
        assert_eq!(keys.len(), ALERT_TYPES.len());
    }

    #[test]
    fn severities_stay_in_range() {
        assert!(ALERT_TYPES.iter().all(|a| (1..=5).contains(&a.severity)));
    }

    #[test]
    fn fail2ban_keys_share_the_namespace() {
        assert!(FAIL2BAN_ITEMS.iter().all(|i| i.key.starts_with("fail2ban.")));
    }
}
