use serde::{Deserialize, Serialize};

/// Where the plugin currently sits in its pairing/connection flow.
///
/// Wire values are snake_case. Earlier plugin revisions used different
/// names for some of these; those are kept as aliases so an older backend
/// still parses. Anything else collapses to `Unknown`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStep {
    #[default]
    #[serde(alias = "login_needed")]
    NotConfigured,
    #[serde(alias = "qr_read")]
    AwaitingAuthorization,
    Connected,
    Ready,
    Disconnected,
    #[serde(alias = "error_connection")]
    Error,
    #[serde(other)]
    Unknown,
}

/// Three-way presentation class derived from the connection step.
///
/// Both the navbar indicator and the settings panel color from this one
/// table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusIndicator {
    Healthy,
    Intermediate,
    Attention,
}

impl ConnectionStep {
    /// Total over every step, `Unknown` included.
    pub fn indicator(self) -> StatusIndicator {
        match self {
            ConnectionStep::Connected => StatusIndicator::Healthy,
            ConnectionStep::Ready => StatusIndicator::Intermediate,
            _ => StatusIndicator::Attention,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ConnectionStep::NotConfigured => "Login needed",
            ConnectionStep::AwaitingAuthorization => "Awaiting authorization",
            ConnectionStep::Connected => "Connected",
            ConnectionStep::Ready => "Ready",
            ConnectionStep::Disconnected => "Disconnected",
            ConnectionStep::Error => "Connection error",
            ConnectionStep::Unknown => "Unknown",
        }
    }
}

/// The locally held copy of the plugin's status, replaced on every update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub step: ConnectionStep,
    pub configured: bool,
    pub config_cancelled: bool,
    pub socket_connected: bool,
    pub docker_available: bool,
    pub docker_running: bool,
    pub installing: bool,
    pub install_progress: u8,
    pub reboot_required: bool,
    /// Empty means no error. Only a later update carrying an empty value
    /// clears a non-empty one.
    pub error: String,
    /// Pairing credential, present only while authorization is pending.
    pub auth_token: Option<String>,
    pub os: String,
    pub machine: String,
    pub status: String,
}

/// Permissive wire form shared by the push and pull paths: every field is
/// optional, and legacy field names from earlier plugin revisions are
/// accepted as aliases.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PartialStatus {
    pub step: Option<ConnectionStep>,
    #[serde(alias = "configurated")]
    pub configured: Option<bool>,
    pub config_cancelled: Option<bool>,
    pub socket_connected: Option<bool>,
    pub docker_available: Option<bool>,
    pub docker_running: Option<bool>,
    #[serde(alias = "docker_installing")]
    pub installing: Option<bool>,
    #[serde(alias = "docker_install_progress")]
    pub install_progress: Option<i64>,
    #[serde(alias = "docker_install_error")]
    pub install_error: Option<String>,
    #[serde(alias = "reboot_need")]
    pub reboot_required: Option<bool>,
    pub error: Option<String>,
    #[serde(alias = "temp_token")]
    pub auth_token: Option<String>,
    pub os: Option<String>,
    pub machine: Option<String>,
    pub status: Option<String>,
}

impl StatusSnapshot {
    /// Builds a snapshot from a push payload. The push channel sends the
    /// full field set every time, so anything absent falls back to the
    /// default rather than a previous value.
    pub fn from_push(partial: PartialStatus) -> Self {
        let mut snapshot = Self::default();
        snapshot.apply(partial);
        snapshot
    }

    /// Legacy pull path: absent fields keep their previous values.
    pub fn updated_with(&self, partial: PartialStatus) -> Self {
        let mut snapshot = self.clone();
        snapshot.apply(partial);
        snapshot
    }

    fn apply(&mut self, partial: PartialStatus) {
        if let Some(step) = partial.step {
            self.step = step;
        }
        if let Some(configured) = partial.configured {
            self.configured = configured;
        }
        if let Some(cancelled) = partial.config_cancelled {
            self.config_cancelled = cancelled;
        }
        if let Some(connected) = partial.socket_connected {
            self.socket_connected = connected;
        }
        if let Some(available) = partial.docker_available {
            self.docker_available = available;
        }
        if let Some(running) = partial.docker_running {
            self.docker_running = running;
        }
        if let Some(installing) = partial.installing {
            self.installing = installing;
        }
        if let Some(progress) = partial.install_progress {
            self.install_progress = clamp_progress(progress);
        }
        if let Some(required) = partial.reboot_required {
            self.reboot_required = required;
        }
        if let Some(error) = partial.error {
            self.error = error;
        }
        // Older backends report install failures in a dedicated field; it
        // only fills the visible error when nothing else claimed it.
        if let Some(install_error) = partial.install_error {
            if self.error.is_empty() {
                self.error = install_error;
            }
        }
        if let Some(token) = partial.auth_token {
            self.auth_token = Some(token);
        }
        if let Some(os) = partial.os {
            self.os = os;
        }
        if let Some(machine) = partial.machine {
            self.machine = machine;
        }
        if let Some(status) = partial.status {
            self.status = status;
        }
    }

    pub fn has_error(&self) -> bool {
        !self.error.is_empty()
    }

    /// Human-readable status line, falling back to the step label when the
    /// backend didn't send one.
    pub fn status_label(&self) -> &str {
        if self.status.is_empty() {
            self.step.label()
        } else {
            &self.status
        }
    }
}

fn clamp_progress(raw: i64) -> u8 {
    raw.clamp(0, 100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const ALL_STEPS: [ConnectionStep; 7] = [
        ConnectionStep::NotConfigured,
        ConnectionStep::AwaitingAuthorization,
        ConnectionStep::Connected,
        ConnectionStep::Ready,
        ConnectionStep::Disconnected,
        ConnectionStep::Error,
        ConnectionStep::Unknown,
    ];

    #[test]
    fn indicator_is_total_over_all_steps() {
        for step in ALL_STEPS {
            let expected = match step {
                ConnectionStep::Connected => StatusIndicator::Healthy,
                ConnectionStep::Ready => StatusIndicator::Intermediate,
                _ => StatusIndicator::Attention,
            };
            assert_eq!(step.indicator(), expected, "step {step:?}");
        }
    }

    #[test]
    fn unrecognized_wire_step_falls_back_to_attention() {
        let partial: PartialStatus =
            serde_json::from_value(json!({ "step": "warp_drive" })).expect("parse");
        assert_eq!(partial.step, Some(ConnectionStep::Unknown));
        assert_eq!(ConnectionStep::Unknown.indicator(), StatusIndicator::Attention);
    }

    #[test]
    fn legacy_step_names_still_parse() {
        for (wire, expected) in [
            ("login_needed", ConnectionStep::NotConfigured),
            ("qr_read", ConnectionStep::AwaitingAuthorization),
            ("error_connection", ConnectionStep::Error),
        ] {
            let partial: PartialStatus =
                serde_json::from_value(json!({ "step": wire })).expect("parse");
            assert_eq!(partial.step, Some(expected), "wire name {wire}");
        }
    }

    #[test]
    fn legacy_field_names_still_parse() {
        let partial: PartialStatus = serde_json::from_value(json!({
            "configurated": true,
            "temp_token": "abc123",
            "reboot_need": true,
            "docker_install_progress": 12,
        }))
        .expect("parse");
        let snapshot = StatusSnapshot::from_push(partial);
        assert!(snapshot.configured);
        assert_eq!(snapshot.auth_token.as_deref(), Some("abc123"));
        assert!(snapshot.reboot_required);
        assert_eq!(snapshot.install_progress, 12);
    }

    #[test]
    fn install_progress_clamps_to_percentage_range() {
        let over = StatusSnapshot::from_push(
            serde_json::from_value(json!({ "install_progress": 150 })).expect("parse"),
        );
        assert_eq!(over.install_progress, 100);

        let under = StatusSnapshot::from_push(
            serde_json::from_value(json!({ "install_progress": -5 })).expect("parse"),
        );
        assert_eq!(under.install_progress, 0);
    }

    #[test]
    fn push_replaces_wholesale() {
        let first = StatusSnapshot::from_push(
            serde_json::from_value(json!({
                "step": "ready",
                "configured": true,
                "install_progress": 40,
                "error": "previous failure",
            }))
            .expect("parse"),
        );
        assert!(first.configured);

        let second = StatusSnapshot::from_push(
            serde_json::from_value(json!({ "step": "ready" })).expect("parse"),
        );
        assert!(!second.configured);
        assert_eq!(second.install_progress, 0);
        assert!(second.error.is_empty());
    }

    #[test]
    fn pull_retains_absent_fields() {
        let base = StatusSnapshot::from_push(
            serde_json::from_value(json!({
                "step": "connected",
                "socket_connected": true,
                "configured": true,
            }))
            .expect("parse"),
        );

        let updated = base.updated_with(
            serde_json::from_value(json!({ "install_progress": 30 })).expect("parse"),
        );
        assert_eq!(updated.step, ConnectionStep::Connected);
        assert!(updated.socket_connected);
        assert!(updated.configured);
        assert_eq!(updated.install_progress, 30);
    }

    #[test]
    fn install_error_fills_empty_error_only() {
        let from_install = StatusSnapshot::from_push(
            serde_json::from_value(json!({ "docker_install_error": "image pull failed" }))
                .expect("parse"),
        );
        assert_eq!(from_install.error, "image pull failed");

        let both = StatusSnapshot::from_push(
            serde_json::from_value(json!({
                "error": "disk full",
                "docker_install_error": "image pull failed",
            }))
            .expect("parse"),
        );
        assert_eq!(both.error, "disk full");
    }

    #[test]
    fn status_label_falls_back_to_step() {
        let mut snapshot = StatusSnapshot::default();
        assert_eq!(snapshot.status_label(), "Login needed");
        snapshot.status = "User connected".to_string();
        assert_eq!(snapshot.status_label(), "User connected");
    }
}
