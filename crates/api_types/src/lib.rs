//! Wire contract between the Mini App client and the attendance backend.
//!
//! Everything here crosses the single HTTP endpoint as JSON. Field names
//! follow the backend's camelCase convention; action tags are snake_case.

use serde::{Deserialize, Serialize};

/// Opaque caller identifier supplied by the host at launch.
///
/// This is serialized as a string in JSON. The client never inspects it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

pub mod config {
    use super::*;

    /// Whether the backend holds stored credentials for this user.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum CredentialsState {
        Present,
        #[default]
        Absent,
    }

    impl CredentialsState {
        pub fn is_present(self) -> bool {
            matches!(self, Self::Present)
        }
    }

    /// Reminder times in "HH:MM", one per attendance event.
    #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ReminderTimes {
        pub morning: String,
        pub lunch_out: String,
        pub lunch_in: String,
        pub evening: String,
    }

    #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ReminderSettings {
        pub enabled: bool,
        pub times: ReminderTimes,
    }

    /// Backend-owned user profile.
    ///
    /// The client caches this for one session only and re-fetches on the
    /// next launch.
    #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase", default)]
    pub struct ConfigurationRecord {
        pub employee_name: Option<String>,
        pub credentials: CredentialsState,
        pub reminders: ReminderSettings,
    }
}

pub mod action {
    use super::*;
    use super::config::{ConfigurationRecord, ReminderSettings};

    /// One user action. Created per interaction, immutable, single-use.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(tag = "action", rename_all = "snake_case")]
    pub enum ActionRequest {
        SaveConfig { email: String, password: String },
        Checkin,
        Checkout,
        Reconcile,
        SaveSettings { settings: ReminderSettings },
        GetConfig,
    }

    /// What actually goes over the wire: the action plus the caller identity.
    ///
    /// The gateway builds this; handlers never see it.
    #[derive(Debug, Serialize)]
    pub struct RequestEnvelope<'a> {
        pub identity: &'a Identity,
        #[serde(flatten)]
        pub request: &'a ActionRequest,
    }

    /// Backend reply to any action.
    ///
    /// `error` carries the human-readable reason when `success` is false;
    /// `config` is populated on `get_config` (and may echo on writes).
    #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct ActionResponse {
        pub success: bool,
        pub config: Option<ConfigurationRecord>,
        pub message: Option<String>,
        pub error: Option<String>,
    }
}
