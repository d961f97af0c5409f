use std::sync::Arc;

use api_types::{
    action::ActionRequest,
    config::{ConfigurationRecord, CredentialsState, ReminderSettings, ReminderTimes},
};
use chrono::NaiveTime;

use crate::{
    client::{Gateway, GatewayError},
    error::Result,
    host::{HapticKind, Host},
    settings::AppConfig,
};

/// The three mutually exclusive screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Loading,
    Config,
    Main,
}

impl Screen {
    pub const ALL: [Screen; 3] = [Self::Loading, Self::Config, Self::Main];
}

/// Credential inputs on the config screen.
#[derive(Debug, Default)]
pub struct CredentialsForm {
    pub email: String,
    pub password: String,
}

/// Reminder controls on the main screen.
#[derive(Debug, Default)]
pub struct ReminderForm {
    pub enabled: bool,
    pub times: ReminderTimes,
}

impl ReminderForm {
    fn to_settings(&self) -> ReminderSettings {
        ReminderSettings {
            enabled: self.enabled,
            times: self.times.clone(),
        }
    }
}

/// Which reminder time input changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderField {
    Morning,
    LunchOut,
    LunchIn,
    Evening,
}

#[derive(Debug)]
pub struct AppState {
    pub screen: Screen,
    pub credentials: CredentialsForm,
    pub reminders: ReminderForm,
    pub welcome: Option<String>,
    /// Session cache of the backend-owned record; discarded at teardown.
    pub profile: Option<ConfigurationRecord>,
    /// True while an awaited request is in flight; the UI disables the
    /// triggering control.
    pub busy: bool,
}

impl AppState {
    pub fn is_visible(&self, screen: Screen) -> bool {
        self.screen == screen
    }
}

/// View controller: owns the screens, the bound fields, and the handlers
/// every user action funnels through.
pub struct App {
    config: AppConfig,
    gateway: Option<Gateway>,
    host: Arc<dyn Host>,
    pub state: AppState,
}

impl App {
    /// Builds the session. Without a host identity no gateway is built and
    /// the session is pinned to the config screen.
    pub fn new(config: AppConfig, host: Arc<dyn Host>) -> Result<Self> {
        let gateway = match host.identity() {
            Some(identity) => Some(Gateway::new(&config.endpoint, identity)?),
            None => None,
        };

        Ok(Self {
            config,
            gateway,
            host,
            state: AppState {
                screen: Screen::Loading,
                credentials: CredentialsForm::default(),
                reminders: ReminderForm::default(),
                welcome: None,
                profile: None,
                busy: false,
            },
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn gateway(&self) -> Option<&Gateway> {
        self.gateway.as_ref()
    }

    /// Reveal one screen; the other two are hidden by construction.
    pub fn show_view(&mut self, screen: Screen) {
        self.state.screen = screen;
    }

    /// Copy a configuration record into every bound field.
    pub fn populate_fields(&mut self, record: &ConfigurationRecord) {
        self.state.welcome = record
            .employee_name
            .as_deref()
            .and_then(|name| name.split_whitespace().next())
            .map(|first| format!("Welcome, {first}!"));
        self.state.reminders.enabled = record.reminders.enabled;
        self.state.reminders.times = record.reminders.times.clone();
    }

    /// Initial fetch deciding which screen the session opens on.
    pub async fn launch(&mut self) {
        let Some(gateway) = self.gateway.clone() else {
            tracing::warn!("host supplied no identity, backend unreachable this session");
            self.show_view(Screen::Config);
            return;
        };

        self.state.busy = true;
        let outcome = gateway.send(&ActionRequest::GetConfig).await;
        self.state.busy = false;

        match outcome {
            Ok(response) if response.success => match response.config {
                Some(record) if record.credentials.is_present() => {
                    tracing::info!("configured user, opening main screen");
                    self.populate_fields(&record);
                    self.state.profile = Some(record);
                    self.show_view(Screen::Main);
                }
                _ => self.show_view(Screen::Config),
            },
            Ok(response) => {
                tracing::debug!(error = ?response.error, "get_config rejected");
                self.show_view(Screen::Config);
            }
            Err(err) => {
                tracing::warn!("get_config failed: {err}");
                self.host.alert(&transport_message(&err));
                self.show_view(Screen::Config);
            }
        }
    }

    /// "Save and Continue" on the config screen.
    pub async fn save_credentials(&mut self) {
        let email = self.state.credentials.email.trim().to_string();
        let password = self.state.credentials.password.trim().to_string();

        if email.is_empty() || password.is_empty() {
            self.host.alert("Please enter both email and password.");
            return;
        }
        if self.config.confirm_before_save && !self.host.confirm("Save these credentials?") {
            return;
        }
        let Some(gateway) = self.gateway.clone() else {
            self.host.alert("Cannot identify you. Reopen the app from the bot.");
            return;
        };

        self.state.busy = true;
        let outcome = gateway
            .send(&ActionRequest::SaveConfig { email, password })
            .await;
        self.state.busy = false;

        match outcome {
            Ok(response) if response.success => {
                let mut record = response
                    .config
                    .or_else(|| self.state.profile.take())
                    .unwrap_or_default();
                record.credentials = CredentialsState::Present;
                self.populate_fields(&record);
                self.state.profile = Some(record);
                self.state.credentials.password.clear();
                self.show_view(Screen::Main);
            }
            Ok(response) => {
                self.host.alert(
                    response
                        .error
                        .as_deref()
                        .unwrap_or("Could not save credentials."),
                );
            }
            Err(err) => self.host.alert(&transport_message(&err)),
        }
    }

    pub async fn check_in(&mut self) {
        self.attendance(ActionRequest::Checkin).await;
    }

    pub async fn check_out(&mut self) {
        self.attendance(ActionRequest::Checkout).await;
    }

    /// "Fill in my missing times". The backend replies in chat, so the
    /// window closes on success like the other attendance actions.
    pub async fn reconcile(&mut self) {
        self.attendance(ActionRequest::Reconcile).await;
    }

    async fn attendance(&mut self, request: ActionRequest) {
        let Some(gateway) = self.gateway.clone() else {
            self.host.alert("Cannot identify you. Reopen the app from the bot.");
            return;
        };

        self.state.busy = true;
        let outcome = gateway.send(&request).await;
        self.state.busy = false;

        match outcome {
            Ok(response) if response.success => {
                if let Some(message) = response.message.as_deref() {
                    tracing::info!("attendance action accepted: {message}");
                }
                self.host.close();
            }
            Ok(response) => {
                self.host.alert(
                    response
                        .error
                        .as_deref()
                        .unwrap_or("The backend rejected the request."),
                );
            }
            Err(err) => self.host.alert(&transport_message(&err)),
        }
    }

    /// "Update credentials" on the main screen.
    pub fn update_credentials(&mut self) {
        self.show_view(Screen::Config);
    }

    /// Abandon a credentials update without saving. Only meaningful while
    /// the cached profile still has stored credentials.
    pub fn cancel_update(&mut self) {
        let has_credentials = self
            .state
            .profile
            .as_ref()
            .is_some_and(|record| record.credentials.is_present());
        if has_credentials {
            self.show_view(Screen::Main);
        }
    }

    pub fn set_reminders_enabled(&mut self, enabled: bool) {
        self.state.reminders.enabled = enabled;
        self.sync_reminders();
    }

    /// Rejects values not in "HH:MM", keeping the last good one.
    pub fn set_reminder_time(&mut self, field: ReminderField, value: &str) {
        if NaiveTime::parse_from_str(value, "%H:%M").is_err() {
            tracing::warn!(%value, "ignoring reminder time not in HH:MM");
            return;
        }

        let slot = match field {
            ReminderField::Morning => &mut self.state.reminders.times.morning,
            ReminderField::LunchOut => &mut self.state.reminders.times.lunch_out,
            ReminderField::LunchIn => &mut self.state.reminders.times.lunch_in,
            ReminderField::Evening => &mut self.state.reminders.times.evening,
        };
        *slot = value.to_string();
        self.sync_reminders();
    }

    /// Best-effort background push of the reminder settings. Failures go to
    /// the log, never to the user.
    fn sync_reminders(&mut self) {
        let settings = self.state.reminders.to_settings();
        if let Some(profile) = &mut self.state.profile {
            profile.reminders = settings.clone();
        }

        let Some(gateway) = self.gateway.clone() else {
            return;
        };
        tokio::spawn(async move {
            let request = ActionRequest::SaveSettings { settings };
            if let Err(err) = gateway.send(&request).await {
                tracing::warn!("reminder settings sync failed: {err}");
            }
        });

        if self.config.haptics {
            self.host.haptic(HapticKind::Success);
        }
    }
}

fn transport_message(err: &GatewayError) -> String {
    match err {
        GatewayError::Network(err) => format!("Could not reach the server: {err}"),
        GatewayError::Status(status) => format!("Server error ({status}). Please try again."),
        GatewayError::Protocol(_) => {
            "The server sent an unexpected reply. Please try again.".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_types::Identity;

    struct SilentHost {
        identity: Option<Identity>,
    }

    impl Host for SilentHost {
        fn identity(&self) -> Option<Identity> {
            self.identity.clone()
        }
        fn alert(&self, _text: &str) {}
        fn confirm(&self, _text: &str) -> bool {
            true
        }
        fn haptic(&self, _kind: HapticKind) {}
        fn close(&self) {}
    }

    fn offline_app() -> App {
        App::new(
            AppConfig::default(),
            Arc::new(SilentHost { identity: None }),
        )
        .unwrap()
    }

    fn record_with_credentials() -> ConfigurationRecord {
        ConfigurationRecord {
            employee_name: Some("Ada Lovelace".to_string()),
            credentials: CredentialsState::Present,
            reminders: ReminderSettings {
                enabled: true,
                times: ReminderTimes {
                    morning: "08:00".into(),
                    lunch_out: "12:00".into(),
                    lunch_in: "13:00".into(),
                    evening: "17:00".into(),
                },
            },
        }
    }

    fn visible_screens(state: &AppState) -> Vec<Screen> {
        Screen::ALL
            .into_iter()
            .filter(|screen| state.is_visible(*screen))
            .collect()
    }

    #[test]
    fn exactly_one_screen_visible_after_any_transition() {
        let mut app = offline_app();
        assert_eq!(visible_screens(&app.state), vec![Screen::Loading]);

        for screen in Screen::ALL {
            app.show_view(screen);
            assert_eq!(visible_screens(&app.state), vec![screen]);
        }
    }

    #[test]
    fn populate_fields_binds_welcome_and_reminders() {
        let mut app = offline_app();
        app.populate_fields(&record_with_credentials());

        assert_eq!(app.state.welcome.as_deref(), Some("Welcome, Ada!"));
        assert!(app.state.reminders.enabled);
        assert_eq!(app.state.reminders.times.lunch_in, "13:00");
    }

    #[test]
    fn populate_fields_without_name_leaves_no_welcome() {
        let mut app = offline_app();
        let record = ConfigurationRecord {
            employee_name: None,
            ..record_with_credentials()
        };
        app.populate_fields(&record);
        assert!(app.state.welcome.is_none());
    }

    #[test]
    fn update_credentials_returns_to_config() {
        let mut app = offline_app();
        app.show_view(Screen::Main);
        app.update_credentials();
        assert_eq!(app.state.screen, Screen::Config);
    }

    #[test]
    fn cancel_update_needs_stored_credentials() {
        let mut app = offline_app();
        app.show_view(Screen::Config);

        app.cancel_update();
        assert_eq!(app.state.screen, Screen::Config);

        app.state.profile = Some(record_with_credentials());
        app.cancel_update();
        assert_eq!(app.state.screen, Screen::Main);
    }

    #[test]
    fn malformed_reminder_time_keeps_last_value() {
        let mut app = offline_app();
        app.state.reminders.times.morning = "08:00".into();

        app.set_reminder_time(ReminderField::Morning, "8 o'clock");
        assert_eq!(app.state.reminders.times.morning, "08:00");

        app.set_reminder_time(ReminderField::Morning, "08:30");
        assert_eq!(app.state.reminders.times.morning, "08:30");
    }

    #[test]
    fn reminder_change_updates_session_cache() {
        let mut app = offline_app();
        app.state.profile = Some(record_with_credentials());

        app.set_reminders_enabled(false);

        let profile = app.state.profile.as_ref().unwrap();
        assert!(!profile.reminders.enabled);
    }
}
