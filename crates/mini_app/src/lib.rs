//! Attendance Mini App client.
//!
//! The app is a thin client: every user action becomes one JSON POST to the
//! backend endpoint, and the reply drives a three-screen state machine. All
//! host-runtime affordances (identity, dialogs, haptics, closing the window)
//! come in through the [`Host`] trait; the client owns no business logic and
//! persists nothing across reloads.

pub mod app;
pub mod client;
pub mod error;
pub mod host;
pub mod settings;

pub use app::{App, AppState, ReminderField, Screen};
pub use client::{Gateway, GatewayError};
pub use error::{AppError, Result};
pub use host::{HapticKind, Host};
pub use settings::AppConfig;
