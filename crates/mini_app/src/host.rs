//! Capability surface of the hosting runtime.
//!
//! In production this wraps the Telegram WebApp SDK object; tests substitute
//! a recording double. Injecting it keeps the controller free of ambient
//! globals.

use api_types::Identity;

/// Haptic feedback kinds the host can play.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HapticKind {
    Success,
    Warning,
    Error,
}

pub trait Host: Send + Sync {
    /// The caller identifier, when the host supplied one at launch.
    fn identity(&self) -> Option<Identity>;

    /// Blocking alert dialog.
    fn alert(&self, text: &str);

    /// Blocking confirm dialog; `true` when the user accepts.
    fn confirm(&self, text: &str) -> bool;

    fn haptic(&self, kind: HapticKind);

    /// Ask the host to close the Mini App window.
    fn close(&self);
}
