//! Desktop notifications.
//!
//! macOS goes through `osascript`; everywhere else notifications are posted
//! with `notify-rust` (the freedesktop notification service on Linux/BSD).

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::FocusError;
use crate::features::shell::completions::BIN_NAME;

use super::{Notification, Notifier, Permission};

/// How notifications are posted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyBackend {
    /// macOS `osascript`.
    OsaScript(PathBuf),
    /// The platform notification service, through `notify-rust`.
    Native,
}

impl NotifyBackend {
    /// Find the notifier for this platform.
    #[cfg(target_os = "macos")]
    #[must_use]
    pub fn detect() -> Option<Self> {
        crate::core::find_program("osascript").map(Self::OsaScript)
    }

    /// Find the notifier for this platform: a running notification server.
    #[cfg(all(unix, not(target_os = "macos")))]
    #[must_use]
    pub fn detect() -> Option<Self> {
        match notify_rust::get_server_information() {
            Ok(server) => {
                tracing::debug!(server = %server.name, version = %server.version, "notification server");
                Some(Self::Native)
            }
            Err(e) => {
                tracing::debug!(error = %e, "no notification server");
                None
            }
        }
    }

    /// Find the notifier for this platform.
    #[cfg(not(unix))]
    #[must_use]
    pub const fn detect() -> Option<Self> {
        Some(Self::Native)
    }

    fn osascript_command(path: &Path, notification: &Notification) -> Command {
        let script = format!(
            r#"display notification "{}" with title "{}""#,
            notification.body.replace('"', r#"\""#),
            notification.title.replace('"', r#"\""#)
        );
        let mut cmd = Command::new(path);
        cmd.arg("-e").arg(script);
        cmd
    }

    fn post(&self, notification: &Notification) -> Result<(), FocusError> {
        match self {
            Self::OsaScript(path) => {
                let output = Self::osascript_command(path, notification)
                    .output()
                    .map_err(|e| FocusError::Notification(e.to_string()))?;

                if !output.status.success() {
                    let stderr = String::from_utf8_lossy(&output.stderr);
                    return Err(FocusError::Notification(stderr.trim().to_string()));
                }
                Ok(())
            }
            Self::Native => notify_rust::Notification::new()
                .summary(&notification.title)
                .body(&notification.body)
                .appname(BIN_NAME)
                .show()
                .map(|_| ())
                .map_err(|e| FocusError::Notification(e.to_string())),
        }
    }
}

/// Posts notifications with the platform notifier.
#[derive(Debug, Clone)]
pub struct DesktopNotifier {
    enabled: bool,
    backend: Option<NotifyBackend>,
    permission: Permission,
}

impl DesktopNotifier {
    /// Create a notifier. `enabled` comes from the config file.
    #[must_use]
    pub const fn new(enabled: bool) -> Self {
        Self {
            enabled,
            backend: None,
            permission: Permission::Default,
        }
    }

    /// Create a notifier using a specific backend.
    #[must_use]
    pub const fn with_backend(backend: NotifyBackend) -> Self {
        Self {
            enabled: true,
            backend: Some(backend),
            permission: Permission::Default,
        }
    }
}

impl Notifier for DesktopNotifier {
    fn request_permission(&mut self) -> Permission {
        if self.permission != Permission::Default {
            return self.permission;
        }

        if self.backend.is_none() && self.enabled {
            self.backend = NotifyBackend::detect();
        }

        self.permission = if self.enabled && self.backend.is_some() {
            Permission::Granted
        } else {
            Permission::Denied
        };
        tracing::info!(permission = ?self.permission, backend = ?self.backend, "notification permission");
        self.permission
    }

    fn permission(&self) -> Permission {
        self.permission
    }

    fn notify(&self, notification: &Notification) -> Result<(), FocusError> {
        self.backend
            .as_ref()
            .ok_or_else(|| FocusError::Notification("no notification backend".to_string()))?
            .post(notification)
    }
}
