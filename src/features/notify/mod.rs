//! Best-effort desktop notifications.
//!
//! Permission is requested once at startup. Without it, or when the
//! platform notifier fails, notifications are skipped and logged.

mod desktop;

pub use desktop::{DesktopNotifier, NotifyBackend};

use crate::error::FocusError;
use crate::features::focus::TimerEvent;

/// Outcome of a permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    /// Not requested yet.
    Default,
    /// Notifications will be shown.
    Granted,
    /// Notifications are disabled or unavailable.
    Denied,
}

/// A notification to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Headline.
    pub title: String,
    /// Body text.
    pub body: String,
}

impl Notification {
    /// The notification announcing a timer event.
    #[must_use]
    pub fn for_event(event: TimerEvent, break_reminder_minutes: u32) -> Self {
        match event {
            TimerEvent::SessionComplete => Self {
                title: "Focus Timer Complete!".to_string(),
                body: "Great job! Time for a break.".to_string(),
            },
            TimerEvent::BreakDue { .. } => Self {
                title: "Break Reminder".to_string(),
                body: format!(
                    "You've been focused for {break_reminder_minutes} minutes. Time for a break!"
                ),
            },
        }
    }
}

/// Something that can show desktop notifications.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier {
    /// Ask for permission to notify. Called once at startup.
    fn request_permission(&mut self) -> Permission;

    /// The current permission.
    fn permission(&self) -> Permission;

    /// Show a notification.
    ///
    /// # Errors
    ///
    /// Returns `FocusError::Notification` if the platform notifier fails.
    fn notify(&self, notification: &Notification) -> Result<(), FocusError>;
}

/// A notifier that never shows anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn request_permission(&mut self) -> Permission {
        Permission::Denied
    }

    fn permission(&self) -> Permission {
        Permission::Denied
    }

    fn notify(&self, _notification: &Notification) -> Result<(), FocusError> {
        Ok(())
    }
}

/// Announce a timer event if permitted. Failures are logged, never returned.
///
/// Returns true if a notification was shown.
pub fn notify_event(
    notifier: &dyn Notifier,
    event: TimerEvent,
    break_reminder_minutes: u32,
) -> bool {
    if notifier.permission() != Permission::Granted {
        tracing::debug!(?event, "notification permission not granted, skipping");
        return false;
    }

    let notification = Notification::for_event(event, break_reminder_minutes);
    match notifier.notify(&notification) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, title = %notification.title, "notification failed");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_text() {
        let n = Notification::for_event(TimerEvent::SessionComplete, 60);
        assert_eq!(n.title, "Focus Timer Complete!");
        assert_eq!(n.body, "Great job! Time for a break.");

        let n = Notification::for_event(TimerEvent::BreakDue { minutes_focused: 61 }, 60);
        assert_eq!(n.title, "Break Reminder");
        assert_eq!(
            n.body,
            "You've been focused for 60 minutes. Time for a break!"
        );
    }

    #[test]
    fn test_notify_event_skips_without_permission() {
        let mut mock = MockNotifier::new();
        mock.expect_permission().return_const(Permission::Denied);
        mock.expect_notify().never();

        assert!(!notify_event(&mock, TimerEvent::SessionComplete, 60));
    }

    #[test]
    fn test_notify_event_shows_when_granted() {
        let mut mock = MockNotifier::new();
        mock.expect_permission().return_const(Permission::Granted);
        mock.expect_notify()
            .withf(|n| n.title == "Focus Timer Complete!")
            .times(1)
            .returning(|_| Ok(()));

        assert!(notify_event(&mock, TimerEvent::SessionComplete, 60));
    }

    #[test]
    fn test_notify_event_swallows_failures() {
        let mut mock = MockNotifier::new();
        mock.expect_permission().return_const(Permission::Granted);
        mock.expect_notify()
            .times(1)
            .returning(|_| Err(FocusError::Notification("no display".to_string())));

        assert!(!notify_event(
            &mock,
            TimerEvent::BreakDue { minutes_focused: 60 },
            60
        ));
    }

    #[test]
    fn test_null_notifier_denies() {
        let mut n = NullNotifier;
        assert_eq!(n.request_permission(), Permission::Denied);
        assert!(!notify_event(&n, TimerEvent::SessionComplete, 60));
    }
}
