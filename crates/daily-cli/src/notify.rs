//! Desktop notifications.

use notify_rust::Notification;

/// Receives user-facing notifications. Delivery is best effort.
pub trait Notifier {
    fn notify(&self, title: &str, message: &str);
}

/// Shows notifications through the platform notification service.
#[derive(Debug, Clone, Copy, Default)]
pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn notify(&self, title: &str, message: &str) {
        if let Err(e) = Notification::new()
            .summary(title)
            .body(message)
            .appname("daily")
            .show()
        {
            tracing::debug!(error = %e, "notification not delivered");
        }
    }
}
