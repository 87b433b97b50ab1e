use colored::Colorize;
use tracing::debug;

use crate::backend::{Notification, NotificationKind, Notifier};

/// Prints notifications to stdout as colored lines
#[derive(Debug, Default)]
pub struct TerminalNotifier;

/// Plain text of a notification
pub fn notification_line(notification: &Notification) -> String {
    format!("{}: {}", notification.title, notification.description)
}

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: Notification) {
        debug!(
            kind = ?notification.kind,
            duration_ms = notification.duration.as_millis() as u64,
            "notify"
        );
        let line = notification_line(&notification);
        match notification.kind {
            NotificationKind::Success => println!("{}", line.green()),
            NotificationKind::Error => println!("{}", line.red()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::NOTIFICATION_DURATION;

    #[test]
    fn test_notification_line() {
        let notification = Notification::error("Error", "network down");
        assert_eq!(notification_line(&notification), "Error: network down");
        assert_eq!(notification.duration, NOTIFICATION_DURATION);
        assert!(notification.dismissible);
    }
}
