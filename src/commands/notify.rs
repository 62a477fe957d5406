//! Notify-test command implementation
//!
//! Sends a single notification to verify credentials.

use crate::alerts::{Notification, Notifier, PushoverNotifier};
use crate::cli::args::{NotifyTestArgs, OutputFormat};
use crate::cli::output::{print_output, NotifyReport};
use crate::config::Config;
use crate::error::{AppError, Result};

/// Execute the notify-test command
///
/// Fails with the notifier's error if delivery was not acknowledged.
pub fn run_notify_test(args: &NotifyTestArgs, config: &Config, format: OutputFormat) -> Result<()> {
    let (retry, expire) = config.emergency_schedule()?;
    let notifier = PushoverNotifier::new(
        &config.pushover.url,
        config.pushover.credentials(),
        config.notify_timeout()?,
    )?
    .with_emergency(retry, expire);

    let notification = Notification::new(args.title.clone(), args.message.clone(), args.priority);
    let (report, result) = deliver(&notifier, &notification);

    print_output(&report, format)?;
    result
}

fn deliver<N: Notifier>(notifier: &N, notification: &Notification) -> (NotifyReport, Result<()>) {
    let result = notifier.send(notification);

    let report = NotifyReport {
        channel: notifier.name().to_string(),
        title: notification.title.clone(),
        priority: notification.priority.as_i8(),
        delivered: result.is_ok(),
        error: result.as_ref().err().map(|e| e.to_string()),
    };

    (report, result.map_err(AppError::from))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Priority;
    use crate::error::NotifyError;
    use crate::mock::MockNotifier;

    #[test]
    fn test_deliver_success() {
        let notifier = MockNotifier::new();
        let (report, result) = deliver(&notifier, &Notification::new("t", "m", Priority::High));
        assert!(result.is_ok());
        assert!(report.delivered);
        assert_eq!(report.priority, 1);
        assert_eq!(notifier.sent().len(), 1);
    }

    #[test]
    fn test_deliver_unconfigured() {
        let notifier = MockNotifier::failing_with(NotifyError::Unconfigured);
        let (report, result) = deliver(&notifier, &Notification::new("t", "m", Priority::Low));
        assert!(!report.delivered);
        assert_eq!(report.error.as_deref(), Some("API not configured"));
        assert!(matches!(
            result,
            Err(AppError::Notify(NotifyError::Unconfigured))
        ));
    }
}
