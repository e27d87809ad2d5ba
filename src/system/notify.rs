//! User-visible diagnostics.

use std::process::{Command, Stdio};
use tracing::{error, info, warn};

/// Severity of a user-visible notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Info,
    Ok,
    Error,
}

/// Fire-and-forget user-visible diagnostics. Failures to deliver a
/// notification are never fatal.
pub trait Notifier: Send + Sync {
    fn notify(&self, severity: Severity, message: &str);

    fn info(&self, message: &str) {
        self.notify(Severity::Info, message);
    }

    fn ok(&self, message: &str) {
        self.notify(Severity::Ok, message);
    }

    fn error(&self, message: &str) {
        self.notify(Severity::Error, message);
    }
}

/// Notifier that only writes to the log. Used in tests and headless runs.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Info => info!(target: "notify", "{message}"),
            Severity::Ok => info!(target: "notify", "{message}"),
            Severity::Error => error!(target: "notify", "{message}"),
        }
    }
}

/// Desktop notifier shelling out to `notify-send`, with the log as a
/// fallback when the tool is unavailable.
pub struct DesktopNotifier {
    app_name: String,
}

impl DesktopNotifier {
    pub fn new(app_name: impl Into<String>) -> Self {
        DesktopNotifier {
            app_name: app_name.into(),
        }
    }
}

impl Notifier for DesktopNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        LogNotifier.notify(severity, message);

        let urgency = match severity {
            Severity::Error => "critical",
            Severity::Info | Severity::Ok => "normal",
        };
        let result = Command::new("notify-send")
            .arg("--app-name")
            .arg(&self.app_name)
            .arg("--urgency")
            .arg(urgency)
            .arg(&self.app_name)
            .arg(message)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        if let Err(err) = result {
            warn!(%err, "notify-send unavailable, notification logged only");
        }
    }
}
