//! Ambient host collaborators: notifications, detached execution, and
//! file dialogs.

pub mod dialog;
pub mod exec;
pub mod notify;

pub use dialog::{FilePicker, ZenityPicker};
pub use exec::{CommandRunner, ShellRunner};
pub use notify::{DesktopNotifier, LogNotifier, Notifier, Severity};
