use anyhow::Result;
use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tray_launcher::config::{AppInfo, JsonConfigStore};
use tray_launcher::engine::Launcher;
use tray_launcher::platform::DesktopResolver;
use tray_launcher::system::{DesktopNotifier, ShellRunner, ZenityPicker};

fn main() -> Result<()> {
    let log_file = init_logging();

    let store = JsonConfigStore::at_default_path()?;
    let mut launcher = Launcher::new(
        Box::new(store),
        Box::new(DesktopResolver::new()),
        Box::new(DesktopNotifier::new(AppInfo::NAME)),
        Box::new(ShellRunner),
        Box::new(ZenityPicker),
    );
    if let Some(path) = log_file {
        launcher = launcher.with_log_file(path);
    }
    launcher.start()?;
    Ok(())
}

/// Initializes tracing to stderr, teed into a log file when one can be
/// created. Returns the log file path for user-facing messages.
fn init_logging() -> Option<PathBuf> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let log_path = dirs::cache_dir().map(|dir| dir.join("tray-launcher").join("launcher.log"));
    let log_file = log_path.as_ref().and_then(|path| {
        fs::create_dir_all(path.parent()?).ok()?;
        File::create(path).ok()
    });

    match log_file {
        Some(file) => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr.and(Arc::new(file)))
                .init();
            log_path
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
            None
        }
    }
}
