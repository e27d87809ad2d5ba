//! Configuration: persisted document model and storage.

pub mod document;
pub mod store;

pub use document::{Document, ItemKind, MenuEntry};
pub use store::{ConfigStore, JsonConfigStore};

/// Static application metadata, shown in the About submenu and used for the
/// tray identity.
pub struct AppInfo;

impl AppInfo {
    pub const NAME: &'static str = "Tray Launcher";
    pub const VERSION: &'static str = env!("CARGO_PKG_VERSION");
    pub const RELEASE_DATE: &'static str = "2026-08-07";
    /// Freedesktop icon name used for the tray icon itself.
    pub const ICON_NAME: &'static str = "application-x-executable";
}
