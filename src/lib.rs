//! # tray-launcher
//!
//! A configurable system tray menu launcher for Linux desktop environments
//! using the StatusNotifierItem (SNI) specification via the
//! [ksni](https://crates.io/crates/ksni) library.
//!
//! ## Overview
//!
//! A JSON document declares named launch targets, either flat or grouped
//! into categories:
//!
//! ```json
//! {
//!   "enableLogs": false,
//!   "noMenu": [
//!     {"name": "Terminal", "type": "Command", "command": "x-terminal-emulator"}
//!   ],
//!   "others": {
//!     "Apps": [{"name": "Firefox", "type": "WindowsApps"}],
//!     "Docs": [{"name": "Notes", "type": "Shortcuts", "path": "/home/me/notes.md"}]
//!   }
//! }
//! ```
//!
//! On every refresh the document is reloaded, each entry is validated and
//! resolved against platform data (installed applications come from the
//! desktop-entry catalog), and the menu tree is rebuilt from scratch:
//! category submenus in sorted order, the flat section, a settings subtree,
//! and an exit leaf. Entries that fail validation or resolution are
//! dropped without disturbing the rest of the menu.
//!
//! ## Usage
//!
//! ```no_run
//! use tray_launcher::config::JsonConfigStore;
//! use tray_launcher::engine::Launcher;
//! use tray_launcher::platform::DesktopResolver;
//! use tray_launcher::system::{DesktopNotifier, ShellRunner, ZenityPicker};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut launcher = Launcher::new(
//!     Box::new(JsonConfigStore::at_default_path()?),
//!     Box::new(DesktopResolver::new()),
//!     Box::new(DesktopNotifier::new("Tray Launcher")),
//!     Box::new(ShellRunner),
//!     Box::new(ZenityPicker),
//! );
//! launcher.start()?;
//! # Ok(())
//! # }
//! ```
//!
//! Every collaborator sits behind a trait (`ConfigStore`, `ItemResolver`,
//! `Notifier`, `CommandRunner`, `FilePicker`), so hosts can swap storage,
//! platform discovery, or dialog handling without touching the engine.

// Module declarations
pub mod config;
pub mod engine;
pub mod error;
pub mod menu;
pub mod platform;
pub mod system;
pub mod tray;

// Public re-exports
pub use config::{Document, ItemKind, MenuEntry};
pub use engine::Launcher;
pub use error::{Error, Result};
pub use menu::{ItemInfo, MenuAction, MenuNode};
