//! Persisted configuration model.
//!
//! The document is the single source of truth for the menu: flat top-level
//! items, named categories, and user preferences. Field names follow the
//! on-disk JSON format.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// The recognized launch-target kinds.
///
/// `MenuEntry::kind` stays a plain string on the wire so that documents
/// containing unknown kinds still load and round-trip; entries whose kind
/// does not parse are rejected per item during synthesis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemKind {
    /// An installed application, looked up in the platform catalog by name.
    WindowsApps,
    /// A file or shortcut target, opened with the platform opener.
    Shortcuts,
    /// A raw shell command.
    Command,
}

impl ItemKind {
    /// Parses a wire value. Returns `None` for unrecognized kinds.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "WindowsApps" => Some(ItemKind::WindowsApps),
            "Shortcuts" => Some(ItemKind::Shortcuts),
            "Command" => Some(ItemKind::Command),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::WindowsApps => "WindowsApps",
            ItemKind::Shortcuts => "Shortcuts",
            ItemKind::Command => "Command",
        }
    }
}

/// A single declared launch target, before platform resolution.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuEntry {
    /// Display, dedup, and sort key. Must be non-empty to pass validation.
    pub name: String,
    /// Wire value of the item kind; see [`ItemKind::parse`].
    #[serde(rename = "type")]
    pub kind: String,
    /// Shell command, required for `Command` entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    /// Target path, required for `Shortcuts` entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Explicit icon file override, any kind.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<PathBuf>,
}

impl MenuEntry {
    pub fn new(name: impl Into<String>, kind: ItemKind) -> Self {
        MenuEntry {
            name: name.into(),
            kind: kind.as_str().to_string(),
            ..Default::default()
        }
    }
}

/// The persisted configuration root.
///
/// `others` is a `BTreeMap`, so category iteration is always in ascending
/// lexicographic key order no matter how the JSON was written.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Document {
    /// User preference: forward launched-command output to the log.
    pub enable_logs: bool,
    /// Items rendered flat at top level, outside any category.
    pub no_menu: Vec<MenuEntry>,
    /// Category name to items rendered as one submenu per category.
    pub others: BTreeMap<String, Vec<MenuEntry>>,
}

impl Document {
    /// Sorts `no_menu` and every category's items by name.
    ///
    /// Run on every refresh so the rendered menu and the persisted file
    /// agree on ordering.
    pub fn normalize(&mut self) {
        self.no_menu.sort_by(|a, b| a.name.cmp(&b.name));
        for items in self.others.values_mut() {
            items.sort_by(|a, b| a.name.cmp(&b.name));
        }
    }
}
