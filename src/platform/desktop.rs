//! Freedesktop-based item resolution.
//!
//! Installed applications are discovered by scanning `applications/`
//! directories for desktop entries. Only the fields the menu needs are
//! parsed: `Name`, `Exec`, `Icon`, and the visibility flags.

use crate::config::{ItemKind, MenuEntry};
use crate::error::{Error, Result};
use crate::menu::ItemInfo;
use crate::platform::ItemResolver;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

/// An installed application discovered from a desktop entry.
#[derive(Clone, Debug, PartialEq)]
pub struct DesktopApp {
    pub name: String,
    pub exec: String,
    /// Absolute icon path, when the entry declared one. Theme icon names
    /// are not resolved here; icon decoding and lookup belong to the host.
    pub icon: Option<PathBuf>,
}

/// [`ItemResolver`] backed by the desktop-entry catalog.
pub struct DesktopResolver {
    search_dirs: Vec<PathBuf>,
    /// Discovery cache, keyed by lowercased application name. Survives
    /// refreshes; rebuilt when empty or when a reload is forced.
    apps: HashMap<String, DesktopApp>,
    /// Per-refresh memo of icon-path existence checks.
    icon_seen: RefCell<HashMap<PathBuf, bool>>,
}

impl DesktopResolver {
    pub fn new() -> Self {
        Self::with_dirs(application_dirs())
    }

    /// Resolver over an explicit set of `applications/` directories.
    pub fn with_dirs(search_dirs: Vec<PathBuf>) -> Self {
        DesktopResolver {
            search_dirs,
            apps: HashMap::new(),
            icon_seen: RefCell::new(HashMap::new()),
        }
    }

    /// Number of applications currently in the catalog.
    pub fn catalog_len(&self) -> usize {
        self.apps.len()
    }

    fn scan(&mut self) {
        self.apps.clear();
        for dir in &self.search_dirs {
            let entries = match fs::read_dir(dir) {
                Ok(entries) => entries,
                Err(err) => {
                    debug!(dir = %dir.display(), %err, "skipping unreadable applications directory");
                    continue;
                }
            };
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().and_then(|e| e.to_str()) != Some("desktop") {
                    continue;
                }
                let content = match fs::read_to_string(&path) {
                    Ok(content) => content,
                    Err(err) => {
                        warn!(file = %path.display(), %err, "unreadable desktop entry");
                        continue;
                    }
                };
                if let Some(app) = parse_desktop_entry(&content) {
                    // Earlier directories win; user entries shadow system ones.
                    self.apps.entry(app.name.to_lowercase()).or_insert(app);
                }
            }
        }
        debug!(count = self.apps.len(), "application catalog scanned");
    }

    fn existing_icon(&self, path: Option<&PathBuf>) -> Option<PathBuf> {
        let path = path?;
        let mut seen = self.icon_seen.borrow_mut();
        let exists = *seen
            .entry(path.clone())
            .or_insert_with(|| path.is_file());
        exists.then(|| path.clone())
    }
}

impl Default for DesktopResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemResolver for DesktopResolver {
    fn check_prerequisites(&self) -> Result<()> {
        if dirs::home_dir().is_none() {
            return Err(Error::Unsupported("no home directory".to_string()));
        }
        Ok(())
    }

    fn prepare(&mut self, force_reload: bool) -> Result<()> {
        if force_reload || self.apps.is_empty() {
            self.scan();
        }
        Ok(())
    }

    fn resolve(&self, entry: &MenuEntry) -> Result<ItemInfo> {
        let kind = ItemKind::parse(&entry.kind)
            .ok_or_else(|| Error::UnknownItemKind(entry.kind.clone()))?;
        match kind {
            ItemKind::Command => {
                let exec = entry.command.clone().ok_or(Error::MissingField {
                    name: entry.name.clone(),
                    field: "command",
                })?;
                Ok(ItemInfo {
                    name: entry.name.clone(),
                    icon: self.existing_icon(entry.icon.as_ref()),
                    exec,
                })
            }
            ItemKind::Shortcuts => {
                let target = entry.path.clone().ok_or(Error::MissingField {
                    name: entry.name.clone(),
                    field: "path",
                })?;
                if !target.exists() {
                    return Err(Error::ItemNotFound {
                        name: entry.name.clone(),
                    });
                }
                Ok(ItemInfo {
                    name: entry.name.clone(),
                    icon: self.existing_icon(entry.icon.as_ref()),
                    exec: format!("xdg-open \"{}\"", target.display()),
                })
            }
            ItemKind::WindowsApps => {
                let app = self
                    .apps
                    .get(&entry.name.to_lowercase())
                    .ok_or_else(|| Error::ItemNotFound {
                        name: entry.name.clone(),
                    })?;
                let icon = self
                    .existing_icon(entry.icon.as_ref())
                    .or_else(|| self.existing_icon(app.icon.as_ref()));
                Ok(ItemInfo {
                    name: app.name.clone(),
                    icon,
                    exec: app.exec.clone(),
                })
            }
        }
    }

    fn clear(&mut self) {
        self.icon_seen.borrow_mut().clear();
    }
}

/// Standard `applications/` locations, user directories first.
fn application_dirs() -> Vec<PathBuf> {
    let mut dirs_out = Vec::new();
    if let Some(data) = dirs::data_dir() {
        dirs_out.push(data.join("applications"));
    }
    dirs_out.push(PathBuf::from("/usr/local/share/applications"));
    dirs_out.push(PathBuf::from("/usr/share/applications"));
    dirs_out
}

/// Parses the `[Desktop Entry]` group of a desktop file.
///
/// Returns `None` for entries that are hidden, not displayable, or missing
/// a name or command.
fn parse_desktop_entry(content: &str) -> Option<DesktopApp> {
    let mut in_entry_group = false;
    let mut name = None;
    let mut exec = None;
    let mut icon = None;

    for line in content.lines() {
        let line = line.trim();
        if line.starts_with('[') {
            in_entry_group = line == "[Desktop Entry]";
            continue;
        }
        if !in_entry_group {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        match key.trim() {
            "Name" if name.is_none() => name = Some(value.trim().to_string()),
            "Exec" if exec.is_none() => exec = Some(strip_field_codes(value.trim())),
            "Icon" if icon.is_none() => {
                let value = value.trim();
                if value.starts_with('/') {
                    icon = Some(PathBuf::from(value));
                }
            }
            "NoDisplay" | "Hidden" if value.trim() == "true" => return None,
            _ => {}
        }
    }

    Some(DesktopApp {
        name: name?,
        exec: exec.filter(|e| !e.is_empty())?,
        icon,
    })
}

/// Removes `%f`-style field codes from an Exec line.
fn strip_field_codes(exec: &str) -> String {
    exec.split_whitespace()
        .filter(|tok| !(tok.len() == 2 && tok.starts_with('%')))
        .collect::<Vec<_>>()
        .join(" ")
}
