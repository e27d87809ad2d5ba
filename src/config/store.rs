//! Configuration persistence.

use crate::config::Document;
use crate::error::{Error, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Storage for the persisted configuration document.
pub trait ConfigStore {
    /// Loads the document. A missing file is not an error and yields the
    /// default document; a present but unreadable or malformed file is.
    fn load(&self) -> Result<Document>;

    /// Persists the document, replacing the previous contents atomically.
    fn save(&self, document: &Document) -> Result<()>;

    /// Replaces the stored file with a copy of `source`.
    ///
    /// Delete-then-copy; a crash between the two steps can leave the
    /// configuration missing. The next load falls back to the default
    /// document, so the application still starts.
    fn replace_with(&self, source: &Path) -> Result<()>;

    /// Location of the stored file.
    fn path(&self) -> &Path;
}

/// JSON file-backed [`ConfigStore`].
pub struct JsonConfigStore {
    path: PathBuf,
}

impl JsonConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonConfigStore { path: path.into() }
    }

    /// Store at the conventional per-user location
    /// (`<config dir>/tray-launcher/menu.json`).
    pub fn at_default_path() -> Result<Self> {
        let base = dirs::config_dir()
            .ok_or_else(|| Error::Unsupported("no user config directory".to_string()))?;
        Ok(JsonConfigStore::new(base.join("tray-launcher").join("menu.json")))
    }
}

impl ConfigStore for JsonConfigStore {
    fn load(&self) -> Result<Document> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no configuration file, using defaults");
            return Ok(Document::default());
        }
        let data = fs::read_to_string(&self.path)
            .map_err(|e| Error::io("read configuration", &self.path, e))?;
        Ok(serde_json::from_str(&data)?)
    }

    fn save(&self, document: &Document) -> Result<()> {
        let parent = self
            .path
            .parent()
            .ok_or_else(|| Error::Unsupported(format!("no parent directory for {}", self.path.display())))?;
        fs::create_dir_all(parent).map_err(|e| Error::io("create config directory", parent, e))?;

        // Write to a sibling temp file and rename so a crash never leaves a
        // half-written document behind.
        let mut tmp = tempfile::NamedTempFile::new_in(parent)
            .map_err(|e| Error::io("create temp file", parent, e))?;
        let data = serde_json::to_string_pretty(document)?;
        tmp.write_all(data.as_bytes())
            .map_err(|e| Error::io("write configuration", tmp.path().to_path_buf(), e))?;
        tmp.persist(&self.path)
            .map_err(|e| Error::io("replace configuration", &self.path, e.error))?;
        debug!(path = %self.path.display(), "configuration saved");
        Ok(())
    }

    fn replace_with(&self, source: &Path) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::io("create config directory", parent, e))?;
        }
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(|e| Error::io("remove configuration", &self.path, e))?;
        }
        fs::copy(source, &self.path).map_err(|e| Error::io("copy configuration", source, e))?;
        info!(from = %source.display(), to = %self.path.display(), "configuration file replaced");
        Ok(())
    }

    fn path(&self) -> &Path {
        &self.path
    }
}
