//! File-selection dialog.

use crate::error::{Error, Result};
use std::path::PathBuf;
use std::process::Command;

/// Asks the user to choose a file.
pub trait FilePicker: Send {
    /// Resolves to the selected path, or an error when the dialog fails or
    /// the user cancels.
    fn pick_file(&self) -> Result<PathBuf>;
}

/// [`FilePicker`] shelling out to `zenity`.
pub struct ZenityPicker;

impl FilePicker for ZenityPicker {
    fn pick_file(&self) -> Result<PathBuf> {
        let output = Command::new("zenity")
            .arg("--file-selection")
            .arg("--title=Select JSON configuration file")
            .arg("--file-filter=JSON | *.json")
            .output()
            .map_err(|e| Error::Dialog(format!("zenity unavailable: {e}")))?;

        if !output.status.success() {
            return Err(Error::Dialog("file selection cancelled".to_string()));
        }
        let path = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if path.is_empty() {
            return Err(Error::Dialog("no file selected".to_string()));
        }
        Ok(PathBuf::from(path))
    }
}
