//! Platform resolution.
//!
//! The synthesis engine never touches the platform directly; it goes
//! through [`ItemResolver`]. The stock implementation discovers installed
//! applications from freedesktop desktop entries.

pub mod desktop;

pub use desktop::DesktopResolver;

use crate::config::MenuEntry;
use crate::error::Result;
use crate::menu::ItemInfo;

/// Platform capability consumed by the synthesis engine.
pub trait ItemResolver: Send {
    /// Checks that the host environment can support resolution at all.
    /// Called once at startup.
    fn check_prerequisites(&self) -> Result<()> {
        Ok(())
    }

    /// (Re)initializes the discovery cache. With `force_reload` the cache
    /// is rebuilt even if already populated.
    fn prepare(&mut self, force_reload: bool) -> Result<()>;

    /// Resolves one declared entry into launchable form. An error drops
    /// the item from the menu; it never aborts the batch.
    fn resolve(&self, entry: &MenuEntry) -> Result<ItemInfo>;

    /// Drops transient per-refresh state so the next refresh starts clean.
    fn clear(&mut self);
}
