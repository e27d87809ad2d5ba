//! Internal events emitted by the tray menu.
//!
//! Click handlers run on the ksni service thread; they forward these
//! events over a channel to the launcher's event loop, which does the
//! actual work.

use crate::menu::MenuAction;

/// Events flowing from the tray surface to the launcher.
pub enum TrayEvent {
    /// A menu leaf was activated. Carries the action snapshot captured at
    /// build time for that leaf.
    Activated(MenuAction),
    /// A checkbox leaf was toggled to the given state.
    CheckboxToggled(String, bool),
}
