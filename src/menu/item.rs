//! Abstract menu tree data structures.
//!
//! This module defines the renderer-agnostic menu tree produced by
//! synthesis. The tray bridge translates these nodes into whatever the
//! rendering backend understands.

use std::path::PathBuf;

/// A launch target after successful platform resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemInfo {
    /// Display name.
    pub name: String,
    /// Icon file path, present only when the file exists.
    pub icon: Option<PathBuf>,
    /// Command line to execute on click.
    pub exec: String,
}

/// What activating a menu node does.
///
/// `Launch` owns its [`ItemInfo`] snapshot. Every leaf built from a
/// resolved item carries its own copy, so a click can only ever fire the
/// command captured for that leaf.
#[derive(Clone, Debug, PartialEq)]
pub enum MenuAction {
    /// Run the captured command, detached.
    Launch(ItemInfo),
    /// Full forced refresh cycle.
    UpdateMenu,
    /// Pick a new configuration file and install it.
    SelectConfigFile,
    /// Leave the tray loop and end the application.
    Quit,
    /// Informational node, nothing to do.
    None,
}

/// One node of the synthesized menu tree.
#[derive(Clone, Debug, PartialEq)]
pub enum MenuNode {
    /// A clickable leaf.
    Standard {
        label: String,
        /// Attached only when it resolves to a real file.
        icon_path: Option<PathBuf>,
        enabled: bool,
        action: MenuAction,
    },
    /// A leaf with a toggleable checked state, addressed by id.
    Checkbox {
        id: String,
        label: String,
        enabled: bool,
        checked: bool,
    },
    /// A submenu containing other nodes. A submenu with no usable children
    /// stays in the tree but is disabled.
    SubMenu {
        label: String,
        enabled: bool,
        children: Vec<MenuNode>,
    },
    /// A visual separator line.
    Separator,
}

impl MenuNode {
    /// A disabled leaf carrying no action.
    pub fn disabled(label: impl Into<String>) -> Self {
        MenuNode::Standard {
            label: label.into(),
            icon_path: None,
            enabled: false,
            action: MenuAction::None,
        }
    }

    /// A plain enabled leaf.
    pub fn leaf(label: impl Into<String>, action: MenuAction) -> Self {
        MenuNode::Standard {
            label: label.into(),
            icon_path: None,
            enabled: true,
            action,
        }
    }
}
