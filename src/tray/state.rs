//! Tray state management.
//!
//! Holds the tray identity and the currently installed menu tree, and
//! translates the abstract tree into ksni menu items.

use crate::menu::{MenuAction, MenuNode};
use crate::tray::event::TrayEvent;
use crate::tray::ksni_impl::KsniTray;
use ksni::menu::*;
use std::sync::mpsc::Sender;

/// Internal state of the tray icon: identity fields plus the installed
/// menu tree and the event channel back to the launcher.
pub struct TrayState {
    /// Freedesktop icon name for the tray icon itself.
    pub icon_name: String,
    /// Title text.
    pub title: String,
    /// Tooltip text.
    pub tooltip: String,
    /// Unique identifier for this tray icon.
    pub tray_id: String,
    /// The installed menu tree.
    pub menu: Vec<MenuNode>,
    /// Channel sender for forwarding click events to the launcher.
    pub event_sender: Option<Sender<TrayEvent>>,
}

impl TrayState {
    pub fn new(tray_id: String) -> Self {
        TrayState {
            icon_name: "application-x-executable".to_string(),
            title: String::new(),
            tooltip: String::new(),
            tray_id,
            menu: Vec::new(),
            event_sender: None,
        }
    }

    /// Replaces the installed tree wholesale. The previous tree is
    /// discarded; nothing is mutated in place.
    pub fn install_menu(&mut self, tree: Vec<MenuNode>) {
        self.menu = tree;
    }

    /// Finds a checkbox by id and toggles it, returning the new state.
    pub fn find_and_toggle_checkbox(&mut self, id: &str) -> Option<bool> {
        Self::toggle_checkbox_recursive(&mut self.menu, id)
    }

    fn toggle_checkbox_recursive(nodes: &mut Vec<MenuNode>, id: &str) -> Option<bool> {
        for node in nodes {
            match node {
                MenuNode::Checkbox {
                    id: node_id,
                    checked,
                    ..
                } => {
                    if node_id == id {
                        *checked = !*checked;
                        return Some(*checked);
                    }
                }
                MenuNode::SubMenu { children, .. } => {
                    if let Some(result) = Self::toggle_checkbox_recursive(children, id) {
                        return Some(result);
                    }
                }
                _ => {}
            }
        }
        None
    }

    /// Builds the ksni menu from the installed tree.
    pub fn build_menu_items(&self) -> Vec<MenuItem<KsniTray>> {
        self.menu
            .iter()
            .map(|node| self.build_menu_item(node))
            .collect()
    }

    fn build_menu_item(&self, node: &MenuNode) -> MenuItem<KsniTray> {
        match node {
            MenuNode::Standard {
                label,
                icon_path,
                enabled,
                action,
            } => {
                // Each closure owns its node's action snapshot, so a click
                // fires exactly the command captured for that leaf.
                let action = action.clone();
                let sender = self.event_sender.clone();
                StandardItem {
                    label: label.clone(),
                    icon_name: icon_path
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_default(),
                    enabled: *enabled,
                    activate: Box::new(move |_this: &mut KsniTray| {
                        if let Some(ref tx) = sender {
                            let _ = tx.send(TrayEvent::Activated(action.clone()));
                        }
                    }),
                    ..Default::default()
                }
                .into()
            }
            MenuNode::Checkbox {
                id,
                label,
                enabled,
                checked,
            } => {
                let id = id.clone();
                let sender = self.event_sender.clone();
                CheckmarkItem {
                    label: label.clone(),
                    enabled: *enabled,
                    checked: *checked,
                    activate: Box::new(move |this: &mut KsniTray| {
                        let new_checked = {
                            let mut state = this.state.lock().unwrap();
                            state.find_and_toggle_checkbox(&id)
                        };
                        if let (Some(tx), Some(checked)) = (&sender, new_checked) {
                            let _ = tx.send(TrayEvent::CheckboxToggled(id.clone(), checked));
                        }
                    }),
                    ..Default::default()
                }
                .into()
            }
            MenuNode::SubMenu {
                label,
                enabled,
                children,
            } => SubMenu {
                label: label.clone(),
                enabled: *enabled,
                submenu: children
                    .iter()
                    .map(|child| self.build_menu_item(child))
                    .collect(),
                ..Default::default()
            }
            .into(),
            MenuNode::Separator => MenuItem::Separator,
        }
    }
}
