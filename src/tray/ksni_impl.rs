//! KSNI tray bridge implementation.
//!
//! Bridges the shared tray state to the ksni library by implementing the
//! `ksni::Tray` trait for the StatusNotifierItem specification.

use crate::tray::state::TrayState;
use ksni::menu::MenuItem;
use std::sync::{Arc, Mutex};

/// Implementation of the `ksni::Tray` trait over the shared tray state.
pub struct KsniTray {
    /// Shared reference to the tray state.
    pub state: Arc<Mutex<TrayState>>,
}

impl ksni::Tray for KsniTray {
    fn id(&self) -> String {
        let state = self.state.lock().unwrap();
        state.tray_id.clone()
    }

    fn icon_name(&self) -> String {
        let state = self.state.lock().unwrap();
        state.icon_name.clone()
    }

    fn title(&self) -> String {
        let state = self.state.lock().unwrap();
        state.title.clone()
    }

    fn tool_tip(&self) -> ksni::ToolTip {
        let state = self.state.lock().unwrap();
        ksni::ToolTip {
            icon_name: state.icon_name.clone(),
            icon_pixmap: vec![],
            title: state.title.clone(),
            description: state.tooltip.clone(),
        }
    }

    fn menu(&self) -> Vec<MenuItem<Self>> {
        let state = self.state.lock().unwrap();
        state.build_menu_items()
    }
}
