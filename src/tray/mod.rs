//! Tray surface: state management, event plumbing, and the bridge to the
//! KSNI library.

pub mod event;
pub mod ksni_impl;
pub mod state;

pub use event::TrayEvent;
pub use ksni_impl::KsniTray;
pub use state::TrayState;
