//! Refresh orchestration and the launcher event loop.
//!
//! [`Launcher`] owns the configuration document, the process-wide logging
//! flag, and the collaborators behind their trait seams. A refresh is one
//! full load, resolve, build, persist pass; clicks arrive as [`TrayEvent`]s
//! over a channel and are dispatched one at a time.

use crate::config::{AppInfo, ConfigStore, Document};
use crate::error::{Error, Result};
use crate::menu::{ENABLE_LOGS_ID, ItemInfo, MenuAction, MenuSynthesizer};
use crate::platform::ItemResolver;
use crate::system::{CommandRunner, FilePicker, Notifier};
use crate::tray::{KsniTray, TrayEvent, TrayState};
use ksni::blocking::TrayMethods;
use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, channel};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

/// The menu synthesis and refresh engine.
pub struct Launcher {
    store: Box<dyn ConfigStore>,
    resolver: Box<dyn ItemResolver>,
    notifier: Box<dyn Notifier>,
    runner: Box<dyn CommandRunner>,
    picker: Box<dyn FilePicker>,
    state: Arc<Mutex<TrayState>>,
    handle: Option<ksni::blocking::Handle<KsniTray>>,
    document: Document,
    /// Process-wide logging flag. Seeded from the persisted document at
    /// startup, mutated only by the "Enable Logs" action, and written back
    /// into the document on every refresh.
    logs_enabled: bool,
    /// Log file the user can be pointed at, when the host set one up.
    log_file: Option<PathBuf>,
    tray_created: bool,
    refreshing: bool,
}

impl Launcher {
    pub fn new(
        store: Box<dyn ConfigStore>,
        resolver: Box<dyn ItemResolver>,
        notifier: Box<dyn Notifier>,
        runner: Box<dyn CommandRunner>,
        picker: Box<dyn FilePicker>,
    ) -> Self {
        Launcher {
            store,
            resolver,
            notifier,
            runner,
            picker,
            state: Arc::new(Mutex::new(TrayState::new("tray-launcher".to_string()))),
            handle: None,
            document: Document::default(),
            logs_enabled: false,
            log_file: None,
            tray_created: false,
            refreshing: false,
        }
    }

    /// Names the log file in user-facing messages about the logging toggle.
    pub fn with_log_file(mut self, path: PathBuf) -> Self {
        self.log_file = Some(path);
        self
    }

    /// Runs one full refresh cycle: prepare platform data, reload the
    /// document, rebuild the tree, persist the normalized document.
    ///
    /// Refreshes never overlap; a re-entrant call is dropped.
    pub fn refresh(&mut self, force_reload: bool) {
        if self.refreshing {
            warn!("refresh already in progress, ignoring");
            return;
        }
        self.refreshing = true;
        self.refresh_cycle(force_reload);
        self.refreshing = false;
    }

    fn refresh_cycle(&mut self, force_reload: bool) {
        debug!(force_reload, "refresh started");
        if let Err(err) = self.resolver.prepare(force_reload) {
            self.notifier.error(&err.to_string());
        }

        // Fresh load every cycle; a broken file degrades to an empty menu
        // instead of taking the application down.
        let mut document = match self.store.load() {
            Ok(document) => document,
            Err(err) => {
                self.notifier.error(&err.to_string());
                Document::default()
            }
        };
        document.enable_logs = self.logs_enabled;
        document.normalize();

        let tree =
            MenuSynthesizer::new(self.resolver.as_ref(), self.notifier.as_ref()).build(&document);
        self.state.lock().unwrap().install_menu(tree);
        self.push_update();

        self.resolver.clear();
        if let Err(err) = self.store.save(&document) {
            self.notifier.error(&err.to_string());
        }
        self.document = document;
        debug!("refresh finished");
    }

    /// Nudges the tray service to re-read the installed tree.
    fn push_update(&self) {
        if let Some(handle) = &self.handle {
            let _ = handle.update(|_tray: &mut KsniTray| {});
        }
    }

    /// Bootstraps the tray and runs the event loop until exit.
    pub fn start(&mut self) -> Result<()> {
        self.resolver.check_prerequisites()?;
        info!(
            name = AppInfo::NAME,
            version = AppInfo::VERSION,
            "starting launcher"
        );
        self.resolver.prepare(false)?;

        // The persisted preference seeds the process-wide flag once; from
        // here on the flag takes precedence over whatever is on disk.
        if let Ok(document) = self.store.load() {
            self.logs_enabled = document.enable_logs;
        }

        let events = self.create_tray()?;
        self.refresh(false);
        self.run_event_loop(events);
        Ok(())
    }

    /// One-time tray creation: identity, event channel, service spawn.
    fn create_tray(&mut self) -> Result<Receiver<TrayEvent>> {
        if self.tray_created {
            return Err(Error::Tray("tray already created".to_string()));
        }
        let (tx, rx) = channel();
        {
            let mut state = self.state.lock().unwrap();
            state.event_sender = Some(tx);
            state.icon_name = AppInfo::ICON_NAME.to_string();
            state.title = AppInfo::NAME.to_string();
            state.tooltip = AppInfo::NAME.to_string();
        }
        let tray = KsniTray {
            state: self.state.clone(),
        };
        let handle = tray.spawn().map_err(|e| Error::Tray(e.to_string()))?;
        self.handle = Some(handle);
        self.tray_created = true;
        Ok(rx)
    }

    fn run_event_loop(&mut self, events: Receiver<TrayEvent>) {
        while let Ok(event) = events.recv() {
            if !self.handle_event(event) {
                break;
            }
        }
        // Dropping the handle tears the tray down.
        self.handle.take();
        info!("launcher stopped");
    }

    /// Dispatches one event. Returns `false` when the loop should end.
    fn handle_event(&mut self, event: TrayEvent) -> bool {
        match event {
            TrayEvent::Activated(MenuAction::Launch(info)) => self.launch(&info),
            TrayEvent::Activated(MenuAction::UpdateMenu) => self.update_menu(),
            TrayEvent::Activated(MenuAction::SelectConfigFile) => self.select_config_file(),
            TrayEvent::Activated(MenuAction::Quit) => return false,
            TrayEvent::Activated(MenuAction::None) => {}
            TrayEvent::CheckboxToggled(id, checked) if id == ENABLE_LOGS_ID => {
                self.set_logging(checked);
            }
            TrayEvent::CheckboxToggled(id, _) => {
                warn!(%id, "unknown checkbox toggled");
            }
        }
        true
    }

    fn launch(&mut self, info: &ItemInfo) {
        if let Err(err) = self.runner.spawn_detached(&info.exec, self.logs_enabled) {
            self.notifier
                .error(&format!("Failed to launch {}: {err}", info.name));
        }
    }

    fn update_menu(&mut self) {
        self.notifier.info("Processing...");
        self.refresh(true);
        self.notifier.ok("Processing, done.");
    }

    /// Replaces the configuration file with a user-picked one, then
    /// rebuilds. Any failing step reports and aborts without touching the
    /// current configuration.
    fn select_config_file(&mut self) {
        let picked = match self.picker.pick_file() {
            Ok(path) => path,
            Err(err) => {
                self.notifier.error(&err.to_string());
                return;
            }
        };
        self.notifier.info("Processing...");
        if let Err(err) = self.store.replace_with(&picked) {
            self.notifier.error(&err.to_string());
            return;
        }
        self.refresh(true);
        self.notifier.ok("Processing, done.");
    }

    /// Flips the process-wide logging flag and persists it immediately.
    pub fn set_logging(&mut self, enabled: bool) {
        self.logs_enabled = enabled;
        let word = if enabled { "enabled" } else { "disabled" };
        info!("all logs were {word} by user");

        self.document.enable_logs = enabled;
        if let Err(err) = self.store.save(&self.document) {
            self.notifier.error(&err.to_string());
            return;
        }
        let mut message = format!("All Logs were {word} by user.");
        if let Some(path) = &self.log_file {
            let _ = write!(message, " Log file is located in: {}", path.display());
        }
        self.notifier.info(&message);
    }
}
