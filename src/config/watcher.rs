//! Configuration file watcher.
//!
//! # Responsibilities
//! - Observe the config file and reload it after a burst of writes settles
//! - Publish new `ForgeOptions` only when a forged field actually changed
//!
//! # Design Decisions
//! - notify's callback thread only signals; loading happens on a tokio task
//! - Invalid configs are logged and ignored, the last good options stay current
//! - Settings that do not reach the forge (e.g. log level) never trigger an update

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::{load_config, ConfigError};
use crate::forge::ForgeOptions;

/// Quiet period after the last file event before reloading.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Outcome of reloading the file against the options currently in use.
#[derive(Debug)]
pub enum Reload {
    /// The file forges differently; carries the new options.
    Changed(ForgeOptions),
    /// The file loaded but every forged field is the same.
    Unchanged,
    /// The file could not be loaded or validated.
    Failed(ConfigError),
}

/// Load `path` and compare the resulting options with `current`.
pub fn reload(path: &Path, current: &ForgeOptions) -> Reload {
    match load_config(path) {
        Ok(config) => {
            let options = ForgeOptions::from(&config);
            if &options == current {
                Reload::Unchanged
            } else {
                Reload::Changed(options)
            }
        }
        Err(e) => Reload::Failed(e),
    }
}

/// Watches the configuration file and streams changed forge options.
pub struct ConfigWatcher {
    path: PathBuf,
    current: ForgeOptions,
    debounce: Duration,
    update_tx: mpsc::UnboundedSender<ForgeOptions>,
}

impl ConfigWatcher {
    /// Create a watcher starting from the options already in use.
    ///
    /// Returns the watcher and a receiver for changed options.
    pub fn new(path: &Path, current: ForgeOptions) -> (Self, mpsc::UnboundedReceiver<ForgeOptions>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                current,
                debounce: DEFAULT_DEBOUNCE,
                update_tx,
            },
            update_rx,
        )
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Start watching. Must be called inside a tokio runtime.
    ///
    /// Dropping the returned watcher stops the reload task.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if event.kind.is_modify() || event.kind.is_create() => {
                    let _ = event_tx.send(());
                }
                Ok(_) => {}
                Err(e) => tracing::warn!(error = %e, "Config watch error"),
            },
            Config::default(),
        )?;
        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = %self.path.display(), debounce_ms = self.debounce.as_millis() as u64, "Config watcher started");
        tokio::spawn(self.reload_loop(event_rx));
        Ok(watcher)
    }

    async fn reload_loop(mut self, mut events: mpsc::UnboundedReceiver<()>) {
        while events.recv().await.is_some() {
            // Swallow the rest of the burst.
            loop {
                match tokio::time::timeout(self.debounce, events.recv()).await {
                    Ok(Some(())) => continue,
                    Ok(None) => return,
                    Err(_) => break,
                }
            }

            match reload(&self.path, &self.current) {
                Reload::Changed(options) => {
                    tracing::info!(base_domain = %options.base_domain, "Forge options changed");
                    self.current = options.clone();
                    if self.update_tx.send(options).is_err() {
                        return;
                    }
                }
                Reload::Unchanged => tracing::debug!("Config reloaded, forge options unchanged"),
                Reload::Failed(e) => {
                    tracing::warn!(error = %e, "Config reload failed, keeping current options")
                }
            }
        }
    }
}
