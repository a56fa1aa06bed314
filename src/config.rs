//! JSON preferences file.
//!
//! Stored in `%APPDATA%/Podium/config.json`. The store keeps the
//! preferences in memory and only writes when something changed and
//! `flush()` is called (on settings change and at exit).

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::ConfigError;
use crate::model::{Preferences, ThemeMode, APP_NAME, CONFIG_FILE};

/// `%APPDATA%/Podium`, or `./Podium` when `APPDATA` is unset.
pub fn app_dir() -> PathBuf {
    let appdata = std::env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(appdata).join(APP_NAME)
}

pub fn default_config_path() -> PathBuf {
    app_dir().join(CONFIG_FILE)
}

pub struct ConfigStore {
    path: PathBuf,
    prefs: Preferences,
    dirty: bool,
}

impl ConfigStore {
    /// Open the store at `path`. A missing or unreadable file yields
    /// defaults for this session.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let prefs = match read_prefs(&path) {
            Ok(prefs) => prefs,
            Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                Preferences::default()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "config unreadable, using defaults");
                Preferences::default()
            }
        };
        Self {
            path,
            prefs,
            dirty: false,
        }
    }

    pub fn open_default() -> Self {
        Self::open(default_config_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn prefs(&self) -> &Preferences {
        &self.prefs
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Apply `f` to the cached preferences and mark them dirty if changed.
    pub fn update(&mut self, f: impl FnOnce(&mut Preferences)) {
        let mut next = self.prefs.clone();
        f(&mut next);
        next.validate();
        if next != self.prefs {
            self.prefs = next;
            self.dirty = true;
        }
    }

    pub fn set_theme(&mut self, theme: ThemeMode) {
        self.update(|p| p.theme = theme);
    }

    pub fn set_compatibility_mode(&mut self, enabled: bool) {
        self.update(|p| p.compatibility_mode = enabled);
    }

    /// Write to disk if dirty. Failures are logged and the store stays
    /// dirty so a later flush can retry.
    pub fn flush(&mut self) {
        if !self.dirty {
            return;
        }
        match write_prefs(&self.path, &self.prefs) {
            Ok(()) => {
                debug!(path = %self.path.display(), "config saved");
                self.dirty = false;
            }
            Err(e) => warn!(path = %self.path.display(), error = %e, "failed to save config"),
        }
    }
}

fn read_prefs(path: &Path) -> Result<Preferences, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let mut prefs: Preferences = serde_json::from_str(&contents)?;
    prefs.validate();
    Ok(prefs)
}

fn write_prefs(path: &Path, prefs: &Preferences) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(prefs)?;
    fs::write(path, json)?;
    Ok(())
}
