use std::{
    env, fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::info;

const SETTINGS_FILE: &str = "settings.json";
const DEMO_PATH_ENV: &str = "DEMVIEW_DEMO_PATH";

/// Persisted tool settings. Currently only the folder demos are listed from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub demo_path: Option<PathBuf>,
}

impl Settings {
    /// Resolves the per-user settings file location, e.g.
    /// `<local app data>/demview/settings.json`.
    pub fn default_path() -> anyhow::Result<PathBuf> {
        let base = dirs::data_local_dir()
            .ok_or_else(|| anyhow::anyhow!("unable to resolve local app data dir"))?;
        Ok(base.join("demview").join(SETTINGS_FILE))
    }

    /// Loads settings from the given file, then applies the `DEMVIEW_DEMO_PATH`
    /// environment override. A missing or unparseable file yields the defaults.
    pub fn load_from(path: &Path) -> Self {
        let mut settings = Self::default();

        if let Ok(raw) = fs::read_to_string(path) {
            if let Ok(file_cfg) = serde_json::from_str::<Settings>(&raw) {
                settings = file_cfg;
            }
        }

        if let Ok(v) = env::var(DEMO_PATH_ENV) {
            settings.demo_path = Some(PathBuf::from(v));
        }

        settings
    }

    /// Writes the settings back as JSON, creating the parent directory first.
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create settings dir {}", parent.display()))?;
        }
        let raw = serde_json::to_string_pretty(self).context("failed to serialize settings")?;
        fs::write(path, raw)
            .with_context(|| format!("failed to write settings file {}", path.display()))
    }
}

/// Native directory-selection dialog, kept behind a trait so the core never
/// opens OS dialogs itself. `None` means the user cancelled.
pub trait DemoPathPicker {
    fn pick_directory(&self, default: Option<&Path>) -> Option<PathBuf>;
}

/// Asks the picker for a demo folder and stores the choice in the settings
/// file. Cancelling the dialog is a benign no-op, not an error; returns
/// whether a new path was stored.
pub fn select_and_store_demo_path(
    picker: &dyn DemoPathPicker,
    settings: &mut Settings,
    settings_path: &Path,
) -> anyhow::Result<bool> {
    let Some(new_path) = picker.pick_directory(settings.demo_path.as_deref()) else {
        info!("demo path selection cancelled by user");
        return Ok(false);
    };

    info!(path = %new_path.display(), "set new demo path");
    settings.demo_path = Some(new_path);
    settings.save_to(settings_path)?;
    Ok(true)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
