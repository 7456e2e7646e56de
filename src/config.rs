//! Overlay configuration persistence.
//!
//! Stores whether overlay messages are shown and which extra stacks to
//! register, as JSON at `~/.local/share/osd-overlay/config.json`. Loaded once
//! at startup; the enabled flag can then be toggled live on the `Overlay`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::stack::StackLayout;

/// Default config file path.
fn default_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("osd-overlay")
        .join("config.json")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlayConfig {
    #[serde(default = "default_true")]
    pub messages_enabled: bool,
    /// Stacks registered alongside the default one.
    #[serde(default)]
    pub stacks: Vec<StackLayout>,
    /// Path the config was loaded from (not serialized).
    #[serde(skip)]
    path: PathBuf,
}

fn default_true() -> bool { true }

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            messages_enabled: true,
            stacks: Vec::new(),
            path: default_path(),
        }
    }
}

impl OverlayConfig {
    /// Load from the default location, falling back to defaults on any error.
    pub fn load() -> Self {
        let path = default_path();
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::debug!("Using default overlay config ({}): {}", path.display(), e);
                Self {
                    path,
                    ..Self::default()
                }
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Self = serde_json::from_str(&contents)?;
        config.path = path.to_path_buf();
        Ok(config)
    }

    /// Persist to the path this config was loaded from.
    pub fn save(&self) -> Result<()> {
        self.save_to(&self.path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
