use crate::colors::Rgb;
use crate::config::TrailConfig;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub trail: TrailSettings,
}

/// `[trail]` section. Every key is optional; absent keys keep the default.
#[derive(Debug, Default, Deserialize)]
pub struct TrailSettings {
    pub cell_width: Option<u32>,
    pub cell_height: Option<u32>,
    pub gap: Option<u32>,
    pub linger_ms: Option<u64>,
    pub tick_ms: Option<u64>,
    pub base: Option<Rgb>,
    pub highlight: Option<Rgb>,
    pub background: Option<Rgb>,
}

impl Settings {
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => Self::parse(&content).unwrap_or_else(|e| {
                log::warn!("ignoring malformed {}: {}", path.display(), e);
                Self::default()
            }),
            Err(e) => {
                log::warn!("cannot read {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load a file the user named explicitly. Unlike `load`, a missing or
    /// malformed file is an error rather than a silent fallback.
    pub fn load_explicit(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            io::Error::new(e.kind(), format!("config file {}: {}", path.display(), e))
        })?;
        Self::parse(&content).map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("config file {}: {}", path.display(), e),
            )
        })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tiletrail")
            .join("config.toml")
    }
}

impl TrailSettings {
    /// Overlay the values present in the file onto `config`
    pub fn apply(&self, config: &mut TrailConfig) {
        if let Some(v) = self.cell_width { config.cell_width = v; }
        if let Some(v) = self.cell_height { config.cell_height = v; }
        if let Some(v) = self.gap { config.gap = v; }
        if let Some(v) = self.linger_ms { config.linger_ms = v; }
        if let Some(v) = self.tick_ms { config.tick_ms = v; }
        if let Some(v) = self.base { config.base = v; }
        if let Some(v) = self.highlight { config.highlight = v; }
        if let Some(v) = self.background { config.background = v; }
    }
}
