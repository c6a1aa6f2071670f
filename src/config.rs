//! Configuration loader plus strongly typed settings structures.
//!
//! The demo reads one TOML file: dashboard settings, keybinds, and the list of
//! widgets with their styling attributes. A default file is embedded at compile
//! time; a user file in the data directory (or `--config`) replaces it.

use crate::core::demo_actions::DemoKeybinds;
use crate::data::{Color, ProgressConfig, ResolvedAttributes};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

// Embed default configuration at compile time
const DEFAULT_CONFIG: &str = include_str!("../defaults/config.toml");

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "PROGRESS_GAUGE_DIR";

/// Top-level configuration object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub demo: DemoSettings,
    #[serde(default)]
    pub keybinds: DemoKeybinds,
    #[serde(default)]
    pub widgets: Vec<WidgetDef>,
}

/// Which presentation a widget uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetKind {
    Bar,
    Ring,
}

/// One widget on the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetDef {
    pub name: String,
    pub kind: WidgetKind,
    /// Title shown above the widget (defaults to the name)
    #[serde(default)]
    pub title: Option<String>,
    /// Styling attributes, see `data::attributes` for the keys
    #[serde(default)]
    pub attrs: toml::Table,
}

impl WidgetDef {
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }

    pub fn resolve(&self) -> Result<ResolvedAttributes> {
        ResolvedAttributes::resolve(&self.attrs)
            .with_context(|| format!("Invalid attributes for widget '{}'", self.name))
    }
}

fn default_poll_timeout_ms() -> u64 {
    16
}

fn default_random_choices() -> Vec<u8> {
    vec![15, 25, 35, 45, 55, 65, 75, 85, 95]
}

fn default_showcase_duration_ms() -> u64 {
    7000
}

fn default_restyle() -> ProgressConfig {
    ProgressConfig::default()
        .background_color(Color::from_rgb(0xE8, 0xF5, 0xE9))
        .progress_color(Color::from_rgb(0x4C, 0xAF, 0x50))
        .animation_duration_ms(2500)
        .corner_radius(20.0)
}

fn default_ring_duration_ms() -> u64 {
    3000
}

fn default_ring_target() -> f32 {
    80.0
}

/// Dashboard behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoSettings {
    /// Input poll timeout per frame
    #[serde(default = "default_poll_timeout_ms")]
    pub poll_timeout_ms: u64,
    /// Targets picked from when randomizing
    #[serde(default = "default_random_choices")]
    pub random_choices: Vec<u8>,
    /// Bar used by the showcase action (none disables it)
    #[serde(default)]
    pub showcase: Option<String>,
    #[serde(default = "default_showcase_duration_ms")]
    pub showcase_duration_ms: u64,
    /// Config applied to the first bar when randomizing
    #[serde(default = "default_restyle")]
    pub restyle: ProgressConfig,
    /// Duration and target given to the first ring when randomizing
    #[serde(default = "default_ring_duration_ms")]
    pub ring_duration_ms: u64,
    #[serde(default = "default_ring_target")]
    pub ring_target: f32,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            poll_timeout_ms: default_poll_timeout_ms(),
            random_choices: default_random_choices(),
            showcase: None,
            showcase_duration_ms: default_showcase_duration_ms(),
            restyle: default_restyle(),
            ring_duration_ms: default_ring_duration_ms(),
            ring_target: default_ring_target(),
        }
    }
}

/// Result of `Config::validate`
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

impl Config {
    /// The embedded default configuration
    pub fn embedded() -> Result<Self> {
        toml::from_str(DEFAULT_CONFIG).context("Failed to parse embedded default config")
    }

    /// Load from an explicit path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents =
            fs::read_to_string(path).context(format!("Failed to read config file: {:?}", path))?;
        let config: Config = toml::from_str(&contents)
            .context(format!("Failed to parse config file: {:?}", path))?;
        config.log_validation();
        Ok(config)
    }

    /// Load the user config if one exists, else the embedded default
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            tracing::info!("Loading config from {:?}", path);
            Self::load_from_path(&path)
        } else {
            tracing::info!("No config at {:?}, using embedded defaults", path);
            Self::embedded()
        }
    }

    /// Write the embedded default to the data directory unless a file is already there
    pub fn extract_default() -> Result<PathBuf> {
        let path = Self::config_path()?;
        if !path.exists() {
            if let Some(dir) = path.parent() {
                fs::create_dir_all(dir)
                    .context(format!("Failed to create config directory: {:?}", dir))?;
            }
            fs::write(&path, DEFAULT_CONFIG)
                .context(format!("Failed to write default config: {:?}", path))?;
            tracing::info!("Wrote default config to {:?}", path);
        }
        Ok(path)
    }

    /// Get the base directory (~/.progress-gauge/)
    /// Can be overridden with the PROGRESS_GAUGE_DIR environment variable
    pub fn base_dir() -> Result<PathBuf> {
        if let Ok(custom_dir) = std::env::var(DATA_DIR_ENV) {
            return Ok(PathBuf::from(custom_dir));
        }
        let home = dirs::home_dir().context("Could not find home directory")?;
        Ok(home.join(".progress-gauge"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::base_dir()?.join("config.toml"))
    }

    pub fn widget(&self, name: &str) -> Option<&WidgetDef> {
        self.widgets.iter().find(|w| w.name == name)
    }

    /// Check everything the dashboard relies on
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::default();

        let mut names = HashSet::new();
        for widget in &self.widgets {
            if widget.name.is_empty() {
                report.errors.push("Widget has empty name".to_string());
            } else if !names.insert(widget.name.as_str()) {
                report
                    .errors
                    .push(format!("Duplicate widget name '{}'", widget.name));
            }
            if let Err(e) = widget.resolve() {
                report.errors.push(format!("{:#}", e));
            }
            if widget.kind == WidgetKind::Ring && widget.attrs.contains_key("corner_radius") {
                report.warnings.push(format!(
                    "Widget '{}' is a ring; corner_radius is ignored",
                    widget.name
                ));
            }
        }

        if self.widgets.is_empty() {
            report.warnings.push("No widgets defined".to_string());
        }

        if let Some(showcase) = &self.demo.showcase {
            match self.widget(showcase) {
                Some(w) if w.kind == WidgetKind::Bar => {}
                Some(_) => report
                    .errors
                    .push(format!("Showcase widget '{}' must be a bar", showcase)),
                None => report
                    .errors
                    .push(format!("Showcase widget '{}' does not exist", showcase)),
            }
        }

        if self.demo.random_choices.iter().any(|c| *c > 100) {
            report
                .errors
                .push("random_choices must be between 0 and 100".to_string());
        }
        if self.demo.random_choices.is_empty() {
            report
                .warnings
                .push("random_choices is empty; randomize does nothing".to_string());
        }
        if !(0.0..=100.0).contains(&self.demo.ring_target) {
            report
                .errors
                .push(format!("ring_target {} is outside 0..=100", self.demo.ring_target));
        }

        for key in self.keybinds.conflicts() {
            report
                .warnings
                .push(format!("Key '{}' is bound to more than one action", key));
        }

        report
    }

    fn log_validation(&self) {
        let report = self.validate();
        for error in &report.errors {
            tracing::warn!("Config error: {}", error);
        }
        for warning in &report.warnings {
            tracing::debug!("Config warning: {}", warning);
        }
    }
}
