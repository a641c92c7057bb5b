use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};

use crate::layout_engine::LayoutKind;

pub fn config_file() -> PathBuf { dirs::home_dir().unwrap().join(".atrium.toml") }

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub tags: TagSettings,
    #[serde(default)]
    pub layout: LayoutSettings,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
pub struct TagSettings {
    #[serde(default = "default_tag_names")]
    pub names: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
pub struct LayoutSettings {
    /// Layout roster per screen, in cycling order. Must not be empty.
    #[serde(default = "default_roster")]
    pub roster: Vec<LayoutKind>,
    /// Focus freshly mapped clients after their first arrangement.
    #[serde(default = "yes")]
    pub focus_new_clients: bool,
    /// Fraction of the screen width given to the tile master column.
    #[serde(default = "default_master_width_factor")]
    pub master_width_factor: f64,
    /// Number of clients in the tile master column.
    #[serde(default = "default_master_count")]
    pub master_count: usize,
}

fn yes() -> bool { true }

fn default_tag_names() -> Vec<String> { (1..=9).map(|i| i.to_string()).collect() }

fn default_roster() -> Vec<LayoutKind> {
    vec![
        LayoutKind::Tile,
        LayoutKind::Max,
        LayoutKind::Spiral,
        LayoutKind::Dwindle,
        LayoutKind::Floating,
    ]
}

fn default_master_width_factor() -> f64 { 0.6 }

fn default_master_count() -> usize { 1 }

impl Default for TagSettings {
    fn default() -> Self {
        Self {
            names: default_tag_names(),
        }
    }
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            roster: default_roster(),
            focus_new_clients: true,
            master_width_factor: default_master_width_factor(),
            master_count: default_master_count(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tags: TagSettings::default(),
            layout: LayoutSettings::default(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Config> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        Config::parse(&contents)
    }

    pub fn parse(contents: &str) -> anyhow::Result<Config> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.layout.roster.is_empty() {
            bail!("layout.roster must name at least one layout");
        }
        if self.tags.names.is_empty() {
            bail!("tags.names must name at least one tag");
        }
        if !(0.05..=0.95).contains(&self.layout.master_width_factor) {
            bail!(
                "layout.master_width_factor must be within [0.05, 0.95], got {}",
                self.layout.master_width_factor
            );
        }
        if self.layout.master_count == 0 {
            bail!("layout.master_count must be at least 1");
        }
        Ok(())
    }
}
