use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Report read when no input is given
pub const DEFAULT_INPUT: &str = "results.txt";
/// Page written when no output is given
pub const DEFAULT_OUTPUT: &str = "pipviz.html";

fn default_margin() -> f64 {
    0.1
}
fn default_min_margin() -> f64 {
    0.0
}
fn default_width() -> u32 {
    1000
}
fn default_height() -> u32 {
    800
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct FileConfig {
    #[serde(default)]
    pub input: Option<PathBuf>,
    #[serde(default)]
    pub output: Option<PathBuf>,
    /// Viewport margin as a fraction of each axis' extent
    #[serde(default = "default_margin")]
    pub margin: f64,
    /// Smallest margin, in data units, for axes with no extent
    #[serde(default = "default_min_margin")]
    pub min_margin: f64,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub open: bool,
    #[serde(default = "default_true")]
    pub wait: bool,
    #[serde(default = "default_true")]
    pub color: bool,
    #[serde(default)]
    pub verbose: bool,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            input: None,
            output: None,
            margin: default_margin(),
            min_margin: default_min_margin(),
            width: default_width(),
            height: default_height(),
            title: None,
            open: false,
            wait: true,
            color: true,
            verbose: false,
        }
    }
}

impl FileConfig {
    /// Load the first readable config file from the search path
    pub fn load() -> Option<Self> {
        let config_paths = get_config_paths();

        for path in config_paths {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(&path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => return Some(config),
                    Err(e) => {
                        eprintln!("Warning: Failed to parse config file {:?}: {}", path, e);
                    }
                }
            }
        }
        None
    }

    /// Load an explicitly named config file; any problem is an error
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&contents).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("pipviz.toml"));
    paths.push(PathBuf::from(".pipviz.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("pipviz").join("config.toml"));
        paths.push(config_dir.join("pipviz.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".pipviz.toml"));
        paths.push(home.join(".config").join("pipviz").join("config.toml"));
    }

    paths
}
