use crate::error::Result;
use crate::model::DEFAULT_ROLE;
use crate::store::sqlite::DEFAULT_DB_FILE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CONFIG_FILENAME: &str = "config.json";

const KEYS: [&str; 4] = ["db-file", "default-role", "allow-camera", "allow-gallery"];

/// Configuration for a campus directory, stored in `<home>/config.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CampusConfig {
    /// SQLite file name, relative to the campus home
    #[serde(default = "default_db_file")]
    pub db_file: String,

    /// Role given to students added without one
    #[serde(default = "default_role")]
    pub default_role: String,

    /// Whether avatar capture may use the camera source
    #[serde(default)]
    pub allow_camera: bool,

    /// Whether avatar capture may use the gallery source
    #[serde(default = "default_true")]
    pub allow_gallery: bool,
}

fn default_db_file() -> String {
    DEFAULT_DB_FILE.to_string()
}

fn default_role() -> String {
    DEFAULT_ROLE.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for CampusConfig {
    fn default() -> Self {
        Self {
            db_file: default_db_file(),
            default_role: default_role(),
            allow_camera: false,
            allow_gallery: true,
        }
    }
}

fn parse_bool(key: &str, value: &str) -> std::result::Result<bool, String> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(format!("{} expects true or false, got {}", key, value)),
    }
}

impl CampusConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: CampusConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        fs::create_dir_all(config_dir)?;

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "db-file" => Some(self.db_file.clone()),
            "default-role" => Some(self.default_role.clone()),
            "allow-camera" => Some(self.allow_camera.to_string()),
            "allow-gallery" => Some(self.allow_gallery.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "db-file" => {
                let value = value.trim();
                if value.is_empty() || value.contains(['/', '\\']) {
                    return Err("db-file must be a plain file name".to_string());
                }
                self.db_file = value.to_string();
            }
            "default-role" => {
                let value = value.trim();
                if value.is_empty() {
                    return Err("default-role cannot be empty".to_string());
                }
                self.default_role = value.to_string();
            }
            "allow-camera" => self.allow_camera = parse_bool(key, value)?,
            "allow-gallery" => self.allow_gallery = parse_bool(key, value)?,
            _ => return Err(format!("Unknown config key: {}", key)),
        }
        Ok(())
    }

    pub fn list_all(&self) -> Vec<(&'static str, String)> {
        KEYS.iter()
            .filter_map(|key| self.get(key).map(|value| (*key, value)))
            .collect()
    }

    /// Load, tolerating a broken file.
    pub fn load_or_default<P: AsRef<Path>>(config_dir: P) -> Self {
        match Self::load(&config_dir) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("ignoring unreadable config: {}", e);
                Self::default()
            }
        }
    }
}
