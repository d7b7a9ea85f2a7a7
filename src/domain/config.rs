use std::path::Path;

use serde::{Deserialize, Serialize};

/// Configuration for the occupancy tracker.
///
/// This struct holds the settings that control how the campus is displayed
/// and where the snapshot document lives inside the data directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// The display name of the campus.
    ///
    /// Shown as the heading of tables and under the map.
    pub campus: String,

    /// The file name of the snapshot document inside the data directory.
    data_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            campus: default_campus(),
            data_file: default_data_file(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// Returns the snapshot document file name.
    #[must_use]
    pub fn data_file(&self) -> &str {
        &self.data_file
    }

    /// Sets the snapshot document file name.
    ///
    /// An existing document is not moved. The next run that misses the new
    /// file seeds it from the catalog.
    pub fn set_data_file(&mut self, name: String) {
        self.data_file = name;
    }
}

fn default_campus() -> String {
    "SFU Burnaby".to_string()
}

fn default_data_file() -> String {
    "buildings.json".to_string()
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_campus")]
        campus: String,

        #[serde(default = "default_data_file")]
        data_file: String,
    },
}

impl From<Versions> for super::Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 { campus, data_file } => Self { campus, data_file },
        }
    }
}

impl From<super::Config> for Versions {
    fn from(config: super::Config) -> Self {
        Self::V1 {
            campus: config.campus,
            data_file: config.data_file,
        }
    }
}
