use crate::application::image_pipeline::{ImagePipelineConfig, Variant};
use crate::constants::{
    DEFAULT_CONFIG_FILE, LARGE_QUALITY, LARGE_WIDTH, SMALL_QUALITY, SMALL_WIDTH, STORAGE_KEY,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// TOML configuration for biteboard
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub dishes: DishesConfig,
    #[serde(default)]
    pub images: ImagesConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct StorageConfig {
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,
    #[serde(default = "default_storage_key")]
    pub key: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct DishesConfig {
    #[serde(default = "default_dish_data")]
    pub data: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ImagesConfig {
    #[serde(default = "default_raw_dir")]
    pub raw_dir: PathBuf,
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,
    #[serde(default = "default_content_dir")]
    pub content_dir: PathBuf,
    #[serde(default = "default_large_width")]
    pub large_width: u32,
    #[serde(default = "default_small_width")]
    pub small_width: u32,
    #[serde(default = "default_large_quality")]
    pub large_quality: f32,
    #[serde(default = "default_small_quality")]
    pub small_quality: f32,
}

// Default value functions
fn default_storage_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("biteboard")
        .join("storage.json")
}
fn default_storage_key() -> String { STORAGE_KEY.to_string() }
fn default_dish_data() -> PathBuf { PathBuf::from("public/dishes.json") }
fn default_raw_dir() -> PathBuf { PathBuf::from("raw-images") }
fn default_out_dir() -> PathBuf { PathBuf::from("public/images") }
fn default_content_dir() -> PathBuf { PathBuf::from("src/content/dishes") }
fn default_large_width() -> u32 { LARGE_WIDTH }
fn default_small_width() -> u32 { SMALL_WIDTH }
fn default_large_quality() -> f32 { LARGE_QUALITY }
fn default_small_quality() -> f32 { SMALL_QUALITY }

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
            key: default_storage_key(),
        }
    }
}

impl Default for DishesConfig {
    fn default() -> Self {
        Self {
            data: default_dish_data(),
        }
    }
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            raw_dir: default_raw_dir(),
            out_dir: default_out_dir(),
            content_dir: default_content_dir(),
            large_width: default_large_width(),
            small_width: default_small_width(),
            large_quality: default_large_quality(),
            small_quality: default_small_quality(),
        }
    }
}

impl ImagesConfig {
    pub fn pipeline_config(&self) -> ImagePipelineConfig {
        ImagePipelineConfig {
            raw_dir: self.raw_dir.clone(),
            out_dir: self.out_dir.clone(),
            content_dir: self.content_dir.clone(),
            large: Variant {
                max_width: self.large_width,
                quality: self.large_quality,
            },
            small: Variant {
                max_width: self.small_width,
                quality: self.small_quality,
            },
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .context("Failed to read config file")?;

        let config: Config = toml::from_str(&content)
            .context("Failed to parse TOML config")?;

        Ok(config)
    }

    /// Load the explicit file if given, else `biteboard.toml` in the working
    /// directory when present, else the defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            debug!(?path, "Loading config from provided path");
            return Self::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()));
        }
        let local = PathBuf::from(DEFAULT_CONFIG_FILE);
        if local.exists() {
            debug!(path = ?local, "Loading config from working directory");
            return Self::load(&local);
        }
        debug!("No config file, using defaults");
        Ok(Self::default())
    }

    /// Save configuration to TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let toml_string = toml::to_string_pretty(self)
            .context("Failed to serialize config to TOML")?;

        std::fs::write(path.as_ref(), toml_string)
            .context("Failed to write config file")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn given_defaults_when_building_then_matches_site_layout() {
        let config = Config::default();

        assert_eq!(config.storage.key, "biteboard-reviews-v1");
        assert!(config.storage.path.ends_with("biteboard/storage.json"));
        assert_eq!(config.images.raw_dir, PathBuf::from("raw-images"));
        assert_eq!(config.images.out_dir, PathBuf::from("public/images"));
        assert_eq!(config.images.large_width, 1200);
        assert_eq!(config.images.small_width, 400);
    }

    #[test]
    fn given_partial_toml_when_loading_then_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("partial.toml");

        let toml_content = r#"
[images]
raw_dir = "photos"
small_width = 320
"#;
        fs::write(&config_path, toml_content).unwrap();

        let config = Config::load(&config_path).unwrap();

        // Specified values
        assert_eq!(config.images.raw_dir, PathBuf::from("photos"));
        assert_eq!(config.images.small_width, 320);
        // Default values
        assert_eq!(config.images.large_width, 1200);
        assert_eq!(config.dishes.data, PathBuf::from("public/dishes.json"));
        assert_eq!(config.storage.key, "biteboard-reviews-v1");
    }

    #[test]
    fn given_config_when_building_pipeline_config_then_carries_variants() {
        let mut config = Config::default();
        config.images.large_quality = 90.0;

        let pipeline = config.images.pipeline_config();

        assert_eq!(pipeline.large.max_width, 1200);
        assert_eq!(pipeline.large.quality, 90.0);
        assert_eq!(pipeline.small.quality, 65.0);
    }

    #[test]
    fn given_nonexistent_explicit_file_when_discovering_then_returns_error() {
        let result = Config::discover(Some(Path::new("/nonexistent/path/biteboard.toml")));

        assert!(result.is_err());
    }

    #[test]
    fn given_round_trip_when_saving_and_loading_then_preserves_values() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("roundtrip.toml");

        let mut original = Config::default();
        original.storage.path = PathBuf::from("/tmp/reviews.json");
        original.dishes.data = PathBuf::from("data/dishes.json");

        original.save(&config_path).unwrap();
        let loaded = Config::load(&config_path).unwrap();

        assert_eq!(loaded, original);
    }
}
