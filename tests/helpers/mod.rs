use anyhow::{Context, Result};
use biteboard::infrastructure::{Config, FileKeyValueStore, LocalStorageRepository};
use biteboard::application::ReviewStore;
use image::{Rgba, RgbaImage};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test fixture for a throwaway biteboard site: storage file, dish data,
/// raw images and content documents all under one temp directory.
#[allow(dead_code)]
pub struct TestSite {
    _temp_dir: TempDir,
    pub root: PathBuf,
    pub config: Config,
}

#[allow(dead_code)]
impl TestSite {
    pub fn new() -> Result<Self> {
        let temp_dir = tempfile::tempdir().context("Failed to create temporary directory")?;
        let root = temp_dir.path().to_path_buf();

        let mut config = Config::default();
        config.storage.path = root.join("storage.json");
        config.dishes.data = root.join("public/dishes.json");
        config.images.raw_dir = root.join("raw-images");
        config.images.out_dir = root.join("public/images");
        config.images.content_dir = root.join("src/content/dishes");

        Ok(Self {
            _temp_dir: temp_dir,
            root,
            config,
        })
    }

    pub fn open_store(&self) -> ReviewStore<LocalStorageRepository<FileKeyValueStore>> {
        biteboard::open_store(&self.config)
    }

    /// Write a solid-color PNG under the raw image directory.
    pub fn add_raw_png(&self, relative: &str, width: u32, height: u32) -> Result<PathBuf> {
        let path = self.config.images.raw_dir.join(relative);
        ensure_parent(&path)?;
        RgbaImage::from_pixel(width, height, Rgba([180, 90, 30, 255]))
            .save(&path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    pub fn add_content(&self, file_name: &str, source: &str) -> Result<PathBuf> {
        let path = self.config.images.content_dir.join(file_name);
        ensure_parent(&path)?;
        std::fs::write(&path, source)?;
        Ok(path)
    }

    pub fn write_dish_data(&self, json: &str) -> Result<PathBuf> {
        let path = self.config.dishes.data.clone();
        ensure_parent(&path)?;
        std::fs::write(&path, json)?;
        Ok(path)
    }

    pub fn output(&self, relative: &str) -> PathBuf {
        self.config.images.out_dir.join(relative)
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Content document with the given image identifier.
#[allow(dead_code)]
pub fn content_document(name: &str, image: &str) -> String {
    format!(
        "---\nname: {name}\nrestaurant: Corner Spot\nrating: 4.5\ndate: 2026-03-01\ntags:\n  - noodles\nimage: {image}\nlocations:\n  - \"37.77,-122.42\"\n---\nA bowl worth the line.\n"
    )
}
