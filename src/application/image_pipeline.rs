// src/application/image_pipeline.rs
use crate::constants::{
    PLACEHOLDER_HEIGHT, PLACEHOLDER_LARGE_QUALITY, PLACEHOLDER_SMALL_QUALITY, PLACEHOLDER_WIDTH,
    SMALL_SUFFIX,
};
use anyhow::{Context, Result};
use image::DynamicImage;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};
use walkdir::WalkDir;

use crate::util::fs::markdown_files;

lazy_static! {
    // Match the front matter image identifier: image: dishes/ramen
    static ref IMAGE_FIELD_REGEX: Regex = Regex::new(r"\nimage:[ \t]*([^\n]+)")
        .expect("Failed to compile image field regex");
}

const RAW_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Output size bound and encoder quality for one resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Variant {
    pub max_width: u32,
    pub quality: f32,
}

pub trait ImageCodec {
    /// Decode a raw image with its orientation applied.
    fn decode(&self, source: &Path) -> Result<DynamicImage>;

    /// Rasterize a text placeholder of the given size.
    fn placeholder(&self, label: &str, width: u32, height: u32) -> Result<DynamicImage>;

    /// Shrink to `variant.max_width` (never enlarge) and write WebP to `target`.
    fn write_webp(&self, image: &DynamicImage, target: &Path, variant: Variant) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImagePipelineConfig {
    pub raw_dir: PathBuf,
    pub out_dir: PathBuf,
    pub content_dir: PathBuf,
    pub large: Variant,
    pub small: Variant,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PipelineReport {
    pub raw_found: usize,
    pub encoded: usize,
    pub skipped: usize,
    pub placeholders: usize,
}

pub struct ImagePipeline<C: ImageCodec> {
    codec: C,
    config: ImagePipelineConfig,
    force: bool,
}

impl<C: ImageCodec> ImagePipeline<C> {
    pub fn new(codec: C, config: ImagePipelineConfig) -> Self {
        Self {
            codec,
            config,
            force: false,
        }
    }

    /// Re-encode raw images even when both outputs already exist.
    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Run both passes. The first failing image aborts the run.
    pub fn run(&self) -> Result<PipelineReport> {
        let mut report = PipelineReport::default();
        self.process_raw_images(&mut report)?;
        self.process_placeholders(&mut report)?;
        info!("Processed {} raw image(s).", report.raw_found);
        Ok(report)
    }

    fn process_raw_images(&self, report: &mut PipelineReport) -> Result<()> {
        for source in raw_images(&self.config.raw_dir)? {
            report.raw_found += 1;
            let relative = source
                .strip_prefix(&self.config.raw_dir)
                .with_context(|| format!("{} is outside the raw directory", source.display()))?;
            let large = self.config.out_dir.join(relative).with_extension("webp");
            let small = small_variant_path(&large);

            if !self.force && large.exists() && small.exists() {
                debug!(?source, "Outputs present, skipping");
                report.skipped += 1;
                continue;
            }

            self.encode_raw(&source, &large, &small)
                .with_context(|| format!("Failed to process {}", source.display()))?;
            report.encoded += 1;
        }
        Ok(())
    }

    #[instrument(level = "debug", skip(self))]
    fn encode_raw(&self, source: &Path, large: &Path, small: &Path) -> Result<()> {
        ensure_parent(large)?;
        let image = self.codec.decode(source)?;
        self.codec.write_webp(&image, large, self.config.large)?;
        self.codec.write_webp(&image, small, self.config.small)?;
        Ok(())
    }

    fn process_placeholders(&self, report: &mut PipelineReport) -> Result<()> {
        for document in markdown_files(&self.config.content_dir)? {
            let source = std::fs::read_to_string(&document)
                .with_context(|| format!("Failed to read {}", document.display()))?;
            let Some(image_name) = image_identifier(&source) else {
                continue;
            };

            let large = self.config.out_dir.join(format!("{image_name}.webp"));
            if large.exists() {
                continue;
            }
            let small = self
                .config
                .out_dir
                .join(format!("{image_name}{SMALL_SUFFIX}.webp"));

            self.write_placeholder(&image_name, &large, &small)
                .with_context(|| format!("Failed to create placeholder for {image_name}"))?;
            report.placeholders += 1;
        }
        Ok(())
    }

    #[instrument(level = "debug", skip(self))]
    fn write_placeholder(&self, label: &str, large: &Path, small: &Path) -> Result<()> {
        ensure_parent(large)?;
        let image = self
            .codec
            .placeholder(label, PLACEHOLDER_WIDTH, PLACEHOLDER_HEIGHT)?;
        self.codec.write_webp(
            &image,
            large,
            Variant {
                max_width: PLACEHOLDER_WIDTH,
                quality: PLACEHOLDER_LARGE_QUALITY,
            },
        )?;
        self.codec.write_webp(
            &image,
            small,
            Variant {
                max_width: self.config.small.max_width,
                quality: PLACEHOLDER_SMALL_QUALITY,
            },
        )?;
        Ok(())
    }
}

/// Every jpg/jpeg/png (any case) under `dir`, in a stable order. A missing
/// directory has no images; any other walk error is returned.
pub fn raw_images(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        debug!(?dir, "No raw image directory");
        return Ok(Vec::new());
    }
    let mut images = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry =
            entry.with_context(|| format!("Failed to scan raw images in {}", dir.display()))?;
        let path = entry.path();
        let supported = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| RAW_EXTENSIONS.contains(&ext.to_lowercase().as_str()));
        if entry.file_type().is_file() && supported {
            images.push(entry.into_path());
        }
    }
    Ok(images)
}

/// `photo.webp` -> `photo-small.webp`, same directory.
pub fn small_variant_path(large: &Path) -> PathBuf {
    let stem = large
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    large.with_file_name(format!("{stem}{SMALL_SUFFIX}.webp"))
}

/// The `image:` value of a content document with quotes removed.
pub fn image_identifier(source: &str) -> Option<String> {
    let raw = IMAGE_FIELD_REGEX.captures(source)?.get(1)?.as_str();
    let name: String = raw.trim().chars().filter(|c| *c != '"' && *c != '\'').collect();
    (!name.is_empty()).then_some(name)
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    Ok(())
}
