// src/infrastructure/image_codec.rs
use crate::application::image_pipeline::{ImageCodec, Variant};
use crate::constants::{PLACEHOLDER_BACKGROUND, PLACEHOLDER_FONT_SIZE, PLACEHOLDER_FOREGROUND};
use crate::domain::DomainError;
use anyhow::{Context, Result};
use html_escape::encode_text;
use image::imageops::FilterType;
use image::metadata::Orientation;
use image::{DynamicImage, ImageDecoder, ImageReader, RgbaImage};
use resvg::{tiny_skia, usvg};
use std::path::Path;
use tracing::{debug, instrument};

/// Decodes with the `image` crate, rasterizes placeholders with `resvg` and
/// encodes lossy WebP through libwebp.
pub struct WebpCodec {
    svg_options: usvg::Options<'static>,
}

impl WebpCodec {
    pub fn new() -> Self {
        let mut svg_options = usvg::Options::default();
        svg_options.fontdb_mut().load_system_fonts();
        debug!(faces = svg_options.fontdb.len(), "Loaded system fonts");
        Self { svg_options }
    }
}

impl Default for WebpCodec {
    fn default() -> Self {
        Self::new()
    }
}

/// SVG source of a placeholder: dark canvas, label centered.
pub fn placeholder_svg(label: &str, width: u32, height: u32) -> String {
    format!(
        "<svg xmlns='http://www.w3.org/2000/svg' width='{width}' height='{height}'>\
<rect width='100%' height='100%' fill='{PLACEHOLDER_BACKGROUND}'/>\
<text x='50%' y='50%' dominant-baseline='middle' text-anchor='middle' \
font-size='{PLACEHOLDER_FONT_SIZE}' font-family='Arial' fill='{PLACEHOLDER_FOREGROUND}'>{}</text></svg>",
        encode_text(label)
    )
}

impl ImageCodec for WebpCodec {
    #[instrument(level = "debug", skip(self))]
    fn decode(&self, source: &Path) -> Result<DynamicImage> {
        let mut decoder = ImageReader::open(source)
            .with_context(|| format!("Failed to open {}", source.display()))?
            .with_guessed_format()
            .context("Failed to detect image format")?
            .into_decoder()
            .context("Unsupported image format")?;
        let orientation = decoder.orientation().unwrap_or(Orientation::NoTransforms);
        let mut image = DynamicImage::from_decoder(decoder).context("Failed to decode image")?;
        image.apply_orientation(orientation);
        Ok(image)
    }

    #[instrument(level = "debug", skip(self))]
    fn placeholder(&self, label: &str, width: u32, height: u32) -> Result<DynamicImage> {
        let svg = placeholder_svg(label, width, height);
        let tree = usvg::Tree::from_str(&svg, &self.svg_options)
            .map_err(|e| DomainError::Image(format!("Invalid placeholder SVG: {e}")))?;
        let mut pixmap = tiny_skia::Pixmap::new(width, height)
            .ok_or_else(|| DomainError::Image(format!("Invalid canvas {width}x{height}")))?;
        resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

        // The canvas is fully opaque, so premultiplied and straight alpha agree
        let rgba = RgbaImage::from_raw(width, height, pixmap.take())
            .ok_or_else(|| DomainError::Image("Pixmap size mismatch".to_string()))?;
        Ok(DynamicImage::ImageRgba8(rgba))
    }

    #[instrument(level = "debug", skip(self, image), fields(width = image.width()))]
    fn write_webp(&self, image: &DynamicImage, target: &Path, variant: Variant) -> Result<()> {
        let resized = if image.width() > variant.max_width {
            image.resize(variant.max_width, u32::MAX, FilterType::Lanczos3)
        } else {
            image.clone()
        };
        let rgba = DynamicImage::ImageRgba8(resized.to_rgba8());
        let encoder = webp::Encoder::from_image(&rgba)
            .map_err(|e| DomainError::Image(format!("Cannot encode WebP: {e}")))?;
        let encoded = encoder.encode(variant.quality);

        std::fs::write(target, &*encoded)
            .with_context(|| format!("Failed to write {}", target.display()))?;
        debug!(?target, bytes = encoded.len(), "Wrote WebP");
        Ok(())
    }
}
