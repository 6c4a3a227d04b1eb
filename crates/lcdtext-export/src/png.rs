//! PNG export via the `image` crate

use crate::{region_rgb8, Exporter, Region};
use image::ImageEncoder;
use lcdtext_core::{
    error::{ExportError, Result},
    traits::Framebuffer,
};

/// Encode 8-bit RGB pixels as a PNG
pub fn encode_rgb8(rgb: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
    let expected = width as usize * height as usize * 3;
    if rgb.len() != expected {
        return Err(ExportError::EncodingFailed(format!(
            "Expected {} bytes for {}x{} RGB, got {}",
            expected,
            width,
            height,
            rgb.len()
        ))
        .into());
    }

    let mut png_data = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new_with_quality(
        &mut png_data,
        image::codecs::png::CompressionType::Default,
        image::codecs::png::FilterType::Sub,
    );
    encoder
        .write_image(rgb, width, height, image::ExtendedColorType::Rgb8)
        .map_err(|e| ExportError::EncodingFailed(format!("PNG encoding failed: {}", e)))?;

    Ok(png_data)
}

/// Truecolor PNG exporter
#[derive(Debug, Clone, Copy, Default)]
pub struct PngExporter;

impl PngExporter {
    pub fn new() -> Self {
        Self
    }
}

impl Exporter for PngExporter {
    fn name(&self) -> &'static str {
        "png"
    }

    fn export(&self, target: &dyn Framebuffer, region: Region) -> Result<Vec<u8>> {
        let rgb = region_rgb8(target, region)?;
        encode_rgb8(&rgb, region.width, region.height)
    }

    fn extension(&self) -> &'static str {
        "png"
    }

    fn mime_type(&self) -> &'static str {
        "image/png"
    }
}
