//! Framebuffer snapshots
//!
//! Exporters read a rectangle back out of any [`Framebuffer`] and encode it
//! as an image file. The region must lie entirely inside the framebuffer.

use lcdtext_core::{
    error::{ExportError, Result},
    traits::Framebuffer,
    Rgb565,
};
use std::io::Write;
use std::path::Path;

pub mod png;

pub use png::PngExporter;

/// A rectangle of the framebuffer, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The whole of `target`
    pub fn full(target: &dyn Framebuffer) -> Self {
        Self::new(0, 0, target.width(), target.height())
    }

    /// Fail unless the region lies inside `target`
    pub fn check(&self, target: &dyn Framebuffer) -> Result<()> {
        let right = self.x.checked_add(self.width);
        let bottom = self.y.checked_add(self.height);
        let inside = matches!(right, Some(r) if r <= target.width())
            && matches!(bottom, Some(b) if b <= target.height());
        if inside {
            Ok(())
        } else {
            Err(ExportError::RegionOutOfBounds {
                x: self.x,
                y: self.y,
                width: self.width,
                height: self.height,
                canvas_width: target.width(),
                canvas_height: target.height(),
            }
            .into())
        }
    }
}

/// Encodes a framebuffer region
pub trait Exporter {
    fn name(&self) -> &'static str;

    /// Encode `region` of `target`
    fn export(&self, target: &dyn Framebuffer, region: Region) -> Result<Vec<u8>>;

    fn extension(&self) -> &'static str;

    fn mime_type(&self) -> &'static str;
}

/// Region pixels expanded to 8-bit RGB, row-major
///
/// Pixels the framebuffer cannot read back come out black.
pub fn region_rgb8(target: &dyn Framebuffer, region: Region) -> Result<Vec<u8>> {
    region.check(target)?;

    let mut rgb = Vec::with_capacity(region.width as usize * region.height as usize * 3);
    for y in region.y..region.y + region.height {
        for x in region.x..region.x + region.width {
            let pixel = target.get_pixel(x as i32, y as i32).unwrap_or(Rgb565::BLACK);
            rgb.extend_from_slice(&pixel.to_rgb8());
        }
    }
    Ok(rgb)
}

/// Export `region` and write it to `path`, returning the file size
pub fn write_file(
    exporter: &dyn Exporter,
    target: &dyn Framebuffer,
    region: Region,
    path: impl AsRef<Path>,
) -> Result<usize> {
    let bytes = exporter.export(target, region)?;
    std::fs::write(path.as_ref(), &bytes)?;
    log::debug!(
        "Wrote {} {}x{} region to {} ({} bytes)",
        exporter.name(),
        region.width,
        region.height,
        path.as_ref().display(),
        bytes.len()
    );
    Ok(bytes.len())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PnmFormat {
    /// PGM - Portable Graymap
    Pgm,
    /// PPM - Portable Pixmap (color)
    Ppm,
}

/// ASCII PNM exporter
#[derive(Debug, Clone, Copy)]
pub struct PnmExporter {
    format: PnmFormat,
}

impl PnmExporter {
    pub fn new(format: PnmFormat) -> Self {
        Self { format }
    }

    /// Color, `P3`
    pub fn ppm() -> Self {
        Self::new(PnmFormat::Ppm)
    }

    /// Grayscale by luminance, `P2`
    pub fn pgm() -> Self {
        Self::new(PnmFormat::Pgm)
    }
}

impl Default for PnmExporter {
    fn default() -> Self {
        Self::ppm()
    }
}

impl Exporter for PnmExporter {
    fn name(&self) -> &'static str {
        match self.format {
            PnmFormat::Pgm => "pgm",
            PnmFormat::Ppm => "ppm",
        }
    }

    fn export(&self, target: &dyn Framebuffer, region: Region) -> Result<Vec<u8>> {
        let rgb = region_rgb8(target, region)?;
        let mut output = Vec::new();

        let magic = match self.format {
            PnmFormat::Pgm => "P2",
            PnmFormat::Ppm => "P3",
        };
        writeln!(&mut output, "{}", magic)?;
        writeln!(&mut output, "{} {}", region.width, region.height)?;
        writeln!(&mut output, "255")?;

        let row_len = region.width as usize * 3;
        if row_len > 0 {
            for row in rgb.chunks_exact(row_len) {
                for px in row.chunks_exact(3) {
                    match self.format {
                        PnmFormat::Ppm => write!(&mut output, "{} {} {} ", px[0], px[1], px[2])?,
                        PnmFormat::Pgm => {
                            let (r, g, b) = (px[0] as u32, px[1] as u32, px[2] as u32);
                            write!(&mut output, "{} ", (r * 299 + g * 587 + b * 114) / 1000)?
                        },
                    }
                }
                writeln!(&mut output)?;
            }
        }
        Ok(output)
    }

    fn extension(&self) -> &'static str {
        self.name()
    }

    fn mime_type(&self) -> &'static str {
        match self.format {
            PnmFormat::Pgm => "image/x-portable-graymap",
            PnmFormat::Ppm => "image/x-portable-pixmap",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lcdtext_core::{Canvas565, LcdTextError};

    fn checker() -> Canvas565 {
        let mut canvas = Canvas565::new(3, 2);
        canvas.set_pixel(0, 0, Rgb565::RED);
        canvas.set_pixel(1, 0, Rgb565::WHITE);
        canvas.set_pixel(2, 1, Rgb565::BLUE);
        canvas
    }

    #[test]
    fn test_ppm_export() {
        let canvas = checker();
        let out = PnmExporter::ppm()
            .export(&canvas, Region::new(0, 0, 2, 1))
            .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "P3\n2 1\n255\n255 0 0 255 255 255 \n"
        );
    }

    #[test]
    fn test_pgm_export() {
        let canvas = checker();
        let out = PnmExporter::pgm().export(&canvas, Region::full(&canvas)).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("P2\n3 2\n255\n"));
        assert!(text.contains("76 255 0"));
    }

    #[test]
    fn test_region_outside_rejected() {
        let canvas = checker();
        let err = PnmExporter::ppm()
            .export(&canvas, Region::new(2, 0, 2, 1))
            .unwrap_err();
        assert!(matches!(
            err,
            LcdTextError::Export(ExportError::RegionOutOfBounds { x: 2, width: 2, canvas_width: 3, .. })
        ));
    }

    #[test]
    fn test_region_overflow_rejected() {
        let canvas = checker();
        assert!(Region::new(u32::MAX, 0, 2, 1).check(&canvas).is_err());
    }

    #[test]
    fn test_names() {
        assert_eq!(PnmExporter::default().name(), "ppm");
        assert_eq!(PnmExporter::pgm().extension(), "pgm");
        assert_eq!(PnmExporter::ppm().mime_type(), "image/x-portable-pixmap");
    }
}
