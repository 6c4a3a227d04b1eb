//! In-memory RGB565 framebuffer
//!
//! [`Canvas565`] is the reference [`Framebuffer`]: a row-major `u16` buffer
//! that either clips out-of-range writes or wraps them around the edges,
//! the way a scrolling panel does.

use crate::{
    color::Rgb565,
    error::{LcdTextError, Result},
    traits::Framebuffer,
};

/// Edge behaviour for out-of-range coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CanvasOptions {
    /// Wrap x modulo the width instead of clipping
    pub wrap_h: bool,
    /// Wrap y modulo the height instead of clipping
    pub wrap_v: bool,
}

impl CanvasOptions {
    pub const CLIP: Self = Self {
        wrap_h: false,
        wrap_v: false,
    };

    pub const WRAP: Self = Self {
        wrap_h: true,
        wrap_v: true,
    };
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas565 {
    width: u32,
    height: u32,
    pixels: Vec<u16>,
    options: CanvasOptions,
    frames: u64,
}

impl Canvas565 {
    /// A black canvas
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb565::BLACK.raw(); width as usize * height as usize],
            options: CanvasOptions::default(),
            frames: 0,
        }
    }

    /// Adopt an existing pixel buffer
    pub fn from_buffer(pixels: Vec<u16>, width: u32, height: u32) -> Result<Self> {
        let needed = width as usize * height as usize;
        if pixels.len() < needed {
            return Err(LcdTextError::BufferTooSmall {
                needed,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
            options: CanvasOptions::default(),
            frames: 0,
        })
    }

    pub fn with_options(mut self, options: CanvasOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> CanvasOptions {
        self.options
    }

    pub fn fill(&mut self, color: Rgb565) {
        self.pixels.fill(color.raw());
    }

    /// Row-major pixels
    pub fn pixels(&self) -> &[u16] {
        &self.pixels
    }

    /// Times [`Framebuffer::present`] has been called
    pub fn frames_presented(&self) -> u64 {
        self.frames
    }

    fn locate(&self, x: i32, y: i32) -> Option<usize> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        let x = if self.options.wrap_h {
            x.rem_euclid(self.width as i32)
        } else {
            x
        };
        let y = if self.options.wrap_v {
            y.rem_euclid(self.height as i32)
        } else {
            y
        };

        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }
}

impl Framebuffer for Canvas565 {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: Rgb565) {
        if let Some(i) = self.locate(x, y) {
            self.pixels[i] = color.raw();
        }
    }

    fn fill_area(&mut self, x: i32, y: i32, width: u32, height: u32, color: Rgb565) {
        if self.options.wrap_h || self.options.wrap_v {
            for dy in 0..height as i32 {
                for dx in 0..width as i32 {
                    self.set_pixel(x + dx, y + dy, color);
                }
            }
            return;
        }

        let x0 = x.max(0) as i64;
        let y0 = y.max(0) as i64;
        let x1 = (x as i64 + width as i64).min(self.width as i64);
        let y1 = (y as i64 + height as i64).min(self.height as i64);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let stride = self.width as usize;
        for row in y0 as usize..y1 as usize {
            self.pixels[row * stride + x0 as usize..row * stride + x1 as usize].fill(color.raw());
        }
    }

    fn get_pixel(&self, x: i32, y: i32) -> Option<Rgb565> {
        self.locate(x, y).map(|i| Rgb565(self.pixels[i]))
    }

    fn present(&mut self) -> Result<()> {
        self.frames += 1;
        Ok(())
    }
}
