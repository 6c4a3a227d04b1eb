//! Bresenham lines with straight-run batching
//!
//! The classic integer algorithm walks the major axis one pixel at a time.
//! Consecutive pixels that share a minor coordinate form a straight span,
//! and each span is handed to the framebuffer in one call.

use lcdtext_core::{traits::Framebuffer, Point, Rgb565};

/// How a line reaches the framebuffer
#[derive(Debug, Clone, Copy)]
pub struct Pen {
    pub color: Rgb565,
    pub opacity: u8,
    /// Send spans as `fill_area` instead of single pixels
    pub coalesce: bool,
}

/// Draw a 1-pixel line including both endpoints
pub fn draw_line(target: &mut dyn Framebuffer, from: Point, to: Point, pen: &Pen) {
    let (mut x0, mut y0, mut x1, mut y1) = (from.x, from.y, to.x, to.y);

    let steep = (y1 - y0).abs() > (x1 - x0).abs();
    if steep {
        std::mem::swap(&mut x0, &mut y0);
        std::mem::swap(&mut x1, &mut y1);
    }
    if x0 > x1 {
        std::mem::swap(&mut x0, &mut x1);
        std::mem::swap(&mut y0, &mut y1);
    }

    let dx = x1 - x0;
    let dy = (y1 - y0).abs();
    let ystep = if y0 < y1 { 1 } else { -1 };
    let mut err = dx / 2;
    let mut start = x0;
    let mut len = 0u32;

    // In steep mode the axes are swapped, so a span runs vertically
    let mut flush = |target: &mut dyn Framebuffer, start: i32, minor: i32, len: u32| {
        if steep {
            span(target, minor, start, 1, len, pen);
        } else {
            span(target, start, minor, len, 1, pen);
        }
    };

    for x in x0..=x1 {
        len += 1;
        err -= dy;
        if err < 0 {
            err += dx;
            flush(target, start, y0, len);
            len = 0;
            y0 += ystep;
            start = x + 1;
        }
    }
    if len > 0 {
        flush(target, start, y0, len);
    }
}

fn span(target: &mut dyn Framebuffer, x: i32, y: i32, width: u32, height: u32, pen: &Pen) {
    if pen.opacity < 255 {
        for dy in 0..height as i32 {
            for dx in 0..width as i32 {
                if let Some(existing) = target.get_pixel(x + dx, y + dy) {
                    target.set_pixel(x + dx, y + dy, Rgb565::blend(pen.color, existing, pen.opacity));
                }
            }
        }
    } else if pen.coalesce && width * height > 1 {
        target.fill_area(x, y, width, height, pen.color);
    } else {
        for dy in 0..height as i32 {
            for dx in 0..width as i32 {
                target.set_pixel(x + dx, y + dy, pen.color);
            }
        }
    }
}
