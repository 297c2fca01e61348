//! CPU-side RGBA pixel buffer.
//!
//! Pixels are stored row-major, four bytes per pixel, straight alpha. All
//! drawing goes through bounds-checked helpers; writes outside the surface
//! are dropped.

use bezel_types::color::{Color, blend_over};
use bezel_types::error::{BezelError, Result};

/// An owned RGBA pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    buffer: Vec<u8>,
}

impl Surface {
    /// Create a fully transparent surface.
    pub fn new(width: u32, height: u32) -> Self {
        let size = width as usize * height as usize * 4;
        Self {
            width,
            height,
            buffer: vec![0; size],
        }
    }

    /// Create a surface filled with a single color.
    pub fn solid(width: u32, height: u32, color: Color) -> Self {
        let mut surface = Self::new(width, height);
        surface.fill(color);
        surface
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Surface dimensions.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Whether the surface has no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Read-only view of the RGBA bytes.
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// Read a pixel, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let o = self.offset(x, y);
        Some(Color::rgba(
            self.buffer[o],
            self.buffer[o + 1],
            self.buffer[o + 2],
            self.buffer[o + 3],
        ))
    }

    /// Overwrite a pixel. Out-of-bounds writes are ignored.
    pub fn put_pixel(&mut self, x: u32, y: u32, color: Color) {
        if x >= self.width || y >= self.height {
            return;
        }
        let o = self.offset(x, y);
        self.buffer[o..o + 4].copy_from_slice(&color.to_array());
    }

    /// Composite a pixel over the existing one. Performs bounds checking.
    pub fn blend_pixel(&mut self, x: i64, y: i64, color: Color) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let (ux, uy) = (x as u32, y as u32);
        if color.a == 255 {
            self.put_pixel(ux, uy, color);
        } else if color.a > 0 {
            let dst = self.pixel(ux, uy).unwrap_or_default();
            self.put_pixel(ux, uy, blend_over(dst, color));
        }
    }

    /// Overwrite every pixel with `color`.
    pub fn fill(&mut self, color: Color) {
        let bytes = color.to_array();
        for pixel in self.buffer.chunks_exact_mut(4) {
            pixel.copy_from_slice(&bytes);
        }
    }

    /// Copy out a rectangular region.
    ///
    /// The region must lie entirely inside the surface.
    pub fn subsurface(&self, x: u32, y: u32, w: u32, h: u32) -> Result<Self> {
        if x as u64 + w as u64 > self.width as u64 || y as u64 + h as u64 > self.height as u64 {
            return Err(BezelError::Backend(format!(
                "subsurface ({x},{y},{w},{h}) outside {}x{} surface",
                self.width, self.height
            )));
        }
        let mut out = Self::new(w, h);
        let row_bytes = w as usize * 4;
        for row in 0..h {
            let src = self.offset(x, y + row);
            let dst = out.offset(0, row);
            out.buffer[dst..dst + row_bytes].copy_from_slice(&self.buffer[src..src + row_bytes]);
        }
        Ok(out)
    }

    /// Composite `src` over this surface with its top-left at `(x, y)`.
    pub fn blit(&mut self, src: &Self, x: i64, y: i64) {
        for sy in 0..src.height {
            for sx in 0..src.width {
                if let Some(color) = src.pixel(sx, sy) {
                    self.blend_pixel(x + sx as i64, y + sy as i64, color);
                }
            }
        }
    }

    /// Resample to a new size using nearest-neighbor sampling.
    ///
    /// Destination pixel `d` reads source pixel `d * src / dst`, so an
    /// integer upscale replicates each source pixel exactly.
    pub fn scaled(&self, width: u32, height: u32) -> Self {
        let mut out = Self::new(width, height);
        if self.is_empty() {
            return out;
        }
        for dy in 0..height {
            let sy = (dy as u64 * self.height as u64 / height as u64) as u32;
            for dx in 0..width {
                let sx = (dx as u64 * self.width as u64 / width as u64) as u32;
                if let Some(color) = self.pixel(sx, sy) {
                    out.put_pixel(dx, dy, color);
                }
            }
        }
        out
    }

    /// Repeat this surface `x_count` times across and `y_count` times down.
    pub fn tiled(&self, x_count: u32, y_count: u32) -> Self {
        let mut out = Self::new(self.width * x_count, self.height * y_count);
        for ty in 0..y_count {
            for tx in 0..x_count {
                out.blit(
                    self,
                    (tx * self.width) as i64,
                    (ty * self.height) as i64,
                );
            }
        }
        out
    }
}
