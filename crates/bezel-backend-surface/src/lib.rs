//! Surface rasterizer.
//!
//! Implements `Rasterizer` by working on CPU pixels directly. The source
//! render is flattened once on import; every later operation copies,
//! resamples or blits `Surface` buffers. Fractional sizes and offsets are
//! truncated to whole pixels.

use std::sync::Arc;

use bezel_render::{Rasterizer, Render, Surface};
use bezel_types::error::Result;

/// Rasterizer that blits directly into pixel surfaces.
#[derive(Debug, Clone, Copy, Default)]
pub struct SurfaceRasterizer;

impl SurfaceRasterizer {
    pub fn new() -> Self {
        Self
    }
}

/// Truncate a size to whole pixels, treating negatives as zero.
fn whole(v: f64) -> u32 {
    v.max(0.0) as u32
}

impl Rasterizer for SurfaceRasterizer {
    type Raster = Surface;

    fn name(&self) -> &'static str {
        "surface"
    }

    fn import(&self, source: &Render) -> Result<Surface> {
        Ok(source.to_surface())
    }

    fn canvas(&self, width: f64, height: f64) -> Result<Surface> {
        Ok(Surface::new(whole(width), whole(height)))
    }

    fn subregion(&self, raster: &Surface, x: u32, y: u32, w: u32, h: u32) -> Result<Surface> {
        raster.subsurface(x, y, w, h)
    }

    fn scale(&self, raster: Surface, width: f64, height: f64) -> Result<Surface> {
        let (w, h) = (whole(width), whole(height));
        if raster.dimensions() == (w, h) {
            return Ok(raster);
        }
        log::trace!("Resample {:?} -> {w}x{h}", raster.dimensions());
        Ok(raster.scaled(w, h))
    }

    fn tile_repeat(&self, raster: &Surface, x_count: u32, y_count: u32) -> Result<Surface> {
        Ok(raster.tiled(x_count, y_count))
    }

    fn blit(&self, dest: &mut Surface, src: Surface, x: f64, y: f64) -> Result<()> {
        dest.blit(&src, x as i64, y as i64);
        Ok(())
    }

    fn finish(&self, dest: Surface) -> Result<Render> {
        Ok(Render::from_surface(Arc::new(dest)))
    }
}
