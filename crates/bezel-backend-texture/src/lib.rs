//! Texture rasterizer.
//!
//! Implements `Rasterizer` without touching pixels: subregions are clipped
//! render nodes with the source blitted at a negative offset, tiles are
//! repeated blits of the same shared child, and scaling attaches a
//! forward/reverse transform pair. The host draws (or flattens) the
//! resulting tree once.

use std::sync::Arc;

use bezel_render::{Rasterizer, Render};
use bezel_types::error::Result;
use kurbo::Affine;

/// Rasterizer that builds a retained `Render` tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextureRasterizer;

impl TextureRasterizer {
    pub fn new() -> Self {
        Self
    }
}

impl Rasterizer for TextureRasterizer {
    type Raster = Render;

    fn name(&self) -> &'static str {
        "texture"
    }

    fn import(&self, source: &Render) -> Result<Render> {
        Ok(source.clone())
    }

    fn canvas(&self, width: f64, height: f64) -> Result<Render> {
        Ok(Render::new(width, height))
    }

    fn subregion(&self, raster: &Render, x: u32, y: u32, w: u32, h: u32) -> Result<Render> {
        let mut rv = Render::new(w as f64, h as f64);
        rv.set_clipping();
        rv.blit(raster.clone(), -(x as f64), -(y as f64));
        Ok(rv)
    }

    fn scale(&self, raster: Render, width: f64, height: f64) -> Result<Render> {
        let (rw, rh) = raster.size();
        log::trace!("Transform scale {rw}x{rh} -> {width}x{height}");
        let mut rv = Render::new(width, height);
        rv.set_transform(Affine::scale_non_uniform(rw / width, rh / height));
        rv.blit(raster, 0.0, 0.0);
        Ok(rv)
    }

    fn tile_repeat(&self, raster: &Render, x_count: u32, y_count: u32) -> Result<Render> {
        let (tw, th) = raster.size();
        let mut rv = Render::new(tw * x_count as f64, th * y_count as f64);
        rv.set_clipping();
        // One shared child, blitted many times.
        let tile = Arc::new(raster.clone());
        for x in 0..x_count {
            for y in 0..y_count {
                rv.blit(Arc::clone(&tile), x as f64 * tw, y as f64 * th);
            }
        }
        Ok(rv)
    }

    fn blit(&self, dest: &mut Render, src: Render, x: f64, y: f64) -> Result<()> {
        dest.blit(src, x, y);
        Ok(())
    }

    fn finish(&self, dest: Render) -> Result<Render> {
        Ok(dest)
    }
}
