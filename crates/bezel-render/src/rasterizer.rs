//! Rasterizer trait definition.
//!
//! The compositors never touch pixels or render nodes directly; every
//! subregion, scale, tile and blit goes through this trait. Two
//! implementations exist: `bezel-backend-texture` composes retained
//! [`Render`] nodes and scales through transforms, `bezel-backend-surface`
//! resamples and blits CPU pixels. The host picks one at its composition root.

use bezel_types::error::Result;

use crate::render::Render;

/// Backend operations used to build one composited raster.
///
/// `Raster` is the backend's working representation. Sizes are `f64` because
/// a destination may be fractional when no tiling is involved; backends that
/// work in whole pixels truncate.
pub trait Rasterizer {
    /// Working representation for rasters in flight.
    type Raster;

    /// Short backend name for logging.
    fn name(&self) -> &'static str;

    /// Turn the image collaborator's output into a working raster.
    fn import(&self, source: &Render) -> Result<Self::Raster>;

    /// Create an empty destination raster.
    fn canvas(&self, width: f64, height: f64) -> Result<Self::Raster>;

    /// Extract the `w x h` region with its top-left at `(x, y)`.
    fn subregion(&self, raster: &Self::Raster, x: u32, y: u32, w: u32, h: u32)
    -> Result<Self::Raster>;

    /// Continuously scale a raster to a new size.
    fn scale(&self, raster: Self::Raster, width: f64, height: f64) -> Result<Self::Raster>;

    /// Repeat a raster `x_count` times across and `y_count` times down.
    fn tile_repeat(&self, raster: &Self::Raster, x_count: u32, y_count: u32)
    -> Result<Self::Raster>;

    /// Place `src` into `dest` with its top-left at `(x, y)`.
    fn blit(&self, dest: &mut Self::Raster, src: Self::Raster, x: f64, y: f64) -> Result<()>;

    /// Hand the finished destination back as a render.
    fn finish(&self, dest: Self::Raster) -> Result<Render>;
}
