//! Shared test utilities for bezel-frame tests.
//!
//! Provides a [`MockRasterizer`] that tracks raster sizes only and records
//! every call for assertion.

use std::cell::RefCell;

use bezel_render::{Rasterizer, Render};
use bezel_types::error::Result;

/// A recorded rasterizer call.
#[derive(Debug, Clone, PartialEq)]
pub enum RasterCall {
    Import { w: f64, h: f64 },
    Canvas { w: f64, h: f64 },
    Subregion { x: u32, y: u32, w: u32, h: u32 },
    Scale { w: f64, h: f64 },
    Tile { x_count: u32, y_count: u32 },
    Blit { x: f64, y: f64, w: f64, h: f64 },
    Finish,
}

/// A rasterizer whose rasters are just `(width, height)` pairs.
pub struct MockRasterizer {
    calls: RefCell<Vec<RasterCall>>,
}

impl MockRasterizer {
    pub fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
        }
    }

    fn record(&self, call: RasterCall) {
        self.calls.borrow_mut().push(call);
    }

    pub fn calls(&self) -> Vec<RasterCall> {
        self.calls.borrow().clone()
    }

    /// Count calls matching a predicate.
    pub fn count(&self, pred: impl Fn(&RasterCall) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| pred(c)).count()
    }

    /// Target sizes of every `Scale` call, in order.
    pub fn scales(&self) -> Vec<(f64, f64)> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                RasterCall::Scale { w, h } => Some((*w, *h)),
                _ => None,
            })
            .collect()
    }

    /// Repeat counts of every `Tile` call, in order.
    pub fn tiles(&self) -> Vec<(u32, u32)> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                RasterCall::Tile { x_count, y_count } => Some((*x_count, *y_count)),
                _ => None,
            })
            .collect()
    }

    /// Positions of every `Blit` call, in order.
    pub fn blit_positions(&self) -> Vec<(f64, f64)> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                RasterCall::Blit { x, y, .. } => Some((*x, *y)),
                _ => None,
            })
            .collect()
    }
}

impl Rasterizer for MockRasterizer {
    type Raster = (f64, f64);

    fn name(&self) -> &'static str {
        "mock"
    }

    fn import(&self, source: &Render) -> Result<(f64, f64)> {
        let (w, h) = source.size();
        self.record(RasterCall::Import { w, h });
        Ok((w, h))
    }

    fn canvas(&self, width: f64, height: f64) -> Result<(f64, f64)> {
        self.record(RasterCall::Canvas {
            w: width,
            h: height,
        });
        Ok((width, height))
    }

    fn subregion(&self, _raster: &(f64, f64), x: u32, y: u32, w: u32, h: u32) -> Result<(f64, f64)> {
        self.record(RasterCall::Subregion { x, y, w, h });
        Ok((w as f64, h as f64))
    }

    fn scale(&self, _raster: (f64, f64), width: f64, height: f64) -> Result<(f64, f64)> {
        self.record(RasterCall::Scale {
            w: width,
            h: height,
        });
        Ok((width, height))
    }

    fn tile_repeat(&self, raster: &(f64, f64), x_count: u32, y_count: u32) -> Result<(f64, f64)> {
        self.record(RasterCall::Tile { x_count, y_count });
        Ok((raster.0 * x_count as f64, raster.1 * y_count as f64))
    }

    fn blit(&self, _dest: &mut (f64, f64), src: (f64, f64), x: f64, y: f64) -> Result<()> {
        self.record(RasterCall::Blit {
            x,
            y,
            w: src.0,
            h: src.1,
        });
        Ok(())
    }

    fn finish(&self, dest: (f64, f64)) -> Result<Render> {
        self.record(RasterCall::Finish);
        Ok(Render::new(dest.0, dest.1))
    }
}
