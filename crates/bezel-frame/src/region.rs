//! Nine-slice grid geometry and per-cell composition.
//!
//! Cells are described with signed offsets: a non-negative start (or a
//! positive end) is measured from the near edge, a negative start (or a
//! non-positive end) from the far edge, with `0` as an end meaning "the far
//! edge itself". The same cell description therefore resolves correctly
//! against both the source and the destination, whatever their sizes.
//!
//! Cell geometry is laid out on the whole-pixel part of the destination, so
//! every cell lands on pixel boundaries and both rasterizers agree. A
//! fractional remainder stays in the size of the returned render only.

use bezel_render::{Rasterizer, Render};
use bezel_types::error::Result;

use crate::borders::Insets;
use crate::tile::{TileStrategy, resolve_tiles};

/// Border widths after clamping, valid in both source and destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClampedBorders {
    pub left: i64,
    pub top: i64,
    pub right: i64,
    pub bottom: i64,
}

/// Clamp one axis: the combined border may not exceed the requested total,
/// the source extent minus 2 (so a center slice survives), or the
/// destination extent. The result is split in proportion to the request.
pub fn clamp_axis(near: i32, far: i32, source: i64, dest: f64) -> (i64, i64) {
    let total = near as i64 + far as i64;
    let dest = if dest.is_finite() { dest.floor() as i64 } else { 0 };
    let limit = total.min(source - 2).min(dest);
    if limit <= 0 || total <= 0 {
        return (0, 0);
    }
    let near = (near as i64 * limit).div_euclid(total);
    (near, limit - near)
}

/// Clamp all four insets against the source and destination sizes.
pub fn clamp_borders(insets: Insets, source: (i64, i64), dest: (f64, f64)) -> ClampedBorders {
    let (left, right) = clamp_axis(insets.left, insets.right, source.0, dest.0);
    let (top, bottom) = clamp_axis(insets.top, insets.bottom, source.1, dest.1);
    ClampedBorders {
        left,
        top,
        right,
        bottom,
    }
}

/// One grid cell in signed-offset form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub x0: i64,
    pub x1: i64,
    pub y0: i64,
    pub y1: i64,
}

impl Cell {
    const fn new(x0: i64, x1: i64, y0: i64, y1: i64) -> Self {
        Self { x0, x1, y0, y1 }
    }

    /// Resolve against concrete sizes. Returns `None` for cells that are
    /// empty in either space or fall outside the source.
    pub fn resolve(&self, source: (i64, i64), dest: (f64, f64)) -> Option<CellRects> {
        let (sx0, dx0) = start(self.x0, source.0, dest.0);
        let (sx1, dx1) = end(self.x1, source.0, dest.0);
        let (sy0, dy0) = start(self.y0, source.1, dest.1);
        let (sy1, dy1) = end(self.y1, source.1, dest.1);

        let (sw, sh) = (sx1 - sx0, sy1 - sy0);
        let (dw, dh) = (dx1 - dx0, dy1 - dy0);
        if sw <= 0 || sh <= 0 || dw <= 0.0 || dh <= 0.0 {
            return None;
        }
        if sx0 < 0 || sy0 < 0 || sx1 > source.0 || sy1 > source.1 {
            return None;
        }
        Some(CellRects {
            src: SourceRect {
                x: sx0 as u32,
                y: sy0 as u32,
                w: sw as u32,
                h: sh as u32,
            },
            dst: DestRect {
                x: dx0,
                y: dy0,
                w: dw,
                h: dh,
            },
        })
    }
}

fn start(offset: i64, source: i64, dest: f64) -> (i64, f64) {
    if offset >= 0 {
        (offset, offset as f64)
    } else {
        (source + offset, dest + offset as f64)
    }
}

fn end(offset: i64, source: i64, dest: f64) -> (i64, f64) {
    if offset > 0 {
        (offset, offset as f64)
    } else {
        (source + offset, dest + offset as f64)
    }
}

/// Whole-pixel source rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

/// Destination rectangle; fractional when the destination is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DestRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

/// A cell resolved in both spaces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellRects {
    pub src: SourceRect,
    pub dst: DestRect,
}

/// Enumerate grid cells row by row, left to right, skipping border rows and
/// columns of zero width. The center is always present.
pub fn grid_cells(b: &ClampedBorders) -> Vec<Cell> {
    let (left, top, right, bottom) = (b.left, b.top, b.right, b.bottom);
    let mut cells = Vec::with_capacity(9);

    let mut row = |y0: i64, y1: i64| {
        if left != 0 {
            cells.push(Cell::new(0, left, y0, y1));
        }
        cells.push(Cell::new(left, -right, y0, y1));
        if right != 0 {
            cells.push(Cell::new(-right, 0, y0, y1));
        }
    };

    if top != 0 {
        row(0, top);
    }
    row(top, -bottom);
    if bottom != 0 {
        row(-bottom, 0);
    }
    cells
}

/// Composites one nine-slice destination from one source.
#[derive(Debug, Clone, Copy)]
pub struct RegionCompositor {
    source_size: (i64, i64),
    dest_size: (f64, f64),
    borders: ClampedBorders,
    tile: Option<TileStrategy>,
}

impl RegionCompositor {
    /// `borders` must already be clamped (see [`clamp_borders`]); they are
    /// used unchanged in both source and destination space.
    pub fn new(
        source_size: (i64, i64),
        dest_size: (f64, f64),
        borders: ClampedBorders,
        tile: Option<TileStrategy>,
    ) -> Self {
        Self {
            source_size,
            dest_size,
            borders,
            tile,
        }
    }

    /// The non-empty cells, resolved against the whole-pixel destination,
    /// in composition order.
    pub fn cells(&self) -> Vec<CellRects> {
        let dest = (whole(self.dest_size.0), whole(self.dest_size.1));
        grid_cells(&self.borders)
            .iter()
            .filter_map(|cell| {
                let rects = cell.resolve(self.source_size, dest);
                if rects.is_none() {
                    log::trace!("Skipping empty cell {cell:?}");
                }
                rects
            })
            .collect()
    }

    /// Build the destination. The result depends on `source`.
    pub fn composite<R: Rasterizer>(&self, source: &Render, rasterizer: &R) -> Result<Render> {
        let src = rasterizer.import(source)?;
        let mut dest = rasterizer.canvas(self.dest_size.0, self.dest_size.1)?;

        for rects in self.cells() {
            let s = rects.src;
            let piece = rasterizer.subregion(&src, s.x, s.y, s.w, s.h)?;
            let piece = self.fit(rasterizer, piece, &rects)?;
            log::trace!(
                "Cell {}x{}+{}+{} -> {}x{}+{}+{}",
                s.w,
                s.h,
                s.x,
                s.y,
                rects.dst.w,
                rects.dst.h,
                rects.dst.x,
                rects.dst.y
            );
            rasterizer.blit(&mut dest, piece, rects.dst.x, rects.dst.y)?;
        }

        let mut rv = rasterizer.finish(dest)?;
        if rv.size() != self.dest_size {
            // Whole-pixel backends lose the fraction; restore the full size.
            let mut sized = Render::new(self.dest_size.0, self.dest_size.1);
            sized.blit(rv, 0.0, 0.0);
            rv = sized;
        }
        rv.depends_on(source);
        Ok(rv)
    }

    /// Resize one extracted cell to its destination size. Tiling, when
    /// enabled, runs before any scale.
    fn fit<R: Rasterizer>(
        &self,
        rasterizer: &R,
        piece: R::Raster,
        rects: &CellRects,
    ) -> Result<R::Raster> {
        let (dw, dh) = (rects.dst.w, rects.dst.h);
        if rects.src.w as f64 == dw && rects.src.h as f64 == dh {
            return Ok(piece);
        }

        let Some(strategy) = self.tile else {
            return rasterizer.scale(piece, dw, dh);
        };

        let (tw, th) = (dw as u32, dh as u32);
        let x = resolve_tiles(rects.src.w, tw, strategy);
        let y = resolve_tiles(rects.src.h, th, strategy);
        let block = rasterizer.tile_repeat(&piece, x.count, y.count)?;
        let block = if strategy.crops() {
            rasterizer.subregion(&block, 0, 0, x.extent, y.extent)?
        } else {
            block
        };

        if x.needs_scale(tw) || y.needs_scale(th) {
            rasterizer.scale(block, dw, dh)
        } else {
            Ok(block)
        }
    }
}

/// Whole-pixel part of a destination extent.
fn whole(v: f64) -> f64 {
    if v.is_finite() { v.max(0.0).floor() } else { 0.0 }
}
