//! Frame: an image resized by nine-slice composition.

use std::fmt;

use bezel_render::{Rasterizer, Render};
use bezel_types::error::Result;
use bezel_types::style::Style;

use crate::borders::{Borders, Insets};
use crate::image::ImageHandle;
use crate::region::{RegionCompositor, clamp_borders};
use crate::tile::{DEFAULT_TILE_RATIO, TileMode, TileStrategy};

/// Construction-time frame parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameConfig {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub tile: TileMode,
    /// Leftover fraction threshold for [`TileMode::Integer`].
    pub tile_ratio: f64,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            left: 0,
            top: 0,
            right: 0,
            bottom: 0,
            tile: TileMode::None,
            tile_ratio: DEFAULT_TILE_RATIO,
        }
    }
}

impl FrameConfig {
    /// Symmetric borders: `right` mirrors `left` and `bottom` mirrors `top`.
    pub fn new(left: i32, top: i32) -> Self {
        Self::default().with_insets(Insets::new(left, top, left, top))
    }

    pub fn with_insets(mut self, insets: Insets) -> Self {
        self.left = insets.left;
        self.top = insets.top;
        self.right = insets.right;
        self.bottom = insets.bottom;
        self
    }

    /// Take the insets from a [`Borders`]; its padding is not used here.
    pub fn from_borders(borders: &Borders) -> Self {
        Self::default().with_insets(borders.insets())
    }

    /// Upgrade the two-field layout of version 1 declarations.
    pub fn from_legacy(xborder: i32, yborder: i32) -> Self {
        Self::new(xborder, yborder)
    }

    pub fn with_tile(mut self, tile: TileMode) -> Self {
        self.tile = tile;
        self
    }

    pub fn with_tile_ratio(mut self, ratio: f64) -> Self {
        self.tile_ratio = ratio;
        self
    }

    pub fn insets(&self) -> Insets {
        Insets::new(self.left, self.top, self.right, self.bottom)
    }

    pub fn tile_strategy(&self) -> Option<TileStrategy> {
        self.tile.strategy(self.tile_ratio)
    }
}

/// One render call's parameters. `st` and `at` are forwarded untouched to
/// the wrapped image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderRequest {
    pub width: f64,
    pub height: f64,
    pub st: f64,
    pub at: f64,
}

impl RenderRequest {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            st: 0.0,
            at: 0.0,
        }
    }

    pub fn with_times(mut self, st: f64, at: f64) -> Self {
        self.st = st;
        self.at = at;
        self
    }
}

/// An image resized with fixed corners, stretched or tiled edges and a
/// stretched or tiled center.
#[derive(Debug, Clone)]
pub struct Frame {
    image: ImageHandle,
    config: FrameConfig,
    duplicatable: bool,
}

impl Frame {
    pub fn new(image: ImageHandle, config: FrameConfig) -> Self {
        let duplicatable = image.duplicatable();
        Self {
            image,
            config,
            duplicatable,
        }
    }

    pub fn image(&self) -> &ImageHandle {
        &self.image
    }

    pub fn config(&self) -> &FrameConfig {
        &self.config
    }

    pub fn is_duplicatable(&self) -> bool {
        self.duplicatable
    }

    /// Render at the requested size.
    ///
    /// The image is asked for the minimum-clamped size but its own size is
    /// authoritative. With tiling enabled the destination is truncated to
    /// whole pixels; otherwise it may stay fractional.
    pub fn render<R: Rasterizer>(
        &self,
        request: &RenderRequest,
        style: &Style,
        rasterizer: &R,
    ) -> Result<Render> {
        let (width, height) = style.clamp_size(request.width, request.height);
        let source = self
            .image
            .render_at(width, height, request.st, request.at)?;
        let (sw, sh) = source.size();
        let source_size = (sw as i64, sh as i64);

        let strategy = self.config.tile_strategy();
        let (dw, dh) = if strategy.is_some() {
            (width.trunc(), height.trunc())
        } else {
            (width, height)
        };
        let dest_size = (dw.max(0.0), dh.max(0.0));

        let borders = clamp_borders(self.config.insets(), source_size, dest_size);
        log::debug!(
            "Frame '{}' {}x{} -> {}x{} borders {:?} tile {} via {}",
            self.image.identity(),
            source_size.0,
            source_size.1,
            dest_size.0,
            dest_size.1,
            borders,
            self.config.tile,
            rasterizer.name()
        );

        RegionCompositor::new(source_size, dest_size, borders, strategy)
            .composite(&source, rasterizer)
    }

    /// Instantiate with parameters. When the image yields a fresh instance,
    /// the result wraps it and can no longer be duplicated; otherwise this
    /// frame is returned as is.
    pub fn duplicate(&self, args: &[String]) -> Result<Self> {
        match self.image.duplicate(args)? {
            Some(image) => {
                image.make_unique();
                Ok(Self {
                    image,
                    config: self.config,
                    duplicatable: false,
                })
            }
            None => Ok(self.clone()),
        }
    }

    /// Mark this frame as the only user of its image.
    pub fn make_unique(&mut self) {
        self.image.make_unique();
        self.duplicatable = false;
    }
}

/// Frames are equal when their configs match and their images share an
/// identity. Pixels are never compared; see [`ImageSource::identity`].
///
/// [`ImageSource::identity`]: crate::image::ImageSource::identity
impl PartialEq for Frame {
    fn eq(&self, other: &Self) -> bool {
        self.config == other.config && self.image.identity() == other.image.identity()
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = &self.config;
        write!(
            f,
            "<Frame '{}' ({},{},{},{})",
            self.image.identity(),
            c.left,
            c.top,
            c.right,
            c.bottom
        )?;
        match c.tile {
            TileMode::None => {}
            TileMode::Simple => write!(f, " tile")?,
            TileMode::Integer => write!(f, " tile ({})", c.tile_ratio)?,
        }
        write!(f, ">")
    }
}
