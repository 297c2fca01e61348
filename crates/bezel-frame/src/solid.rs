//! Solid color fills.
//!
//! Large fills are never allocated at full size: a 10x10 swatch is blitted
//! into the render and a forward/reverse transform pair presents it at the
//! requested size.

use std::hash::{Hash, Hasher};

use bezel_render::{Render, Surface};
use bezel_types::color::{Color, parse_hex_color};
use bezel_types::error::{BezelError, Result};
use bezel_types::style::Style;
use kurbo::Affine;

/// Edge length of the swatch used for large fills.
pub const SWATCH_SIZE: u32 = 10;

/// A displayable that fills its whole area with one color.
#[derive(Debug, Clone, Copy)]
pub struct Solid {
    color: Option<Color>,
}

impl Solid {
    /// `None` falls back to the style color at render time.
    pub fn new(color: Option<Color>) -> Self {
        Self { color }
    }

    pub fn from_hex(s: &str) -> Result<Self> {
        parse_hex_color(s)
            .map(|c| Self::new(Some(c)))
            .ok_or_else(|| BezelError::Config(format!("invalid color '{s}'")))
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }

    /// Render at the requested size, raised to the style minimums.
    ///
    /// With no color, or an empty area, the result has no children.
    pub fn render(&self, width: f64, height: f64, style: &Style) -> Render {
        let (width, height) = style.clamp_size(width, height);
        let mut rv = Render::new(width, height);

        let Some(color) = self.color.or_else(|| style.fallback_color()) else {
            return rv;
        };
        if width <= 0.0 || height <= 0.0 {
            return rv;
        }

        let size = SWATCH_SIZE as f64;
        let texture = if width < size || height < size {
            Surface::solid(width.ceil() as u32, height.ceil() as u32, color)
        } else {
            rv.forward = Some(Affine::scale_non_uniform(size / width, size / height));
            rv.reverse = Some(Affine::scale_non_uniform(width / size, height / size));
            Surface::solid(SWATCH_SIZE, SWATCH_SIZE, color)
        };
        log::trace!(
            "Solid {}x{} from {}x{} texture",
            width,
            height,
            texture.width(),
            texture.height()
        );

        rv.blit(texture, 0.0, 0.0);
        rv
    }
}

impl PartialEq for Solid {
    fn eq(&self, other: &Self) -> bool {
        self.color == other.color
    }
}

impl Eq for Solid {}

impl Hash for Solid {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.color.hash(state);
    }
}
