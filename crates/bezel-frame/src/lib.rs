//! bezel-frame: nine-slice frames and solid fills.
//!
//! A [`Frame`] resizes an image to any requested size while keeping its
//! border art intact: the image is cut into a 3x3 grid of fixed corners,
//! edges stretched along one axis and a center stretched along both, and
//! each cell is scaled or tiled independently. A [`Solid`] fills an area with
//! one color by presenting a small swatch through a transform.
//!
//! All pixel work goes through a `bezel_render::Rasterizer` chosen by the
//! caller.

pub mod borders;
pub mod decl;
pub mod frame;
pub mod image;
pub mod region;
pub mod solid;
pub mod tile;

#[cfg(test)]
pub(crate) mod test_utils;

pub use borders::{Borders, Insets};
pub use decl::{Declaration, Displayable};
pub use frame::{Frame, FrameConfig, RenderRequest};
pub use image::{ImageHandle, ImageRegistry, ImageSource, SurfaceImage};
pub use region::RegionCompositor;
pub use solid::Solid;
pub use tile::{TileMode, TilePlan, TileStrategy};
