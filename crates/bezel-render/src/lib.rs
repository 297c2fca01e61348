//! bezel-render: the raster types the compositors work with.
//!
//! A [`Surface`] is a CPU-side RGBA pixel buffer. A [`Render`] is a retained
//! tree of surfaces and nested renders, each blitted at an offset and
//! optionally presented through a forward/reverse transform pair. Both
//! rasterization backends implement [`Rasterizer`] and hand their result back
//! as a `Render`.

pub mod rasterizer;
pub mod render;
pub mod surface;

pub use rasterizer::Rasterizer;
pub use render::{Child, Render, RenderId};
pub use surface::Surface;
