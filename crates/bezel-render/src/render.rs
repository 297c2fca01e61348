//! Retained render trees.
//!
//! A [`Render`] records what should be drawn rather than drawing it: a list
//! of children (surfaces or nested renders) blitted at offsets, plus an
//! optional `forward` matrix that maps the render's coordinates into its
//! children's. This is what lets a 10x10 swatch stand in for a 500x500 fill,
//! and lets a texture backend scale a cell without touching its pixels.
//! [`Render::to_surface`] flattens the tree when pixels are needed.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use kurbo::{Affine, Point, Rect, Vec2};

use crate::surface::Surface;

/// Slack applied when converting sampled coordinates to pixel indices, so
/// that `3 * (10 / 15)` lands on pixel 2 and not 1.
const SAMPLE_EPSILON: f64 = 1e-6;

static NEXT_RENDER_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a render, used for dependency tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderId(pub u64);

impl RenderId {
    fn next() -> Self {
        Self(NEXT_RENDER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Something that can be blitted into a render.
#[derive(Debug, Clone)]
pub enum Child {
    Texture(Arc<Surface>),
    Render(Arc<Render>),
}

impl Child {
    /// Size in the child's own coordinates.
    pub fn size(&self) -> (f64, f64) {
        match self {
            Self::Texture(s) => (s.width() as f64, s.height() as f64),
            Self::Render(r) => r.size(),
        }
    }
}

impl From<Surface> for Child {
    fn from(surface: Surface) -> Self {
        Self::Texture(Arc::new(surface))
    }
}

impl From<Arc<Surface>> for Child {
    fn from(surface: Arc<Surface>) -> Self {
        Self::Texture(surface)
    }
}

impl From<Render> for Child {
    fn from(render: Render) -> Self {
        Self::Render(Arc::new(render))
    }
}

impl From<Arc<Render>> for Child {
    fn from(render: Arc<Render>) -> Self {
        Self::Render(render)
    }
}

/// A child placed at an offset inside a render.
#[derive(Debug, Clone)]
pub struct Placement {
    pub child: Child,
    pub x: f64,
    pub y: f64,
}

/// A retained render node.
#[derive(Debug, Clone)]
pub struct Render {
    id: RenderId,
    width: f64,
    height: f64,
    children: Vec<Placement>,
    /// Maps this render's coordinates to its children's.
    pub forward: Option<Affine>,
    /// Inverse of `forward`.
    pub reverse: Option<Affine>,
    /// Whether children are clipped to `0..width`.
    pub xclipping: bool,
    /// Whether children are clipped to `0..height`.
    pub yclipping: bool,
    dependencies: Vec<RenderId>,
}

impl Render {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            id: RenderId::next(),
            width,
            height,
            children: Vec::new(),
            forward: None,
            reverse: None,
            xclipping: false,
            yclipping: false,
            dependencies: Vec::new(),
        }
    }

    /// A render of the surface's size showing exactly that surface.
    pub fn from_surface(surface: impl Into<Arc<Surface>>) -> Self {
        let surface = surface.into();
        let mut rv = Self::new(surface.width() as f64, surface.height() as f64);
        rv.blit(surface, 0.0, 0.0);
        rv
    }

    pub fn id(&self) -> RenderId {
        self.id
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Place a child with its top-left at `(x, y)`, in post-`forward`
    /// coordinates.
    pub fn blit(&mut self, child: impl Into<Child>, x: f64, y: f64) {
        self.children.push(Placement {
            child: child.into(),
            x,
            y,
        });
    }

    pub fn children(&self) -> &[Placement] {
        &self.children
    }

    /// Set `forward` and derive `reverse` from it.
    ///
    /// A singular matrix leaves `reverse` unset and is never sampled.
    pub fn set_transform(&mut self, forward: Affine) {
        self.reverse = invert(forward);
        if self.reverse.is_none() {
            log::warn!("Singular transform {forward:?} on {}x{} render", self.width, self.height);
        }
        self.forward = Some(forward);
    }

    /// Enable clipping on both axes.
    pub fn set_clipping(&mut self) {
        self.xclipping = true;
        self.yclipping = true;
    }

    /// Record that this render was computed from `other`.
    pub fn depends_on(&mut self, other: &Render) {
        if !self.dependencies.contains(&other.id) {
            self.dependencies.push(other.id);
        }
    }

    pub fn dependencies(&self) -> &[RenderId] {
        &self.dependencies
    }

    /// Flatten the tree into pixels.
    ///
    /// The output is `width x height` truncated to whole pixels. Each output
    /// pixel samples the point at its top-left corner, mapped through every
    /// `forward` on the way down, with nearest-neighbor lookup in textures
    /// and source-over blending between children.
    pub fn to_surface(&self) -> Surface {
        let w = self.width.max(0.0) as u32;
        let h = self.height.max(0.0) as u32;
        let mut out = Surface::new(w, h);
        let clip = PixelRect {
            x0: 0,
            y0: 0,
            x1: w as i64,
            y1: h as i64,
        };
        self.composite_into(&mut out, Affine::IDENTITY, clip);
        out
    }

    fn composite_into(&self, target: &mut Surface, to_local: Affine, mut clip: PixelRect) {
        if self.xclipping || self.yclipping {
            let Some(bounds) = preimage(to_local, self.width, self.height) else {
                return;
            };
            if self.xclipping {
                clip.x0 = clip.x0.max(bounds.x0);
                clip.x1 = clip.x1.min(bounds.x1);
            }
            if self.yclipping {
                clip.y0 = clip.y0.max(bounds.y0);
                clip.y1 = clip.y1.min(bounds.y1);
            }
            if clip.is_empty() {
                return;
            }
        }

        let to_children = match self.forward {
            Some(forward) => forward * to_local,
            None => to_local,
        };

        for placement in &self.children {
            let to_child = to_children.then_translate(Vec2::new(-placement.x, -placement.y));
            match &placement.child {
                Child::Texture(surface) => {
                    let (cw, ch) = (surface.width() as f64, surface.height() as f64);
                    let Some(region) = preimage(to_child, cw, ch) else {
                        continue;
                    };
                    let region = region.intersect(&clip);
                    if !region.is_empty() {
                        draw_texture(target, surface, to_child, &region);
                    }
                }
                Child::Render(render) => render.composite_into(target, to_child, clip),
            }
        }
    }
}

fn draw_texture(target: &mut Surface, surface: &Surface, to_child: Affine, region: &PixelRect) {
    for py in region.y0..region.y1 {
        for px in region.x0..region.x1 {
            let local = to_child * Point::new(px as f64, py as f64);
            let sx = (local.x + SAMPLE_EPSILON).floor();
            let sy = (local.y + SAMPLE_EPSILON).floor();
            if sx < 0.0 || sy < 0.0 {
                continue;
            }
            if let Some(color) = surface.pixel(sx as u32, sy as u32) {
                target.blend_pixel(px, py, color);
            }
        }
    }
}

/// Half-open pixel rectangle in target coordinates.
#[derive(Debug, Clone, Copy)]
struct PixelRect {
    x0: i64,
    y0: i64,
    x1: i64,
    y1: i64,
}

impl PixelRect {
    fn is_empty(&self) -> bool {
        self.x1 <= self.x0 || self.y1 <= self.y0
    }

    fn intersect(&self, other: &Self) -> Self {
        Self {
            x0: self.x0.max(other.x0),
            y0: self.y0.max(other.y0),
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
        }
    }
}

/// Inverse of `a`, or `None` when it is singular.
fn invert(a: Affine) -> Option<Affine> {
    if a.determinant() == 0.0 {
        return None;
    }
    let inv = a.inverse();
    inv.is_finite().then_some(inv)
}

/// Target pixels whose point, mapped by `to_local`, falls inside
/// `0..w x 0..h`.
fn preimage(to_local: Affine, w: f64, h: f64) -> Option<PixelRect> {
    let bounds = invert(to_local)?.transform_rect_bbox(Rect::new(0.0, 0.0, w, h));
    let edge = |v: f64| (v - SAMPLE_EPSILON).ceil() as i64;
    Some(PixelRect {
        x0: edge(bounds.x0),
        y0: edge(bounds.y0),
        x1: edge(bounds.x1),
        y1: edge(bounds.y1),
    })
}
