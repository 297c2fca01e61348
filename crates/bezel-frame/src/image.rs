//! The image collaborator a frame wraps.
//!
//! A frame does not load or cache images. It asks its [`ImageSource`] for a
//! render at the requested size once per call and works with whatever size
//! comes back.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use bezel_render::{Render, Surface};
use bezel_types::error::{BezelError, Result};

/// Shared handle to an image source.
pub type ImageHandle = Arc<dyn ImageSource>;

/// Something that can render itself at a requested size.
pub trait ImageSource: fmt::Debug + Send + Sync {
    /// Name identifying this image. This is the equality key: the registry
    /// stores one image per identity, and frames over two sources with the
    /// same identity compare equal. Sources with different pixels must use
    /// different identities.
    fn identity(&self) -> &str;

    /// Render at (or near) the requested size. The returned render's size is
    /// authoritative. `st` and `at` are timing values passed through
    /// unchanged.
    fn render_at(&self, width: f64, height: f64, st: f64, at: f64) -> Result<Render>;

    /// Whether [`ImageSource::duplicate`] may return a fresh instance.
    fn duplicatable(&self) -> bool {
        false
    }

    /// Return a fresh, independently parameterized instance, or `None` when
    /// this image can be shared as is.
    fn duplicate(&self, _args: &[String]) -> Result<Option<ImageHandle>> {
        Ok(None)
    }

    /// Called when the owner becomes this instance's only user.
    fn make_unique(&self) {}
}

/// An image backed by a fixed pixel surface.
#[derive(Debug, Clone)]
pub struct SurfaceImage {
    name: String,
    surface: Arc<Surface>,
}

impl SurfaceImage {
    pub fn new(name: impl Into<String>, surface: Surface) -> Self {
        Self {
            name: name.into(),
            surface: Arc::new(surface),
        }
    }

    pub fn into_handle(self) -> ImageHandle {
        Arc::new(self)
    }
}

impl ImageSource for SurfaceImage {
    fn identity(&self) -> &str {
        &self.name
    }

    fn render_at(&self, _width: f64, _height: f64, _st: f64, _at: f64) -> Result<Render> {
        Ok(Render::from_surface(Arc::clone(&self.surface)))
    }
}

/// Named images available to declarations.
#[derive(Debug, Default)]
pub struct ImageRegistry {
    images: HashMap<String, ImageHandle>,
}

impl ImageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an image under its identity, replacing any previous one.
    pub fn register(&mut self, image: ImageHandle) {
        let name = image.identity().to_string();
        if self.images.insert(name.clone(), image).is_some() {
            log::debug!("Replaced image '{name}'");
        }
    }

    pub fn get(&self, name: &str) -> Result<ImageHandle> {
        self.images
            .get(name)
            .map(Arc::clone)
            .ok_or_else(|| BezelError::Image(format!("unknown image '{name}'")))
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}
