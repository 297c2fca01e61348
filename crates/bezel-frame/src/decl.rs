//! Frame and solid declarations loaded from TOML.
//!
//! ```toml
//! version = 2
//!
//! [style]
//! xminimum = 64.0
//!
//! [frame]
//! image = "panel"
//! left = 6
//! top = 4
//! tile = "integer"
//! tile_ratio = 0.5
//! ```
//!
//! A document declares either a `[frame]` or a `[solid]`. Version 1
//! documents describe frame borders with `xborder`/`yborder` and are upgraded
//! on load.

use std::path::Path;

use bezel_render::{Rasterizer, Render};
use bezel_types::error::{BezelError, Result};
use bezel_types::style::Style;
use serde::Deserialize;

use crate::borders::{Borders, Insets};
use crate::frame::{Frame, FrameConfig, RenderRequest};
use crate::image::ImageRegistry;
use crate::solid::Solid;
use crate::tile::{DEFAULT_TILE_RATIO, TileMode};

/// Declaration format version written by this crate.
pub const CURRENT_VERSION: u32 = 2;

/// A parsed declaration document.
#[derive(Debug, Clone, Deserialize)]
pub struct Declaration {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub style: Style,
    #[serde(default)]
    pub frame: Option<FrameDecl>,
    #[serde(default)]
    pub solid: Option<SolidDecl>,
}

fn default_version() -> u32 {
    CURRENT_VERSION
}

fn default_tile_ratio() -> f64 {
    DEFAULT_TILE_RATIO
}

/// The `[frame]` table.
#[derive(Debug, Clone, Deserialize)]
pub struct FrameDecl {
    pub image: String,
    #[serde(default)]
    pub left: Option<i32>,
    #[serde(default)]
    pub top: Option<i32>,
    #[serde(default)]
    pub right: Option<i32>,
    #[serde(default)]
    pub bottom: Option<i32>,
    /// When present, replaces the four individual insets.
    #[serde(default)]
    pub borders: Option<Borders>,
    #[serde(default)]
    pub xborder: Option<i32>,
    #[serde(default)]
    pub yborder: Option<i32>,
    #[serde(default)]
    pub tile: TileSetting,
    #[serde(default = "default_tile_ratio")]
    pub tile_ratio: f64,
}

/// `tile = false | true | "off" | "on" | "integer"`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TileSetting {
    Flag(bool),
    Named(String),
}

impl Default for TileSetting {
    fn default() -> Self {
        Self::Flag(false)
    }
}

impl TileSetting {
    pub fn mode(&self) -> Result<TileMode> {
        match self {
            Self::Flag(false) => Ok(TileMode::None),
            Self::Flag(true) => Ok(TileMode::Simple),
            Self::Named(name) => match name.as_str() {
                "off" => Ok(TileMode::None),
                "on" => Ok(TileMode::Simple),
                "integer" => Ok(TileMode::Integer),
                other => Err(BezelError::Config(format!("unknown tile mode '{other}'"))),
            },
        }
    }
}

impl FrameDecl {
    /// Resolve the insets. Omitted `left`/`top` fall back to
    /// `xborder`/`yborder`, omitted `right`/`bottom` mirror `left`/`top`.
    pub fn insets(&self) -> Insets {
        if let Some(borders) = &self.borders {
            return borders.insets();
        }
        let left = self.left.or(self.xborder).unwrap_or(0);
        let top = self.top.or(self.yborder).unwrap_or(0);
        Insets::new(
            left,
            top,
            self.right.unwrap_or(left),
            self.bottom.unwrap_or(top),
        )
    }

    /// Version 1 upgrade: both borders of an axis come from the legacy field.
    fn upgrade_legacy(&mut self) {
        let legacy = FrameConfig::from_legacy(self.xborder.unwrap_or(0), self.yborder.unwrap_or(0));
        self.left = Some(legacy.left);
        self.right = Some(legacy.right);
        self.top = Some(legacy.top);
        self.bottom = Some(legacy.bottom);
        self.borders = None;
    }

    pub fn config(&self) -> Result<FrameConfig> {
        let insets = self.insets();
        if [insets.left, insets.top, insets.right, insets.bottom]
            .iter()
            .any(|v| *v < 0)
        {
            return Err(BezelError::Config(format!(
                "frame '{}': negative inset in {insets:?}",
                self.image
            )));
        }
        if !(0.0..=1.0).contains(&self.tile_ratio) {
            return Err(BezelError::Config(format!(
                "frame '{}': tile_ratio {} outside [0, 1]",
                self.image, self.tile_ratio
            )));
        }
        Ok(FrameConfig::default()
            .with_insets(insets)
            .with_tile(self.tile.mode()?)
            .with_tile_ratio(self.tile_ratio))
    }
}

/// The `[solid]` table.
#[derive(Debug, Clone, Deserialize)]
pub struct SolidDecl {
    /// Hex color. When omitted the style color is used.
    #[serde(default)]
    pub color: Option<String>,
}

impl SolidDecl {
    pub fn solid(&self) -> Result<Solid> {
        match &self.color {
            Some(c) => Solid::from_hex(c),
            None => Ok(Solid::new(None)),
        }
    }
}

/// A displayable built from a declaration.
#[derive(Debug, Clone)]
pub enum Displayable {
    Frame(Frame),
    Solid(Solid),
}

impl Displayable {
    pub fn render<R: Rasterizer>(
        &self,
        request: &RenderRequest,
        style: &Style,
        rasterizer: &R,
    ) -> Result<Render> {
        match self {
            Self::Frame(frame) => frame.render(request, style, rasterizer),
            Self::Solid(solid) => Ok(solid.render(request.width, request.height, style)),
        }
    }
}

impl Declaration {
    /// Parse a document, applying any version upgrade.
    pub fn from_toml(src: &str) -> Result<Self> {
        let mut decl: Self = toml::from_str(src)?;
        decl.upgrade()?;
        Ok(decl)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let src = std::fs::read_to_string(path)?;
        Self::from_toml(&src).map_err(|e| match e {
            BezelError::Config(msg) => BezelError::Config(format!("{}: {msg}", path.display())),
            other => other,
        })
    }

    fn upgrade(&mut self) -> Result<()> {
        if self.version > CURRENT_VERSION {
            return Err(BezelError::Config(format!(
                "declaration version {} is newer than {CURRENT_VERSION}",
                self.version
            )));
        }
        if self.version < CURRENT_VERSION {
            if let Some(frame) = &mut self.frame {
                log::warn!(
                    "Upgrading version {} frame '{}' from xborder/yborder",
                    self.version,
                    frame.image
                );
                frame.upgrade_legacy();
            }
            self.version = CURRENT_VERSION;
        }
        Ok(())
    }

    /// Build the declared displayable, resolving images by name.
    pub fn build(&self, images: &ImageRegistry) -> Result<Displayable> {
        match (&self.frame, &self.solid) {
            (Some(frame), None) => {
                let image = images
                    .get(&frame.image)
                    .map_err(|e| BezelError::Config(e.to_string()))?;
                Ok(Displayable::Frame(Frame::new(image, frame.config()?)))
            }
            (None, Some(solid)) => Ok(Displayable::Solid(solid.solid()?)),
            (Some(_), Some(_)) => Err(BezelError::Config(
                "declaration has both [frame] and [solid]".into(),
            )),
            (None, None) => Err(BezelError::Config(
                "declaration has neither [frame] nor [solid]".into(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bezel_render::Surface;
    use bezel_types::color::Color;

    use crate::image::SurfaceImage;
    use crate::test_utils::MockRasterizer;

    fn registry() -> ImageRegistry {
        let mut reg = ImageRegistry::new();
        reg.register(SurfaceImage::new("panel", Surface::solid(16, 16, Color::WHITE)).into_handle());
        reg
    }

    fn frame_config(src: &str) -> FrameConfig {
        let decl = Declaration::from_toml(src).unwrap();
        match decl.build(&registry()).unwrap() {
            Displayable::Frame(f) => *f.config(),
            Displayable::Solid(_) => panic!("expected a frame"),
        }
    }

    #[test]
    fn four_sided_frame() {
        let c = frame_config(
            r#"
            [frame]
            image = "panel"
            left = 1
            top = 2
            right = 3
            bottom = 4
            "#,
        );
        assert_eq!(c.insets(), Insets::new(1, 2, 3, 4));
        assert_eq!(c.tile, TileMode::None);
        assert_eq!(c.tile_ratio, 0.5);
    }

    #[test]
    fn right_and_bottom_mirror() {
        let c = frame_config("[frame]\nimage = \"panel\"\nleft = 6\ntop = 2");
        assert_eq!(c.insets(), Insets::new(6, 2, 6, 2));
    }

    #[test]
    fn borders_table_replaces_insets() {
        let c = frame_config(
            r#"
            [frame]
            image = "panel"
            left = 9
            [frame.borders]
            left = 1
            top = 1
            right = 2
            bottom = 2
            pad_left = -1
            "#,
        );
        assert_eq!(c.insets(), Insets::new(1, 1, 2, 2));
    }

    #[test]
    fn legacy_borders_upgrade() {
        let src = "version = 1\n[frame]\nimage = \"panel\"\nxborder = 5\nyborder = 3";
        let decl = Declaration::from_toml(src).unwrap();
        assert_eq!(decl.version, CURRENT_VERSION);
        let f = decl.frame.as_ref().unwrap();
        assert_eq!((f.left, f.right, f.top, f.bottom), (Some(5), Some(5), Some(3), Some(3)));
        assert_eq!(f.config().unwrap().insets(), Insets::new(5, 3, 5, 3));
    }

    #[test]
    fn legacy_upgrade_overrides_new_fields() {
        let src = "version = 1\n[frame]\nimage = \"panel\"\nleft = 9\nxborder = 2";
        let c = Declaration::from_toml(src).unwrap().frame.unwrap().config().unwrap();
        assert_eq!(c.insets(), Insets::new(2, 0, 2, 0));
    }

    #[test]
    fn tile_settings() {
        let base = "[frame]\nimage = \"panel\"\n";
        assert_eq!(frame_config(&format!("{base}tile = true")).tile, TileMode::Simple);
        assert_eq!(frame_config(&format!("{base}tile = false")).tile, TileMode::None);
        assert_eq!(frame_config(&format!("{base}tile = \"on\"")).tile, TileMode::Simple);
        let c = frame_config(&format!("{base}tile = \"integer\"\ntile_ratio = 0.25"));
        assert_eq!(c.tile, TileMode::Integer);
        assert_eq!(c.tile_ratio, 0.25);
    }

    #[test]
    fn unknown_tile_mode_rejected() {
        let decl = Declaration::from_toml("[frame]\nimage = \"panel\"\ntile = \"mirror\"").unwrap();
        let err = decl.build(&registry()).unwrap_err();
        assert!(format!("{err}").contains("unknown tile mode 'mirror'"));
    }

    #[test]
    fn bad_ratio_rejected() {
        let decl =
            Declaration::from_toml("[frame]\nimage = \"panel\"\ntile_ratio = 1.5").unwrap();
        assert!(matches!(decl.build(&registry()), Err(BezelError::Config(_))));
    }

    #[test]
    fn negative_inset_rejected() {
        let decl = Declaration::from_toml("[frame]\nimage = \"panel\"\nleft = -2").unwrap();
        let err = decl.build(&registry()).unwrap_err();
        assert!(format!("{err}").contains("negative inset"));
    }

    #[test]
    fn unknown_image_is_config_error() {
        let decl = Declaration::from_toml("[frame]\nimage = \"nope\"").unwrap();
        assert!(matches!(decl.build(&registry()), Err(BezelError::Config(_))));
    }

    #[test]
    fn newer_version_rejected() {
        let err = Declaration::from_toml("version = 3\n[solid]\ncolor = \"#fff\"").unwrap_err();
        assert!(matches!(err, BezelError::Config(_)));
    }

    #[test]
    fn malformed_toml() {
        let err = Declaration::from_toml("[frame\nimage = ").unwrap_err();
        assert!(matches!(err, BezelError::TomlParse(_)));
    }

    #[test]
    fn frame_and_solid_are_exclusive() {
        let both = "[frame]\nimage = \"panel\"\n[solid]\ncolor = \"#000\"";
        assert!(Declaration::from_toml(both).unwrap().build(&registry()).is_err());
        assert!(Declaration::from_toml("").unwrap().build(&registry()).is_err());
    }

    #[test]
    fn solid_with_style() {
        let decl = Declaration::from_toml(
            r##"
            [style]
            xminimum = 20.0
            color = "#00ff00"

            [solid]
            "##,
        )
        .unwrap();
        let shown = decl.build(&registry()).unwrap();
        assert!(matches!(shown, Displayable::Solid(_)));
        let r = shown
            .render(&RenderRequest::new(5.0, 12.0), &decl.style, &MockRasterizer::new())
            .unwrap();
        assert_eq!(r.size(), (20.0, 12.0));
        assert_eq!(r.to_surface().pixel(19, 11), Some(Color::rgb(0, 255, 0)));
    }

    #[test]
    fn from_file_reports_missing_path() {
        let err = Declaration::from_file(Path::new("/nonexistent/bezel.toml")).unwrap_err();
        assert!(matches!(err, BezelError::Io(_)));
    }
}
