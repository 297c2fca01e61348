//! Render a bezel declaration to a PNG.
//!
//! Usage:
//!   bezel-frame-render <declaration.toml> [--size WxH] [--backend texture|surface] [--output out.png]
//!   BEZEL_BACKEND=surface bezel-frame-render decls/panel.toml
//!
//! Frames reference images by name; the built-in `panel` image is a 24x24
//! bordered panel with distinct corners.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, bail};
use bezel_backend_surface::SurfaceRasterizer;
use bezel_backend_texture::TextureRasterizer;
use bezel_frame::{Declaration, ImageRegistry, RenderRequest, SurfaceImage};
use bezel_render::{Render, Surface};
use bezel_types::color::Color;

// ---------------------------------------------------------------------------
// CLI parsing
// ---------------------------------------------------------------------------

/// Which rasterizer the composition root hands to the compositors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Backend {
    Texture,
    Surface,
}

impl FromStr for Backend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "texture" => Ok(Self::Texture),
            "surface" => Ok(Self::Surface),
            other => bail!("unknown backend '{other}' (expected texture or surface)"),
        }
    }
}

struct Args {
    declaration: PathBuf,
    width: f64,
    height: f64,
    backend: Backend,
    output: PathBuf,
}

const USAGE: &str =
    "Usage: bezel-frame-render <declaration.toml> [--size WxH] [--backend texture|surface] [--output out.png]";

fn parse_size(s: &str) -> anyhow::Result<(f64, f64)> {
    let (w, h) = s
        .split_once('x')
        .with_context(|| format!("size '{s}' is not WxH"))?;
    let w: f64 = w.parse().with_context(|| format!("bad width '{w}'"))?;
    let h: f64 = h.parse().with_context(|| format!("bad height '{h}'"))?;
    if w < 0.0 || h < 0.0 {
        bail!("size '{s}' is negative");
    }
    Ok((w, h))
}

fn parse_args(args: impl IntoIterator<Item = String>, env_backend: Option<String>) -> anyhow::Result<Args> {
    let mut declaration = None;
    let mut size = (240.0, 160.0);
    let mut backend = env_backend.as_deref().map(Backend::from_str).transpose()?;
    let mut output = None;

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--size" => size = parse_size(&iter.next().context("--size needs a value")?)?,
            "--backend" => {
                backend = Some(iter.next().context("--backend needs a value")?.parse()?);
            }
            "--output" => output = Some(PathBuf::from(iter.next().context("--output needs a value")?)),
            flag if flag.starts_with("--") => bail!("unknown argument: {flag}\n{USAGE}"),
            path => {
                if declaration.replace(PathBuf::from(path)).is_some() {
                    bail!("more than one declaration given\n{USAGE}");
                }
            }
        }
    }

    let declaration = declaration.with_context(|| USAGE.to_string())?;
    let output = output.unwrap_or_else(|| declaration.with_extension("png"));
    Ok(Args {
        declaration,
        width: size.0,
        height: size.1,
        backend: backend.unwrap_or(Backend::Texture),
        output,
    })
}

// ---------------------------------------------------------------------------
// Built-in images
// ---------------------------------------------------------------------------

/// A 24x24 panel: 2px dark outline, 4px bevel, flat center, and a marker
/// pixel in each corner so stretched output shows whether corners survive.
fn panel_surface() -> Surface {
    const SIZE: u32 = 24;
    let outline = Color::rgb(20, 24, 32);
    let bevel = Color::rgb(90, 110, 140);
    let center = Color::rgb(200, 208, 220);
    let marker = Color::rgb(230, 80, 40);

    let mut s = Surface::solid(SIZE, SIZE, center);
    for y in 0..SIZE {
        for x in 0..SIZE {
            let edge = x.min(y).min(SIZE - 1 - x).min(SIZE - 1 - y);
            if edge < 2 {
                s.put_pixel(x, y, outline);
            } else if edge < 6 {
                s.put_pixel(x, y, bevel);
            }
        }
    }
    for (x, y) in [(3, 3), (SIZE - 4, 3), (3, SIZE - 4), (SIZE - 4, SIZE - 4)] {
        s.put_pixel(x, y, marker);
    }
    s
}

fn builtin_images() -> ImageRegistry {
    let mut images = ImageRegistry::new();
    images.register(SurfaceImage::new("panel", panel_surface()).into_handle());
    log::debug!("Registered {} built-in image(s)", images.len());
    images
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

fn save_png(path: &Path, width: u32, height: u32, rgba: &[u8]) -> anyhow::Result<()> {
    let file = fs::File::create(path)?;
    let writer = std::io::BufWriter::new(file);
    let mut encoder = png::Encoder::new(writer, width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(rgba)?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args(std::env::args().skip(1), std::env::var("BEZEL_BACKEND").ok())?;
    let decl = Declaration::from_file(&args.declaration)
        .with_context(|| format!("loading {}", args.declaration.display()))?;
    let shown = decl.build(&builtin_images())?;
    let request = RenderRequest::new(args.width, args.height);

    let render: Render = match args.backend {
        Backend::Texture => shown.render(&request, &decl.style, &TextureRasterizer::new())?,
        Backend::Surface => shown.render(&request, &decl.style, &SurfaceRasterizer::new())?,
    };

    let surface = render.to_surface();
    if surface.is_empty() {
        bail!("nothing to write: {}x{} render is empty", args.width, args.height);
    }
    let (w, h) = surface.dimensions();
    save_png(&args.output, w, h, surface.buffer())?;
    log::info!(
        "Wrote {w}x{h} {:?} render to {}",
        args.backend,
        args.output.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults() {
        let a = parse_args(args(&["decls/panel.toml"]), None).unwrap();
        assert_eq!(a.declaration, PathBuf::from("decls/panel.toml"));
        assert_eq!(a.output, PathBuf::from("decls/panel.png"));
        assert_eq!((a.width, a.height), (240.0, 160.0));
        assert_eq!(a.backend, Backend::Texture);
    }

    #[test]
    fn flags_override_env() {
        let a = parse_args(
            args(&["d.toml", "--backend", "texture", "--size", "99.5x40", "--output", "o.png"]),
            Some("surface".into()),
        )
        .unwrap();
        assert_eq!(a.backend, Backend::Texture);
        assert_eq!((a.width, a.height), (99.5, 40.0));
        assert_eq!(a.output, PathBuf::from("o.png"));
    }

    #[test]
    fn env_selects_backend() {
        let a = parse_args(args(&["d.toml"]), Some("surface".into())).unwrap();
        assert_eq!(a.backend, Backend::Surface);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_args(args(&[]), None).is_err());
        assert!(parse_args(args(&["d.toml", "--backend", "gpu"]), None).is_err());
        assert!(parse_args(args(&["d.toml", "--size", "10"]), None).is_err());
        assert!(parse_args(args(&["d.toml", "--size", "-1x5"]), None).is_err());
        assert!(parse_args(args(&["d.toml", "--wat"]), None).is_err());
        assert!(parse_args(args(&["a.toml", "b.toml"]), None).is_err());
    }

    #[test]
    fn panel_has_corner_markers() {
        let s = panel_surface();
        assert_eq!(s.dimensions(), (24, 24));
        assert_eq!(s.pixel(0, 0), Some(Color::rgb(20, 24, 32)));
        assert_eq!(s.pixel(3, 3), Some(Color::rgb(230, 80, 40)));
        assert_eq!(s.pixel(12, 12), Some(Color::rgb(200, 208, 220)));
    }

    #[test]
    fn bundled_declarations_render_on_both_backends() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("decls");
        for name in ["panel.toml", "legacy.toml", "solid.toml"] {
            let decl = Declaration::from_file(&dir.join(name)).unwrap();
            let shown = decl.build(&builtin_images()).unwrap();
            let req = RenderRequest::new(80.0, 48.0);
            let a = shown
                .render(&req, &decl.style, &TextureRasterizer::new())
                .unwrap()
                .to_surface();
            let b = shown
                .render(&req, &decl.style, &SurfaceRasterizer::new())
                .unwrap()
                .to_surface();
            assert_eq!(a.dimensions(), (80, 48), "{name}");
            assert_eq!(a.buffer(), b.buffer(), "{name}");
        }
    }
}
