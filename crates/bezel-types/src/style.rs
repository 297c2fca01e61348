//! Style values supplied by the host for one render call.
//!
//! The host resolves these once per call; the compositors only read them.

use serde::Deserialize;

use crate::color::{Color, parse_hex_color};

/// Read-only style properties consumed by `Frame` and `Solid`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Style {
    /// Minimum rendered width.
    #[serde(default)]
    pub xminimum: f64,
    /// Minimum rendered height.
    #[serde(default)]
    pub yminimum: f64,
    /// Fallback fill color, as a hex string.
    #[serde(default)]
    pub color: Option<String>,
}

impl Style {
    /// Clamp a requested size against the style minimums.
    pub fn clamp_size(&self, width: f64, height: f64) -> (f64, f64) {
        (self.xminimum.max(width), self.yminimum.max(height))
    }

    /// The fallback color, if one is set and parses.
    pub fn fallback_color(&self) -> Option<Color> {
        let raw = self.color.as_deref()?;
        let parsed = parse_hex_color(raw);
        if parsed.is_none() {
            log::warn!("Ignoring unparseable style color '{raw}'");
        }
        parsed
    }
}
