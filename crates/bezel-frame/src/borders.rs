//! Border insets and padding.

use serde::Deserialize;

/// The four border thicknesses reserved from scaling.
///
/// Values are not validated here; negative insets propagate into the
/// clamping arithmetic, which never produces a negative-size cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Insets {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Insets {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }
}

/// Border sizes plus independent padding adjustments.
///
/// The insets size a frame's borders. The padding adjustments are added to
/// them to produce [`Borders::padding`], which a host can feed to a window's
/// padding style so content sits inside the border art.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Deserialize)]
pub struct Borders {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    #[serde(default)]
    pub pad_left: i32,
    #[serde(default)]
    pub pad_top: i32,
    #[serde(default)]
    pub pad_right: i32,
    #[serde(default)]
    pub pad_bottom: i32,
}

impl Borders {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
            pad_left: 0,
            pad_top: 0,
            pad_right: 0,
            pad_bottom: 0,
        }
    }

    /// Set the padding adjustments. They may be negative.
    pub const fn with_padding(
        mut self,
        pad_left: i32,
        pad_top: i32,
        pad_right: i32,
        pad_bottom: i32,
    ) -> Self {
        self.pad_left = pad_left;
        self.pad_top = pad_top;
        self.pad_right = pad_right;
        self.pad_bottom = pad_bottom;
        self
    }

    /// `(left, top, right, bottom)` padding: each inset plus its adjustment.
    pub fn padding(&self) -> (i32, i32, i32, i32) {
        (
            self.left + self.pad_left,
            self.top + self.pad_top,
            self.right + self.pad_right,
            self.bottom + self.pad_bottom,
        )
    }

    pub fn insets(&self) -> Insets {
        Insets::new(self.left, self.top, self.right, self.bottom)
    }
}
