//! Foundation types for bezel.
//!
//! This crate contains the backend-agnostic types shared by all bezel crates:
//! colors, style values supplied by the host, and error types.

pub mod color;
pub mod error;
pub mod style;

pub use color::Color;
pub use error::{BezelError, Result};
pub use style::Style;
