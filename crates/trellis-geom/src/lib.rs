//! Geometry primitives used across trellis.
//!
//! Layout negotiation runs independently per [`Axis`], so most types here can
//! be read and written "along" an axis.

#![warn(missing_docs)]

/// Axis and per-axis pairs.
mod axis;
/// Error types for geometry operations.
mod error;
/// Per-side margins.
mod margins;
/// Point helpers.
mod point;
/// Rectangle operations.
mod rect;
/// Width/height size type.
mod size;

pub use axis::{Axis, Dim};
pub use error::{Error, Result};
pub use margins::Margins;
pub use point::Point;
pub use rect::Rect;
pub use size::Size;
