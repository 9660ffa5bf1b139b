//! Typed hand poses as produced by a hand-landmark detector.
//!
//! A [`Hand`] is exactly 21 [`Point3`] values in the detector's fixed
//! anatomical order (see [`Landmark`]). [`vectorize`] flattens a hand into
//! a 63-element feature vector:
//!
//! ```text
//! [x0, y0, z0, x1, y1, z1, ..., x20, y20, z20]
//! ```
//!
//! Malformed poses are rejected when a `Hand` is built (from a `Vec`, or
//! via serde), so everything downstream can rely on the shape.

mod error;
mod hand;
mod point;
mod vectorize;

pub use error::LandmarkError;
pub use hand::{Hand, Landmark, LANDMARK_COUNT};
pub use point::Point3;
pub use vectorize::{vectorize, HAND_DIMENSION};
