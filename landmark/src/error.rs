use thiserror::Error;

/// Errors returned when building a [`Hand`](crate::Hand) from untyped input.
#[derive(Debug, Error, PartialEq)]
pub enum LandmarkError {
    #[error("landmark: expected {expected} points, got {got}")]
    PointCount { expected: usize, got: usize },

    #[error("landmark: point {index} has a non-finite coordinate")]
    NonFinite { index: usize },
}
