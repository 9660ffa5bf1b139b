//! Instance-based classification over labeled feature vectors.
//!
//! # Components
//!
//! - [`TrainingSet`]: append-only, ordered list of [`Exemplar`]s sharing one
//!   dimension. Replaced wholesale by [`TrainingSet::load`].
//! - [`KNear`]: k-nearest-neighbor majority vote using Euclidean distance.
//! - [`encode`] / [`decode`]: the JSON record format used for both the
//!   durable slot and exported model files:
//!
//! ```text
//! [
//!   {"label": "Monkey", "data": [0.51, 0.73, -0.02, ...]},
//!   {"label": "Horse",  "data": [0.48, 0.70, -0.01, ...]}
//! ]
//! ```
//!
//! # Determinism
//!
//! Neighbors are ranked by `(distance, insertion index)`, and vote ties are
//! broken by the rank of each label's nearest neighbor, so identical
//! inputs always produce identical labels.

mod classifier;
mod error;
mod euclidean;
mod exemplar;
mod training;

pub use classifier::{classify, KNear, Neighbor, Prediction, DEFAULT_K};
pub use error::KnearError;
pub use euclidean::euclidean_distance;
pub use exemplar::{decode, encode, encode_pretty, Exemplar};
pub use training::TrainingSet;
