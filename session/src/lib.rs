//! Gesture recognition session.
//!
//! A [`Session`] ties together vectorization, the training set, the k-NN
//! classifier and a durable slot:
//!
//! ```text
//! frame loop:   Hand ──vectorize──▶ classify ──▶ label
//! user action:  Hand ──vectorize──▶ add ──▶ save (full set)
//! startup:      slot ──load──▶ training set
//! ```
//!
//! The session is an ordinary value owned by the caller; nothing here is
//! global. All entry points are synchronous.
//!
//! # Usage
//!
//! ```
//! use handsign_landmark::{Hand, Point3, LANDMARK_COUNT};
//! use handsign_persist::MemorySlot;
//! use handsign_session::{Session, SessionConfig};
//!
//! let session = Session::open(SessionConfig::default(), Box::new(MemorySlot::new()));
//!
//! let open_palm = Hand::new([Point3::new(0.5, 0.5, 0.0); LANDMARK_COUNT]);
//! session.learn(&open_palm, "Open").unwrap();
//!
//! assert_eq!(session.classify_hand(&open_palm).unwrap(), "Open");
//! ```
//!
//! # Concurrency
//!
//! The training set sits behind a reader-writer lock: learning and loading
//! take the write side, classification the read side, so concurrent
//! classifications never block each other and always observe a complete
//! set. Saves are serialized and always write a snapshot at least as new
//! as the one before.

mod config;
mod error;
mod session;

pub use config::SessionConfig;
pub use error::SessionError;
pub use session::Session;

pub use handsign_knear::{Exemplar, Prediction};
