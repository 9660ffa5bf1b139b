use handsign_knear::KnearError;
use handsign_landmark::LandmarkError;
use handsign_persist::PersistError;
use thiserror::Error;

/// Errors returned by [`Session`](crate::Session) operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Knear(#[from] KnearError),

    #[error(transparent)]
    Landmark(#[from] LandmarkError),

    #[error(transparent)]
    Persist(#[from] PersistError),
}

impl SessionError {
    /// True if the session had no training data to classify against.
    pub fn is_not_trained(&self) -> bool {
        matches!(self, Self::Knear(KnearError::NotTrained))
    }

    /// True for vectors whose length disagrees with the session's dimension.
    pub fn is_dimension_mismatch(&self) -> bool {
        matches!(self, Self::Knear(KnearError::DimensionMismatch { .. }))
    }
}
