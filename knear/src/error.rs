use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum KnearError {
    #[error("knear: dimension mismatch: got {got}, want {want}")]
    DimensionMismatch { got: usize, want: usize },

    #[error("knear: empty vector")]
    EmptyVector,

    #[error("knear: value {index} is not finite")]
    NonFinite { index: usize },

    #[error("knear: classifier has no training data")]
    NotTrained,

    #[error("knear: load: {0}")]
    Load(String),

    #[error("knear: encode: {0}")]
    Encode(String),
}
