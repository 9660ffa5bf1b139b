use handsign_knear::DEFAULT_K;
use handsign_landmark::HAND_DIMENSION;

/// Controls session behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Neighbors consulted per classification. Default: 3.
    pub k: usize,

    /// Vector length accepted by the training set. Default: 63 (21 × xyz).
    pub dimension: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            k: DEFAULT_K,
            dimension: HAND_DIMENSION,
        }
    }
}

impl SessionConfig {
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    pub fn with_dimension(mut self, dim: usize) -> Self {
        self.dimension = dim;
        self
    }

    pub(crate) fn with_defaults(mut self) -> Self {
        if self.k == 0 {
            self.k = DEFAULT_K;
        }
        if self.dimension == 0 {
            self.dimension = HAND_DIMENSION;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = SessionConfig::default();
        assert_eq!(cfg.k, 3);
        assert_eq!(cfg.dimension, 63);
    }

    #[test]
    fn zero_values_fall_back() {
        let cfg = SessionConfig { k: 0, dimension: 0 }.with_defaults();
        assert_eq!(cfg, SessionConfig::default());
    }

    #[test]
    fn builders() {
        let cfg = SessionConfig::default().with_k(5).with_dimension(42);
        assert_eq!(cfg.k, 5);
        assert_eq!(cfg.dimension, 42);
    }
}
