use crate::hand::{Hand, LANDMARK_COUNT};

/// Length of a vectorized [`Hand`]: three coordinates per landmark.
pub const HAND_DIMENSION: usize = LANDMARK_COUNT * 3;

/// Flattens a hand into `[x0, y0, z0, ..., x20, y20, z20]`.
pub fn vectorize(hand: &Hand) -> Vec<f32> {
    let mut out = Vec::with_capacity(HAND_DIMENSION);
    for p in hand.iter() {
        out.extend_from_slice(&p.to_array());
    }
    out
}

impl Hand {
    /// Shorthand for [`vectorize`].
    pub fn to_vector(&self) -> Vec<f32> {
        vectorize(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::Point3;

    #[test]
    fn length_and_order() {
        let mut pts = [Point3::default(); LANDMARK_COUNT];
        for (i, p) in pts.iter_mut().enumerate() {
            *p = Point3::new(i as f32, 100.0 + i as f32, -(i as f32));
        }
        let v = vectorize(&Hand::new(pts));

        assert_eq!(v.len(), HAND_DIMENSION);
        assert_eq!(&v[..6], &[0.0, 100.0, 0.0, 1.0, 101.0, -1.0]);
        assert_eq!(&v[60..], &[20.0, 120.0, -20.0]);
    }

    #[test]
    fn to_vector_matches() {
        let hand = Hand::new([Point3::new(0.25, 0.5, 0.75); LANDMARK_COUNT]);
        assert_eq!(hand.to_vector(), vectorize(&hand));
        assert!(hand.to_vector().chunks(3).all(|c| c == [0.25, 0.5, 0.75]));
    }
}
