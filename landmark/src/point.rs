use serde::{Deserialize, Serialize};

/// A single detected landmark.
///
/// `x` and `y` are normalized image coordinates (usually within `[0, 1]`),
/// `z` is depth relative to the wrist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Returns the coordinates as `[x, y, z]`.
    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<[f32; 3]> for Point3 {
    fn from(v: [f32; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_array_keeps_order() {
        let p = Point3::from([0.1, 0.2, -0.3]);
        assert_eq!(p, Point3::new(0.1, 0.2, -0.3));
        assert_eq!(p.to_array(), [0.1, 0.2, -0.3]);
    }

    #[test]
    fn finite_check() {
        assert!(Point3::new(0.0, 1.0, -1.0).is_finite());
        assert!(!Point3::new(f32::NAN, 0.0, 0.0).is_finite());
        assert!(!Point3::new(0.0, f32::INFINITY, 0.0).is_finite());
    }

    #[test]
    fn json_shape() {
        let p: Point3 = serde_json::from_str(r#"{"x":0.5,"y":0.25,"z":-0.01}"#).unwrap();
        assert_eq!(p, Point3::new(0.5, 0.25, -0.01));
    }
}
