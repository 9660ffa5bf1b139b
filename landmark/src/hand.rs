use serde::{Deserialize, Serialize};

use crate::error::LandmarkError;
use crate::point::Point3;

/// Number of landmarks in a single hand pose.
pub const LANDMARK_COUNT: usize = 21;

// ── Landmark ───────────────────────────────────────────────

/// Hand landmarks in detector order.
///
/// The discriminant is the landmark's index in a [`Hand`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Landmark {
    Wrist = 0,
    ThumbCmc = 1,
    ThumbMcp = 2,
    ThumbIp = 3,
    ThumbTip = 4,
    IndexFingerMcp = 5,
    IndexFingerPip = 6,
    IndexFingerDip = 7,
    IndexFingerTip = 8,
    MiddleFingerMcp = 9,
    MiddleFingerPip = 10,
    MiddleFingerDip = 11,
    MiddleFingerTip = 12,
    RingFingerMcp = 13,
    RingFingerPip = 14,
    RingFingerDip = 15,
    RingFingerTip = 16,
    PinkyMcp = 17,
    PinkyPip = 18,
    PinkyDip = 19,
    PinkyTip = 20,
}

impl Landmark {
    /// All landmarks, in index order.
    pub const ALL: [Landmark; LANDMARK_COUNT] = [
        Self::Wrist,
        Self::ThumbCmc,
        Self::ThumbMcp,
        Self::ThumbIp,
        Self::ThumbTip,
        Self::IndexFingerMcp,
        Self::IndexFingerPip,
        Self::IndexFingerDip,
        Self::IndexFingerTip,
        Self::MiddleFingerMcp,
        Self::MiddleFingerPip,
        Self::MiddleFingerDip,
        Self::MiddleFingerTip,
        Self::RingFingerMcp,
        Self::RingFingerPip,
        Self::RingFingerDip,
        Self::RingFingerTip,
        Self::PinkyMcp,
        Self::PinkyPip,
        Self::PinkyDip,
        Self::PinkyTip,
    ];

    /// Position of this landmark within a [`Hand`] (0-20).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns the landmark at `index`, if any.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Wrist => "wrist",
            Self::ThumbCmc => "thumb-cmc",
            Self::ThumbMcp => "thumb-mcp",
            Self::ThumbIp => "thumb-ip",
            Self::ThumbTip => "thumb-tip",
            Self::IndexFingerMcp => "index-mcp",
            Self::IndexFingerPip => "index-pip",
            Self::IndexFingerDip => "index-dip",
            Self::IndexFingerTip => "index-tip",
            Self::MiddleFingerMcp => "middle-mcp",
            Self::MiddleFingerPip => "middle-pip",
            Self::MiddleFingerDip => "middle-dip",
            Self::MiddleFingerTip => "middle-tip",
            Self::RingFingerMcp => "ring-mcp",
            Self::RingFingerPip => "ring-pip",
            Self::RingFingerDip => "ring-dip",
            Self::RingFingerTip => "ring-tip",
            Self::PinkyMcp => "pinky-mcp",
            Self::PinkyPip => "pinky-pip",
            Self::PinkyDip => "pinky-dip",
            Self::PinkyTip => "pinky-tip",
        }
    }

    /// The five fingertip landmarks, thumb first.
    pub fn fingertips() -> [Landmark; 5] {
        [
            Self::ThumbTip,
            Self::IndexFingerTip,
            Self::MiddleFingerTip,
            Self::RingFingerTip,
            Self::PinkyTip,
        ]
    }
}

// ── Hand ───────────────────────────────────────────────────

/// One detected hand: 21 landmarks in fixed order.
///
/// Serializes as a plain JSON array of points, which is the shape
/// detectors emit. Deserializing anything other than 21 finite points
/// fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point3>", into = "Vec<Point3>")]
pub struct Hand {
    points: [Point3; LANDMARK_COUNT],
}

impl Hand {
    pub fn new(points: [Point3; LANDMARK_COUNT]) -> Self {
        Self { points }
    }

    /// Builds a hand from an untyped point list, rejecting the wrong
    /// number of points and non-finite coordinates.
    pub fn from_points(points: Vec<Point3>) -> Result<Self, LandmarkError> {
        let got = points.len();
        let points: [Point3; LANDMARK_COUNT] =
            points.try_into().map_err(|_| LandmarkError::PointCount {
                expected: LANDMARK_COUNT,
                got,
            })?;
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(LandmarkError::NonFinite { index });
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[Point3; LANDMARK_COUNT] {
        &self.points
    }

    pub fn landmark(&self, landmark: Landmark) -> Point3 {
        self.points[landmark.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point3> {
        self.points.iter()
    }
}

impl TryFrom<Vec<Point3>> for Hand {
    type Error = LandmarkError;

    fn try_from(points: Vec<Point3>) -> Result<Self, Self::Error> {
        Self::from_points(points)
    }
}

impl From<Hand> for Vec<Point3> {
    fn from(hand: Hand) -> Self {
        hand.points.to_vec()
    }
}
