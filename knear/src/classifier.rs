use crate::error::KnearError;
use crate::euclidean::euclidean_distance;
use crate::training::TrainingSet;

/// Number of neighbors consulted when none is configured.
pub const DEFAULT_K: usize = 3;

/// A ranked neighbor of a query vector.
#[derive(Debug, Clone, PartialEq)]
pub struct Neighbor {
    /// Insertion index of the exemplar in its [`TrainingSet`].
    pub index: usize,
    pub label: String,
    pub distance: f32,
}

/// Outcome of a k-NN vote.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// Winning label.
    pub label: String,

    /// Votes cast for the winning label.
    pub votes: usize,

    /// Neighbors that took part in the vote: `min(k, training set size)`.
    pub neighbors: usize,

    /// Distance from the query to the winner's nearest exemplar.
    pub distance: f32,
}

impl Prediction {
    /// Fraction of the participating neighbors that voted for the winner.
    pub fn confidence(&self) -> f32 {
        if self.neighbors == 0 {
            return 0.0;
        }
        self.votes as f32 / self.neighbors as f32
    }
}

/// k-nearest-neighbor classifier.
///
/// Holds only `k`; the exemplars are passed in on each call, so one
/// classifier can serve any number of training sets and never mutates them.
///
/// # Algorithm
///
/// 1. Rank every exemplar by `(distance, insertion index)`.
/// 2. Keep the first `k` (the whole set if it is smaller).
/// 3. Count votes per label.
/// 4. Most votes wins. On a tie, the label whose nearest voter ranks
///    first wins: closer distance, then earlier insertion.
#[derive(Debug, Clone, Copy)]
pub struct KNear {
    k: usize,
}

impl Default for KNear {
    fn default() -> Self {
        Self { k: DEFAULT_K }
    }
}

impl KNear {
    /// Creates a classifier consulting `k` neighbors. `0` selects [`DEFAULT_K`].
    pub fn new(k: usize) -> Self {
        let k = if k > 0 { k } else { DEFAULT_K };
        Self { k }
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Returns the `k` nearest exemplars, closest first.
    pub fn neighbors(&self, query: &[f32], set: &TrainingSet) -> Result<Vec<Neighbor>, KnearError> {
        if set.is_empty() {
            return Err(KnearError::NotTrained);
        }
        if let Some(want) = set.dimension() {
            if query.len() != want {
                return Err(KnearError::DimensionMismatch {
                    got: query.len(),
                    want,
                });
            }
        }

        let mut ranked: Vec<(usize, f32)> = set
            .iter()
            .enumerate()
            .map(|(i, e)| (i, euclidean_distance(query, &e.vector)))
            .collect();

        ranked.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
        ranked.truncate(self.k);

        let exemplars = set.exemplars();
        Ok(ranked
            .into_iter()
            .map(|(index, distance)| Neighbor {
                index,
                label: exemplars[index].label.clone(),
                distance,
            })
            .collect())
    }

    /// Runs the vote and returns the winner with its tally.
    pub fn predict(&self, query: &[f32], set: &TrainingSet) -> Result<Prediction, KnearError> {
        let neighbors = self.neighbors(query, set)?;

        // Tallies in order of first appearance. Neighbors are already
        // ranked, so each tally's first voter is its nearest one.
        let mut tallies: Vec<(&str, usize, f32)> = Vec::with_capacity(neighbors.len());
        for n in &neighbors {
            match tallies.iter_mut().find(|t| t.0 == n.label) {
                Some(t) => t.1 += 1,
                None => tallies.push((n.label.as_str(), 1, n.distance)),
            }
        }

        // Strictly greater keeps the earliest-ranked label on ties.
        let mut best = 0;
        for (i, t) in tallies.iter().enumerate().skip(1) {
            if t.1 > tallies[best].1 {
                best = i;
            }
        }

        let (label, votes, distance) = tallies[best];
        Ok(Prediction {
            label: label.to_string(),
            votes,
            neighbors: neighbors.len(),
            distance,
        })
    }

    /// Returns the predicted label for `query`.
    pub fn classify(&self, query: &[f32], set: &TrainingSet) -> Result<String, KnearError> {
        self.predict(query, set).map(|p| p.label)
    }
}

/// Classifies `query` against `set` using `k` neighbors.
pub fn classify(query: &[f32], set: &TrainingSet, k: usize) -> Result<String, KnearError> {
    KNear::new(k).classify(query, set)
}
