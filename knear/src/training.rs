use crate::error::KnearError;
use crate::exemplar::{decode, encode, Exemplar};

/// Append-only, ordered collection of exemplars sharing one dimension.
///
/// The dimension is either pinned at construction
/// ([`TrainingSet::with_dimension`]) or established by the first exemplar
/// added or loaded. Exemplars are never edited or removed; the only way to
/// shrink the set is to replace it wholesale with [`TrainingSet::load`] or
/// [`TrainingSet::replace`].
#[derive(Debug, Clone, Default)]
pub struct TrainingSet {
    exemplars: Vec<Exemplar>,
    dim: Option<usize>,
    pinned: bool,
}

impl TrainingSet {
    /// Creates an empty set whose dimension is taken from the first vector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty set that only accepts vectors of length `dim`.
    pub fn with_dimension(dim: usize) -> Self {
        Self {
            exemplars: Vec::new(),
            dim: Some(dim),
            pinned: true,
        }
    }

    /// Appends an exemplar.
    ///
    /// On error the set is left unchanged.
    pub fn add(&mut self, vector: Vec<f32>, label: impl Into<String>) -> Result<(), KnearError> {
        check_vector(&vector, self.dim)?;
        self.dim = Some(vector.len());
        self.exemplars.push(Exemplar::new(label, vector));
        Ok(())
    }

    /// Appends several exemplars, all or nothing.
    ///
    /// Every vector is checked against the established dimension (or the
    /// first vector's length) before anything is appended.
    pub fn extend(&mut self, items: Vec<(Vec<f32>, String)>) -> Result<(), KnearError> {
        let mut dim = self.dim;
        for (vector, _) in &items {
            check_vector(vector, dim)?;
            dim = Some(vector.len());
        }

        self.dim = dim;
        self.exemplars
            .extend(items.into_iter().map(|(vector, label)| Exemplar::new(label, vector)));
        Ok(())
    }

    /// Replaces the whole set with `records`.
    ///
    /// All records must share one non-zero dimension (the pinned one, if
    /// any) and contain only finite values. On error the set is left
    /// unchanged. Returns the new number of exemplars.
    pub fn replace(&mut self, records: Vec<Exemplar>) -> Result<usize, KnearError> {
        let pinned = if self.pinned { self.dim } else { None };
        let mut dim = pinned;

        for (i, rec) in records.iter().enumerate() {
            let got = rec.vector.len();
            if got == 0 {
                return Err(KnearError::Load(format!("record {i}: empty data")));
            }
            match dim {
                Some(want) if want != got => {
                    return Err(KnearError::Load(format!(
                        "record {i}: dimension {got}, want {want}"
                    )));
                }
                Some(_) => {}
                None => dim = Some(got),
            }
            if rec.vector.iter().any(|v| !v.is_finite()) {
                return Err(KnearError::Load(format!("record {i}: non-finite value")));
            }
        }

        self.exemplars = records;
        self.dim = dim;
        Ok(self.exemplars.len())
    }

    /// Parses an exported record list and replaces the set with it.
    ///
    /// Malformed input leaves the current contents untouched.
    pub fn load(&mut self, data: &[u8]) -> Result<usize, KnearError> {
        let records = decode(data)?;
        self.replace(records)
    }

    /// Returns a complete, order-preserving copy of all exemplars.
    pub fn export(&self) -> Vec<Exemplar> {
        self.exemplars.clone()
    }

    /// Serializes the set in the record format accepted by [`TrainingSet::load`].
    pub fn to_json(&self) -> Result<Vec<u8>, KnearError> {
        encode(&self.exemplars)
    }

    pub fn exemplars(&self) -> &[Exemplar] {
        &self.exemplars
    }

    pub fn iter(&self) -> impl Iterator<Item = &Exemplar> {
        self.exemplars.iter()
    }

    /// Returns the established dimension, or `None` if nothing has fixed it yet.
    pub fn dimension(&self) -> Option<usize> {
        self.dim
    }

    pub fn len(&self) -> usize {
        self.exemplars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exemplars.is_empty()
    }
}

fn check_vector(vector: &[f32], dim: Option<usize>) -> Result<(), KnearError> {
    if vector.is_empty() {
        return Err(KnearError::EmptyVector);
    }
    if let Some(want) = dim {
        if vector.len() != want {
            return Err(KnearError::DimensionMismatch {
                got: vector.len(),
                want,
            });
        }
    }
    if let Some(index) = vector.iter().position(|v| !v.is_finite()) {
        return Err(KnearError::NonFinite { index });
    }
    Ok(())
}
