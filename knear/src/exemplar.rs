use serde::{Deserialize, Serialize};

use crate::error::KnearError;

/// One labeled training vector.
///
/// The vector is stored under the `data` key in the serialized form.
///
/// Components are `f32`. Model files written by tools that emit 64-bit
/// floats are rounded to the nearest `f32` on decode, which keeps about
/// seven significant digits; landmark coordinates are normalized to the
/// image size, so the classification is unaffected. Exporting writes the
/// rounded values back, not the original digits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exemplar {
    pub label: String,

    #[serde(rename = "data")]
    pub vector: Vec<f32>,
}

impl Exemplar {
    pub fn new(label: impl Into<String>, vector: Vec<f32>) -> Self {
        Self {
            label: label.into(),
            vector,
        }
    }

    pub fn dimension(&self) -> usize {
        self.vector.len()
    }
}

/// Serializes exemplars as a compact JSON array of `{label, data}` records.
pub fn encode(exemplars: &[Exemplar]) -> Result<Vec<u8>, KnearError> {
    serde_json::to_vec(exemplars).map_err(|e| KnearError::Encode(e.to_string()))
}

/// Like [`encode`], indented for files meant to be read or diffed.
pub fn encode_pretty(exemplars: &[Exemplar]) -> Result<Vec<u8>, KnearError> {
    serde_json::to_vec_pretty(exemplars).map_err(|e| KnearError::Encode(e.to_string()))
}

/// Parses the record format produced by [`encode`].
///
/// Only the syntax and field types are checked here; dimension checks
/// happen when the records are loaded into a
/// [`TrainingSet`](crate::TrainingSet).
pub fn decode(data: &[u8]) -> Result<Vec<Exemplar>, KnearError> {
    serde_json::from_slice(data).map_err(|e| KnearError::Load(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_rounds_wide_floats_to_f32() {
        let data = br#"[{"label":"Rat","data":[0.123456789012345,0.5,-0.987654321098765]}]"#;
        let records = decode(data).unwrap();
        let v = &records[0].vector;
        assert_eq!(v.len(), 3);
        assert!((v[0] - 0.123_456_79).abs() < 1e-7);
        assert_eq!(v[1], 0.5);
        assert!((v[2] + 0.987_654_3).abs() < 1e-7);

        let out = String::from_utf8(encode(&records).unwrap()).unwrap();
        assert!(!out.contains("0.123456789012345"));
    }

    #[test]
    fn record_field_names() {
        let out = encode(&[Exemplar::new("Horse", vec![1.0, 0.5])]).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            r#"[{"label":"Horse","data":[1.0,0.5]}]"#
        );
    }

    #[test]
    fn decode_external_file() {
        // Numbers written by other tools are plain JSON doubles.
        let src = br#"[
            {"label": "Ten", "data": [0.512, 0.733, -0.0000012]},
            {"label": "Chi", "data": [1, 2, 3]}
        ]"#;
        let records = decode(src).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].label, "Ten");
        assert_eq!(records[1].vector, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn decode_preserves_order() {
        let records = vec![
            Exemplar::new("b", vec![0.0]),
            Exemplar::new("a", vec![1.0]),
            Exemplar::new("b", vec![2.0]),
        ];
        let back = decode(&encode_pretty(&records).unwrap()).unwrap();
        assert_eq!(back, records);
    }

    #[test]
    fn decode_rejects_malformed() {
        assert!(matches!(decode(b"not json"), Err(KnearError::Load(_))));
        assert!(matches!(decode(br#"{"label":"x"}"#), Err(KnearError::Load(_))));
        assert!(matches!(
            decode(br#"[{"label":"x","data":["a"]}]"#),
            Err(KnearError::Load(_))
        ));
        assert!(matches!(decode(br#"[{"data":[1.0]}]"#), Err(KnearError::Load(_))));
    }

    #[test]
    fn decode_empty_array() {
        assert!(decode(b"[]").unwrap().is_empty());
    }
}
