/// Compute the Euclidean (L2) distance between two vectors.
///
/// Accumulates in f64. Returns `f32::INFINITY` on dimension mismatch so a
/// malformed vector can never rank as a near neighbor.
pub fn euclidean_distance(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return f32::INFINITY;
    }

    let mut sum: f64 = 0.0;
    for (&ai, &bi) in a.iter().zip(b) {
        let d = ai as f64 - bi as f64;
        sum += d * d;
    }
    sum.sqrt() as f32
}
