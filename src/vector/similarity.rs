//! Vector Similarity Functions
//!
//! Raw dot-product scoring. Scores are unnormalized: higher means more
//! similar, and there is no fixed range.

use crate::error::{Error, Result};

/// Scoring seam for the query engine
pub trait SimilarityScorer {
    fn score(&self, a: &[f64], b: &[f64]) -> Result<f64>;
}

/// Dot-product similarity
#[derive(Debug, Clone, Copy, Default)]
pub struct DotProduct;

impl SimilarityScorer for DotProduct {
    #[inline]
    fn score(&self, a: &[f64], b: &[f64]) -> Result<f64> {
        score(a, b)
    }
}

/// Dot product of two vectors of equal length
#[inline]
pub fn score(a: &[f64], b: &[f64]) -> Result<f64> {
    if a.len() != b.len() {
        return Err(Error::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }
    Ok(dot_product(a, b))
}

/// Compute dot product of two vectors
///
/// Uses unrolled loop for better CPU performance. Callers check lengths.
#[inline]
pub fn dot_product(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "Vector dimensions must match");

    let len = a.len();
    let mut sum = 0.0f64;

    // Process 4 elements at a time (manual unrolling)
    let chunks = len / 4;
    let remainder = len % 4;

    for i in 0..chunks {
        let idx = i * 4;
        sum += a[idx] * b[idx];
        sum += a[idx + 1] * b[idx + 1];
        sum += a[idx + 2] * b[idx + 2];
        sum += a[idx + 3] * b[idx + 3];
    }

    for i in (len - remainder)..len {
        sum += a[i] * b[i];
    }

    sum
}
