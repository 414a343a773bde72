use crate::api::DistanceFunction;
use crate::error::{KMeansError, Result};
use crate::Primitive;

/// Plain (not squared) euclidean distance.
#[derive(Clone, Copy, Debug, Default)]
pub struct EuclideanDistance;

impl<T: Primitive> DistanceFunction<T> for EuclideanDistance {
    #[inline(always)]
    fn distance(&self, a: &[T], b: &[T]) -> T {
        a.iter().cloned()
            .zip(b.iter().cloned())
            .map(|(av, bv)| av - bv)
            .map(|v| v * v)
            .sum::<T>()
            .sqrt()
    }
}

/// Euclidean distance between two points of equal dimensionality.
///
/// ## Errors
/// [`KMeansError::DimensionMismatch`] if **a** and **b** differ in length.
pub fn euclidean_distance<T: Primitive>(a: &[T], b: &[T]) -> Result<T> {
    if a.len() != b.len() {
        return Err(KMeansError::DimensionMismatch { expected: a.len(), actual: b.len() });
    }
    Ok(EuclideanDistance.distance(a, b))
}
