use crate::api::KMeansState;
use crate::error::{KMeansError, Result};
use crate::memory::*;

/// Takes one caller-supplied centroid into **state**, as long as fewer than `state.k` were collected.
/// ## Returns
/// - **Ok(true)** if the point was taken over as the next centroid
/// - **Ok(false)** if all `state.k` centroids were already collected (the point is ignored)
pub(crate) fn push<T: Primitive>(state: &mut KMeansState<T>, point: &[T]) -> Result<bool> {
    if state.centroid_cnt() >= state.k {
        return Ok(false);
    }
    check_dims(state, point)?;
    state.push_centroid(point);
    Ok(true)
}

/// Replaces all centroids of **state** with exactly `state.k` caller-supplied ones, keeping their order.
pub(crate) fn calculate<T: Primitive, P: AsRef<[T]>>(state: &mut KMeansState<T>, centroids: &[P]) -> Result<()> {
    if centroids.len() != state.k {
        return Err(KMeansError::InvalidParameter(format!(
            "expected exactly {} manual centroids, got {}", state.k, centroids.len())));
    }
    for c in centroids {
        check_dims(state, c.as_ref())?;
    }
    state.centroids.clear();
    centroids.iter().for_each(|c| state.push_centroid(c.as_ref()));
    Ok(())
}

fn check_dims<T: Primitive>(state: &KMeansState<T>, point: &[T]) -> Result<()> {
    if point.len() != state.sample_dims {
        return Err(KMeansError::DimensionMismatch { expected: state.sample_dims, actual: point.len() });
    }
    Ok(())
}
