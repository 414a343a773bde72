use crate::api::{DistanceFunction, KMeansState};
use crate::memory::*;
use rand::prelude::*;

/// Draws `state.k` samples uniformly at random, with replacement. Duplicate centroids are possible.
#[inline(always)]
pub(crate) fn calculate<T, D>(samples: &Samples<T>, _distance: &D, state: &mut KMeansState<T>, rnd: &mut dyn RngCore)
where
    T: Primitive,
    D: DistanceFunction<T>,
{
    for _ in 0..state.k {
        let idx = rnd.gen_range(0..samples.sample_cnt);
        state.push_centroid(samples.sample(idx));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::testing::*;
    use crate::EuclideanDistance;
    use rand::rngs::mock::StepRng;

    #[test]
    fn draws_k_dataset_points() {
        let points = uniform_points(&mut StdRng::seed_from_u64(1337), 50, 2);
        let samples = Samples::new(points.concat(), 50, 2);
        let mut state = KMeansState::new(7, 2);
        calculate(&samples, &EuclideanDistance, &mut state, &mut StdRng::seed_from_u64(42));

        assert_eq!(state.centroid_cnt(), 7);
        for ci in 0..7 {
            assert_is_dataset_point(state.centroid(ci), &points);
        }
    }

    #[test]
    fn duplicates_are_kept() {
        // a constant generator always yields the first sample
        let samples = Samples::new(two_blobs().concat(), 4, 2);
        let mut state = KMeansState::new(3, 2);
        calculate(&samples, &EuclideanDistance, &mut state, &mut StepRng::new(0, 0));

        assert_eq!(state.centroids, vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
    }
}
