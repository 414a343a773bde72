use crate::api::{DistanceFunction, KMeansState};
use crate::memory::*;
use rand::prelude::*;

#[inline(always)]
pub(crate) fn calculate<T, D>(samples: &Samples<T>, distance: &D, state: &mut KMeansState<T>, rnd: &mut dyn RngCore)
where
    T: Primitive,
    D: DistanceFunction<T>,
{
    {
        // Randomly select first centroid
        let first_idx = rnd.gen_range(0..samples.sample_cnt);
        state.push_centroid(samples.sample(first_idx));
    }
    while state.centroid_cnt() < state.k {
        // For each following centroid...
        // Calculate distances & update cluster-assignments
        state.update_cluster_assignments(samples, distance);

        // Each sample's probability of becoming the next centroid is proportional to
        // the (plain) distance to its nearest centroid
        let distsum: T = state.centroid_distances.iter().cloned().sum();
        let draw = rnd.gen_range(T::zero()..T::one());

        // Walk the cumulative distribution until it exceeds the draw. Rounding can keep the mass
        // below the draw, and all-zero distances make it NaN: both fall through to the last sample.
        let mut cumulative = T::zero();
        let sampled_idx = state.centroid_distances.iter().cloned()
            .position(|dist| {
                cumulative += dist / distsum;
                cumulative > draw
            })
            .unwrap_or(samples.sample_cnt - 1);
        state.push_centroid(samples.sample(sampled_idx));
    }
}
