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
        // Distance of every sample to its nearest, already chosen centroid
        state.update_cluster_assignments(samples, distance);

        // first maximum wins
        let (farthest_idx, _) = state.centroid_distances.iter().cloned().enumerate()
            .fold((0, -T::one()), |best, (idx, dist)| if dist > best.1 { (idx, dist) } else { best });
        state.push_centroid(samples.sample(farthest_idx));
    }
}
