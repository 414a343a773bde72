use crate::api::{DistanceFunction, KMeansState};
use crate::memory::*;
use log::warn;
use rand::prelude::*;

/// Update step of Lloyd's algorithm, on top of the assignments in **state**.
///
/// Every centroid with a non-empty cluster is moved to the mean of its samples. A centroid whose
/// cluster ran empty is reseeded onto a random sample, so no cluster vanishes for good.
///
/// ## Returns
/// Per centroid, the distance between its old and new position, or **None** if it was reseeded.
pub(crate) fn update_centroids<T, D>(samples: &Samples<T>, distance: &D, state: &mut KMeansState<T>, rnd: &mut dyn RngCore) -> Vec<Option<T>>
where
    T: Primitive,
    D: DistanceFunction<T>,
{
    let (k, dims) = (state.k, state.sample_dims);

    // Sum all samples in a cluster together into new_centroids
    let mut new_centroids = vec![T::zero(); k * dims];
    samples.iter()
        .zip(state.assignments.iter().cloned())
        .for_each(|(s, centroid_id)| {
            new_centroids.iter_mut().skip(centroid_id * dims).take(dims)
                .zip(s.iter())
                .for_each(|(c, sv)| *c += sv);
        });

    let mut shifts = Vec::with_capacity(k);
    for (ci, sum) in new_centroids.chunks_exact(dims).enumerate() {
        let cfreq = state.centroid_frequency[ci];
        if cfreq == 0 {
            let sample_id = rnd.gen_range(0..samples.sample_cnt);
            warn!("cluster {} ran empty, reseeding its centroid onto sample {}", ci, sample_id);
            state.set_centroid_from_iter(ci, samples.sample(sample_id).iter().cloned());
            shifts.push(None);
        } else {
            let cfreq = count_as::<T>(cfreq);
            let centroid: Vec<T> = sum.iter().map(|v| *v / cfreq).collect();
            shifts.push(Some(distance.distance(&centroid, state.centroid(ci))));
            state.set_centroid_from_iter(ci, centroid.into_iter());
        }
    }
    shifts
}
