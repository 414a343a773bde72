use crate::convergence::{ConvergenceCriterion, ConvergenceLogic};
use crate::error::{KMeansError, Result};
use crate::{inits, memory::*, variants, EuclideanDistance, InitMethod};
use log::{debug, info, warn};
use rand::prelude::*;

pub type InitDoneCallbackFn<'a, T> = &'a dyn Fn(&KMeansState<T>);
pub type IterationDoneCallbackFn<'a, T> = &'a dyn Fn(&KMeansState<T>, usize, T);

/// Conventional iteration cap for [`KMeans::run_to_convergence`].
pub const DEFAULT_MAX_ITER: usize = 100;

/// Distance between two points of equal dimensionality.
/// The engine only ever compares samples and centroids of the same dataset, so implementations may
/// assume `a.len() == b.len()`.
pub trait DistanceFunction<T: Primitive> {
    fn distance(&self, a: &[T], b: &[T]) -> T;
}

/// This is a structure holding various configuration options for a k-means engine, such as
/// the random number generator to use, the convergence criterion, or a couple of callbacks, that
/// can be set to get status information from a running calculation.
///
/// For a more detailed information about all possible options, have a look at [`KMeansConfigBuilder`].
pub struct KMeansConfig<'a, T: Primitive> {
    /// Callback that is called, when the initialization phase finished
    /// ## Arguments
    /// - **state**: Current [`KMeansState`] after the initialization
    pub(crate) init_done: InitDoneCallbackFn<'a, T>,
    /// Callback that is called after each iteration
    /// ## Arguments
    /// - **state**: Current [`KMeansState`] after the iteration
    /// - **iteration_id**: Number of the current iteration
    /// - **distsum**: New distance sum (**state** contains the distsum from the previous iteration)
    pub(crate) iteration_done: IterationDoneCallbackFn<'a, T>,
    /// Random number generator to use
    pub(crate) rnd: Box<dyn RngCore>,
    /// The criterion deciding when a run has converged
    pub(crate) convergence: ConvergenceCriterion<T>,
}
impl<'a, T: Primitive> Default for KMeansConfig<'a, T> {
    fn default() -> Self {
        Self {
            init_done: &|_| {},
            iteration_done: &|_, _, _| {},
            rnd: Box::new(rand::thread_rng()),
            convergence: ConvergenceCriterion::default(),
        }
    }
}
impl<'a, T: Primitive> KMeansConfig<'a, T> {
    /// Use the [`KMeansConfigBuilder`] to build a [`KMeansConfig`] instance.
    pub fn build() -> KMeansConfigBuilder<'a, T> {
        KMeansConfigBuilder { config: KMeansConfig::default() }
    }
}
impl<'a, T: Primitive> std::fmt::Debug for KMeansConfig<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KMeansConfig").field("convergence", &self.convergence).finish_non_exhaustive()
    }
}

pub struct KMeansConfigBuilder<'a, T: Primitive> {
    config: KMeansConfig<'a, T>,
}
impl<'a, T: Primitive> KMeansConfigBuilder<'a, T> {
    /// Set the callback that should be called once the centroid initialization completed.
    pub fn init_done(mut self, init_done: InitDoneCallbackFn<'a, T>) -> Self {
        self.config.init_done = init_done; self
    }
    /// Set the callback that should be called after each iteration.
    pub fn iteration_done(mut self, iteration_done: IterationDoneCallbackFn<'a, T>) -> Self {
        self.config.iteration_done = iteration_done; self
    }
    /// Set the random number generator that should be used for initialization and empty-cluster reseeding.
    /// Use a seeded generator for deterministically repeatable results.
    pub fn random_generator<R: RngCore + 'static>(mut self, rnd: R) -> Self {
        self.config.rnd = Box::new(rnd); self
    }
    /// Set the convergence criterion. For more information, see documentation of [`ConvergenceCriterion`].
    /// ## Default
    /// [`ConvergenceCriterion::CentroidShift`] `{ threshold: 0.001 }`
    pub fn convergence(mut self, convergence: ConvergenceCriterion<T>) -> Self {
        self.config.convergence = convergence; self
    }
    /// Return the internally built configuration structure.
    pub fn build(self) -> KMeansConfig<'a, T> { self.config }
}


/// This is the internally used data-structure, storing the current state of a run.
/// [`KMeans::snapshot`] hands out a copy of it.
///
/// ## Generics
/// - **T**: Underlying primitive type that is used for the calculation
///
/// ## Fields
/// - **k**: The amount of clusters that were requested
/// - **distsum**: The total sum of distances from all samples to their respective centroids (infinity before the first step)
/// - **centroids**: Cluster centers [row-major] = [<centroid0>,<centroid1>,<centroid2>,...]
/// - **centroid_frequency**: Amount of samples in each centroid
/// - **assignments**: Vector mapping each sample to its respective nearest cluster (empty until the first assignment)
/// - **centroid_distances**: Vector containing each sample's distance to its centroid
/// - **converged**: Whether the run converged (terminal)
/// - **iteration**: Amount of steps performed in this run
#[derive(Clone, Debug, PartialEq)]
pub struct KMeansState<T: Primitive> {
    pub k: usize,
    pub distsum: T,
    pub centroids: Vec<T>,
    pub centroid_frequency: Vec<usize>,
    pub assignments: Vec<usize>,
    pub centroid_distances: Vec<T>,
    pub converged: bool,
    pub iteration: usize,

    pub(crate) sample_dims: usize,
}
impl<T: Primitive> KMeansState<T> {
    pub(crate) fn new(k: usize, sample_dims: usize) -> Self {
        Self {
            k,
            distsum: T::infinity(),
            centroids: Vec::with_capacity(k * sample_dims),
            centroid_frequency: vec![0usize; k],
            assignments: Vec::new(),
            centroid_distances: Vec::new(),
            converged: false,
            iteration: 0,
            sample_dims,
        }
    }

    /// Amount of centroids currently set (less than **k** while manual centroids are being collected).
    pub fn centroid_cnt(&self) -> usize {
        if self.sample_dims == 0 { 0 } else { self.centroids.len() / self.sample_dims }
    }

    pub fn centroid(&self, idx: usize) -> &[T] {
        &self.centroids[idx * self.sample_dims..(idx + 1) * self.sample_dims]
    }

    pub(crate) fn push_centroid(&mut self, src: &[T]) {
        debug_assert_eq!(src.len(), self.sample_dims);
        self.centroids.extend_from_slice(src);
    }

    pub(crate) fn set_centroid_from_iter(&mut self, idx: usize, src: impl Iterator<Item = T>) {
        self.centroids.iter_mut().skip(self.sample_dims * idx).take(self.sample_dims)
                .zip(src)
                .for_each(|(c, s)| *c = s);
    }

    /// Assigns every sample to its nearest centroid (ties go to the lowest centroid index), using
    /// all centroids set so far. Rebuilds assignments, centroid distances and frequencies from scratch.
    pub(crate) fn update_cluster_assignments<D: DistanceFunction<T>>(&mut self, samples: &Samples<T>, distance: &D) {
        let (centroids, assignments, centroid_distances, dims) =
            (&self.centroids, &mut self.assignments, &mut self.centroid_distances, self.sample_dims);
        assignments.resize(samples.sample_cnt, 0);
        centroid_distances.resize(samples.sample_cnt, T::infinity());

        samples.iter()
            .zip(assignments.iter_mut())
            .zip(centroid_distances.iter_mut())
            .for_each(|((s, assignment), centroid_dist)| {
                let (best_idx, best_dist) = centroids.chunks_exact(dims)
                    .map(|c| distance.distance(s, c))
                    .enumerate()
                    .fold((0, T::infinity()), |best, (idx, dist)| if dist < best.1 { (idx, dist) } else { best });
                *assignment = best_idx;
                *centroid_dist = best_dist;
            });

        self.centroid_frequency.iter_mut().for_each(|v| *v = 0);
        for &centroid_id in self.assignments.iter() {
            self.centroid_frequency[centroid_id] += 1;
        }
    }

    /// Forgets all assignments (clusters are empty until the next assignment step).
    pub(crate) fn clear_assignments(&mut self) {
        self.assignments.clear();
        self.centroid_distances.clear();
        self.centroid_frequency.iter_mut().for_each(|v| *v = 0);
    }
}


/// Lifecycle of one run, which is started by [`KMeans::set_data`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// No dataset was set yet.
    Uninitialized,
    /// Manual initialization: **collected** of k centroids were supplied so far.
    AwaitingManualCentroids { collected: usize },
    /// All k centroids are set, steps can be run.
    Ready,
    /// The run converged; further steps are no-ops.
    Converged,
}


/// Entrypoint of this crate's API-Surface: an interactive k-means clustering engine.
///
/// The engine owns a dataset and the state of the current run. It is created with the amount of
/// clusters **k** and an [`InitMethod`]; every call to [`KMeans::set_data`] starts a new run.
/// Runs are advanced one step at a time ([`KMeans::run_step`]) or until convergence
/// ([`KMeans::run_to_convergence`]).
///
/// ## Generics
/// - **T**: Underlying primitive type ([`f32`] or [`f64`])
/// - **D**: [`DistanceFunction`] used for assignments and convergence checks ([`EuclideanDistance`] by default)
///
/// ## Example
/// ```rust
/// use kmeans_stepper::*;
/// use rand::prelude::*;
///
/// let conf = KMeansConfig::build().random_generator(StdRng::seed_from_u64(1337)).build();
/// let mut kmean = KMeans::with_config(2, InitMethod::FarthestFirst, EuclideanDistance, conf).unwrap();
/// kmean.set_data(&[[0.0f64, 0.0], [0.0, 1.0], [10.0, 10.0], [10.0, 11.0]]).unwrap();
///
/// let iterations = kmean.run_to_convergence(DEFAULT_MAX_ITER);
/// assert!(kmean.is_converged());
/// println!("Converged after {} iterations: {:?}", iterations, kmean.centroids());
/// ```
pub struct KMeans<'a, T: Primitive, D: DistanceFunction<T> = EuclideanDistance> {
    k: usize,
    init_method: InitMethod,
    distance: D,
    config: KMeansConfig<'a, T>,
    samples: Samples<T>,
    state: KMeansState<T>,
    convergence: Box<dyn ConvergenceLogic<T>>,
}
impl<'a, T: Primitive> KMeans<'a, T, EuclideanDistance> {
    /// Create a new engine with euclidean distance and the default [`KMeansConfig`].
    ///
    /// ## Errors
    /// [`KMeansError::InvalidParameter`] if **k** < 1
    pub fn new(k: usize, init_method: InitMethod) -> Result<Self> {
        Self::with_config(k, init_method, EuclideanDistance, KMeansConfig::default())
    }
}
impl<'a, T: Primitive, D: DistanceFunction<T>> KMeans<'a, T, D> {
    /// Create a new engine.
    ///
    /// ## Arguments
    /// - **k**: Amount of clusters to search for
    /// - **init_method**: Initialization-Method to use for the initialization of the **k** centroids
    /// - **distance**: Distance function to use
    /// - **config**: [`KMeansConfig`] instance, containing several configuration options for the calculation.
    ///
    /// ## Errors
    /// [`KMeansError::InvalidParameter`] if **k** < 1
    pub fn with_config(k: usize, init_method: InitMethod, distance: D, config: KMeansConfig<'a, T>) -> Result<Self> {
        if k < 1 {
            return Err(KMeansError::InvalidParameter(format!("k must be at least 1, got {}", k)));
        }
        let convergence = config.convergence.create_logic();
        Ok(Self {
            k,
            init_method,
            distance,
            config,
            samples: Samples::default(),
            state: KMeansState::new(k, 0),
            convergence,
        })
    }

    /// Replace the dataset and start a new run.
    ///
    /// ## Arguments
    /// - **samples**: Vector of samples [row-major] = [<sample0>,<sample1>,<sample2>,...]
    /// - **sample_cnt**: Amount of samples, contained in the passed **samples** vector
    /// - **sample_dims**: Amount of dimensions each sample from the **sample** vector has
    ///
    /// ## Errors
    /// - [`KMeansError::InvalidParameter`] for an empty dataset, zero dimensions, or (automatic initialization only) fewer samples than **k**
    /// - [`KMeansError::DimensionMismatch`] if `samples.len() != sample_cnt * sample_dims`
    ///
    /// The engine is left untouched on error.
    pub fn set_samples(&mut self, samples: Vec<T>, sample_cnt: usize, sample_dims: usize) -> Result<()> {
        if sample_dims == 0 {
            return Err(KMeansError::InvalidParameter("samples need at least one dimension".to_string()));
        }
        if sample_cnt == 0 {
            return Err(KMeansError::InvalidParameter("dataset must not be empty".to_string()));
        }
        match sample_cnt.checked_mul(sample_dims) {
            Some(len) if len == samples.len() => {}
            expected => return Err(KMeansError::DimensionMismatch {
                expected: expected.unwrap_or(usize::MAX), actual: samples.len() }),
        }
        if self.init_method.is_automatic() && self.k > sample_cnt {
            return Err(KMeansError::InvalidParameter(format!(
                "cannot choose {} initial centroids from {} samples", self.k, sample_cnt)));
        }

        self.samples = Samples::new(samples, sample_cnt, sample_dims);
        self.initialize();
        Ok(())
    }

    /// Replace the dataset with the given points and start a new run (see [`KMeans::set_samples`]).
    ///
    /// ## Errors
    /// Additionally to the errors of [`KMeans::set_samples`]: [`KMeansError::DimensionMismatch`] if the points
    /// do not all share the dimensionality of the first one.
    pub fn set_data<P: AsRef<[T]>>(&mut self, points: &[P]) -> Result<()> {
        let sample_dims = match points.first() {
            Some(p) => p.as_ref().len(),
            None => return Err(KMeansError::InvalidParameter("dataset must not be empty".to_string())),
        };
        let mut samples = Vec::new();
        for p in points {
            let p = p.as_ref();
            if p.len() != sample_dims {
                return Err(KMeansError::DimensionMismatch { expected: sample_dims, actual: p.len() });
            }
            samples.extend_from_slice(p);
        }
        self.set_samples(samples, points.len(), sample_dims)
    }

    /// Restart the run on the current dataset, re-running the initialization method.
    /// In manual mode, all collected centroids are dropped.
    ///
    /// ## Errors
    /// [`KMeansError::InvalidParameter`] if no dataset was set yet
    pub fn reset(&mut self) -> Result<()> {
        if self.samples.is_empty() {
            return Err(KMeansError::InvalidParameter("no dataset set".to_string()));
        }
        self.initialize();
        Ok(())
    }

    fn initialize(&mut self) {
        self.state = KMeansState::new(self.k, self.samples.sample_dims);
        self.convergence = self.config.convergence.create_logic();

        if self.init_method.is_automatic() {
            inits::calculate(self.init_method, &self.samples, &self.distance, &mut self.state, &mut *self.config.rnd);
            self.state.clear_assignments();
            debug!("initialized {} centroids ({}) on {} samples", self.k, self.init_method, self.samples.sample_cnt);
            (self.config.init_done)(&self.state);
        } else {
            debug!("awaiting {} manual centroids for {} samples", self.k, self.samples.sample_cnt);
        }
    }

    /// Offer the next manual centroid. Points are taken over (copied) in the order they are supplied,
    /// which determines the cluster index. Supplying the k-th point completes the initialization.
    ///
    /// ## Returns
    /// - **Ok(true)** if the point was taken over
    /// - **Ok(false)** if the engine is not accepting manual centroids (see [`KMeans::accepts_manual_centroids`]); the point is ignored
    ///
    /// ## Errors
    /// [`KMeansError::DimensionMismatch`] if the point's dimensionality differs from the dataset's
    pub fn add_manual_centroid(&mut self, point: &[T]) -> Result<bool> {
        if !self.accepts_manual_centroids() {
            warn!("ignoring manual centroid {:?}: not accepting manual centroids ({:?})", point, self.phase());
            return Ok(false);
        }
        let accepted = inits::manual::push(&mut self.state, point)?;
        if accepted && self.state.centroid_cnt() == self.k {
            info!("all {} manual centroids set", self.k);
            (self.config.init_done)(&self.state);
        }
        Ok(accepted)
    }

    /// Hand over a complete set of exactly k centroids (in cluster-index order) and switch to
    /// [`InitMethod::Manual`]. Starts a new run on the current dataset.
    ///
    /// ## Errors
    /// - [`KMeansError::InvalidParameter`] if no dataset was set yet, or not exactly k centroids are given
    /// - [`KMeansError::DimensionMismatch`] if a centroid's dimensionality differs from the dataset's
    pub fn set_manual_centroids<P: AsRef<[T]>>(&mut self, centroids: &[P]) -> Result<()> {
        if self.samples.is_empty() {
            return Err(KMeansError::InvalidParameter("no dataset set".to_string()));
        }
        let mut state = KMeansState::new(self.k, self.samples.sample_dims);
        inits::manual::calculate(&mut state, centroids)?;

        self.init_method = InitMethod::Manual;
        self.state = state;
        self.convergence = self.config.convergence.create_logic();
        info!("manual centroid set of {} taken over", self.k);
        (self.config.init_done)(&self.state);
        Ok(())
    }

    /// Whether [`KMeans::add_manual_centroid`] currently takes points: manual mode with fewer than k collected.
    pub fn accepts_manual_centroids(&self) -> bool {
        matches!(self.phase(), Phase::AwaitingManualCentroids { .. })
    }

    /// Amount of manual centroids still needed before steps can be run.
    pub fn remaining_manual_centroids(&self) -> usize {
        match self.phase() {
            Phase::AwaitingManualCentroids { collected } => self.k - collected,
            _ => 0,
        }
    }

    fn is_ready(&self) -> bool {
        matches!(self.phase(), Phase::Ready | Phase::Converged)
    }

    /// Assign every sample to the cluster of its nearest centroid, rebuilding all clusters from scratch.
    /// No-op unless all k centroids are set, and once the run converged.
    pub fn assign_points_to_clusters(&mut self) {
        if self.state.converged {
            return;
        }
        if !self.is_ready() {
            warn!("cannot assign samples in phase {:?}", self.phase());
            return;
        }
        self.state.update_cluster_assignments(&self.samples, &self.distance);
    }

    /// Move every centroid to the mean of its cluster (reseeding centroids of empty clusters onto a random
    /// sample), then evaluate the convergence criterion. Completes one iteration.
    /// No-op unless all k centroids are set and samples were assigned, and once the run converged.
    ///
    /// ## Returns
    /// Whether the run has converged.
    pub fn update_centroids(&mut self) -> bool {
        if self.state.converged {
            return true;
        }
        if !self.is_ready() || self.state.assignments.is_empty() {
            warn!("cannot update centroids in phase {:?} without assignments", self.phase());
            return self.state.converged;
        }
        let shifts = variants::lloyd::update_centroids(&self.samples, &self.distance, &mut self.state, &mut *self.config.rnd);
        let new_distsum: T = self.state.centroid_distances.iter().cloned().sum();

        self.state.iteration += 1;
        self.state.converged = self.convergence.converged(&shifts, new_distsum);
        debug!("iteration {}: distsum {:.4} -> {:.4}", self.state.iteration, self.state.distsum, new_distsum);

        // Notify subscriber about finished iteration
        (self.config.iteration_done)(&self.state, self.state.iteration, new_distsum);
        self.state.distsum = new_distsum;
        self.state.converged
    }

    /// Run one assignment + update cycle.
    ///
    /// ## Returns
    /// **true** if further steps are needed, **false** once converged (or if the engine is not ready).
    /// Calling this after convergence changes nothing.
    pub fn run_step(&mut self) -> bool {
        if self.state.converged || !self.is_ready() {
            return false;
        }
        self.assign_points_to_clusters();
        !self.update_centroids()
    }

    /// Run steps until convergence, or until **max_iter** steps were performed in this call.
    ///
    /// ## Returns
    /// The amount of steps actually performed. Hitting **max_iter** is not an error: use
    /// [`KMeans::is_converged`] to tell "converged" from "stopped at the cap".
    pub fn run_to_convergence(&mut self, max_iter: usize) -> usize {
        if !self.is_ready() {
            warn!("cannot run in phase {:?}", self.phase());
            return 0;
        }
        let mut iterations = 0;
        while !self.state.converged && iterations < max_iter {
            self.run_step();
            iterations += 1;
        }
        if self.state.converged {
            info!("converged after {} iterations (distsum {:.4})", self.state.iteration, self.state.distsum);
        } else if iterations > 0 {
            info!("stopped after {} iterations without convergence", iterations);
        }
        iterations
    }

    /// Current phase of the run, derived from the dataset, the centroids collected so far and convergence.
    pub fn phase(&self) -> Phase {
        if self.samples.is_empty() {
            Phase::Uninitialized
        } else if self.state.centroid_cnt() < self.k {
            Phase::AwaitingManualCentroids { collected: self.state.centroid_cnt() }
        } else if self.state.converged {
            Phase::Converged
        } else {
            Phase::Ready
        }
    }

    /// Copy of the current centroids, index-aligned with [`KMeans::clusters`].
    /// While manual centroids are collected, only the ones supplied so far.
    pub fn centroids(&self) -> Vec<Vec<T>> {
        (0..self.state.centroid_cnt()).map(|ci| self.state.centroid(ci).to_vec()).collect()
    }

    /// Copy of the current clusters: per centroid, its samples in dataset order.
    /// Empty until the first assignment of a run.
    pub fn clusters(&self) -> Vec<Vec<Vec<T>>> {
        if self.state.assignments.is_empty() {
            return Vec::new();
        }
        let mut clusters = vec![Vec::new(); self.k];
        self.samples.iter()
            .zip(self.state.assignments.iter().cloned())
            .for_each(|(s, centroid_id)| clusters[centroid_id].push(s.to_vec()));
        clusters
    }

    /// Cluster index of every sample (empty until the first assignment of a run).
    pub fn assignments(&self) -> &[usize] { &self.state.assignments }
    pub fn is_converged(&self) -> bool { self.state.converged }
    /// Amount of steps performed in the current run.
    pub fn iterations(&self) -> usize { self.state.iteration }
    pub fn distsum(&self) -> T { self.state.distsum }
    pub fn k(&self) -> usize { self.k }
    pub fn init_method(&self) -> InitMethod { self.init_method }
    /// Copy of the complete state of the current run.
    pub fn snapshot(&self) -> KMeansState<T> { self.state.clone() }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::testing::*;
    use rand::rngs::mock::StepRng;
    use std::cell::Cell;

    fn seeded<'a>(seed: u64) -> KMeansConfig<'a, f64> {
        KMeansConfig::build().random_generator(StdRng::seed_from_u64(seed)).build()
    }

    /// Two-blob engine whose initial centroids are [0,0] and [10,10]
    fn two_blob_engine() -> KMeans<'static, f64> {
        // 0 and 2^63 map onto sample indices 0 and 2 of 4
        let conf = KMeansConfig::build().random_generator(StepRng::new(0, 1 << 63)).build();
        let mut kmean = KMeans::with_config(2, InitMethod::Random, EuclideanDistance, conf).unwrap();
        kmean.set_data(&two_blobs()).unwrap();
        assert_eq!(kmean.centroids(), vec![vec![0.0, 0.0], vec![10.0, 10.0]]);
        kmean
    }

    #[test]
    fn invalid_k() {
        assert!(matches!(KMeans::<f64>::new(0, InitMethod::Random), Err(KMeansError::InvalidParameter(_))));
        assert!(KMeans::<f64>::new(1, InitMethod::Manual).is_ok());
    }

    #[test]
    fn invalid_datasets_leave_engine_untouched() {
        let mut kmean = KMeans::with_config(3, InitMethod::Random, EuclideanDistance, seeded(1)).unwrap();
        assert!(matches!(kmean.set_data(&[[0.0f64, 0.0], [1.0, 1.0]]), Err(KMeansError::InvalidParameter(_))));
        assert!(matches!(kmean.set_data::<Vec<f64>>(&[]), Err(KMeansError::InvalidParameter(_))));
        assert_eq!(
            kmean.set_data(&[vec![0.0, 0.0], vec![1.0], vec![2.0, 2.0]]),
            Err(KMeansError::DimensionMismatch { expected: 2, actual: 1 })
        );
        assert_eq!(
            kmean.set_samples(vec![0.0; 5], 3, 2),
            Err(KMeansError::DimensionMismatch { expected: 6, actual: 5 })
        );
        assert!(matches!(kmean.set_samples(vec![], 3, 0), Err(KMeansError::InvalidParameter(_))));
        assert_eq!(kmean.phase(), Phase::Uninitialized);
        assert!(kmean.centroids().is_empty());
        assert!(matches!(kmean.reset(), Err(KMeansError::InvalidParameter(_))));
    }

    #[test]
    fn automatic_init_yields_k_cloned_dataset_points() {
        let points = uniform_points(&mut StdRng::seed_from_u64(1337), 60, 2);
        for method in [InitMethod::Random, InitMethod::FarthestFirst, InitMethod::KMeansPlusPlus] {
            for k in [1, 2, 5, 60] {
                let mut kmean = KMeans::with_config(k, method, EuclideanDistance, seeded(k as u64)).unwrap();
                kmean.set_data(&points).unwrap();
                let centroids = kmean.centroids();
                assert_eq!(centroids.len(), k);
                centroids.iter().for_each(|c| assert_is_dataset_point(c, &points));
                assert_eq!(kmean.phase(), Phase::Ready);
                assert!(kmean.clusters().is_empty());
                assert!(kmean.assignments().is_empty());
                assert!(!kmean.is_converged());
            }
        }
    }

    #[test]
    fn assignment_partitions_dataset() {
        let points = uniform_points(&mut StdRng::seed_from_u64(5), 150, 2);
        let mut kmean = KMeans::with_config(6, InitMethod::KMeansPlusPlus, EuclideanDistance, seeded(5)).unwrap();
        kmean.set_data(&points).unwrap();
        for _ in 0..5 {
            kmean.assign_points_to_clusters();
            let clusters = kmean.clusters();
            assert_eq!(clusters.len(), 6);
            assert_partition_of(&clusters, &points);
            kmean.update_centroids();
        }
    }

    #[test]
    fn two_blobs_step_by_step() {
        let mut kmean = two_blob_engine();

        assert_eq!(kmean.run_step(), true);
        assert_eq!(kmean.clusters(), vec![
            vec![vec![0.0, 0.0], vec![0.0, 1.0]],
            vec![vec![10.0, 10.0], vec![10.0, 11.0]],
        ]);
        assert_eq!(kmean.centroids(), vec![vec![0.0, 0.5], vec![10.0, 10.5]]);
        assert!(!kmean.is_converged());
        assert_eq!(kmean.distsum(), 2.0);

        assert_eq!(kmean.run_step(), false);
        assert!(kmean.is_converged());
        assert_eq!(kmean.phase(), Phase::Converged);
        assert_eq!(kmean.centroids(), vec![vec![0.0, 0.5], vec![10.0, 10.5]]);
        assert_eq!(kmean.iterations(), 2);
    }

    #[test]
    fn steps_after_convergence_change_nothing() {
        let mut kmean = two_blob_engine();
        assert_eq!(kmean.run_to_convergence(DEFAULT_MAX_ITER), 2);
        let before = kmean.snapshot();
        for _ in 0..3 {
            assert_eq!(kmean.run_step(), false);
        }
        assert_eq!(kmean.snapshot(), before);
        assert_eq!(kmean.run_to_convergence(DEFAULT_MAX_ITER), 0);
    }

    #[test]
    fn direct_updates_after_convergence_change_nothing() {
        let calls = Cell::new(0);
        let iteration_done = |_: &KMeansState<f64>, _: usize, _: f64| calls.set(calls.get() + 1);
        let conf = KMeansConfig::build()
            .random_generator(StdRng::seed_from_u64(2))
            .iteration_done(&iteration_done)
            .build();
        let mut kmean = KMeans::with_config(3, InitMethod::Manual, EuclideanDistance, conf).unwrap();
        kmean.set_data(&[[0.0f64, 0.0], [1.0, 1.0]]).unwrap();
        for c in [[0.0, 0.0], [1.0, 1.0], [50.0, 50.0]] {
            kmean.add_manual_centroid(&c).unwrap();
        }
        assert_eq!(kmean.run_step(), false);
        let before = kmean.snapshot();

        // cluster 2 stays empty, so any further update would reseed it
        for _ in 0..3 {
            assert!(kmean.update_centroids());
            kmean.assign_points_to_clusters();
            assert!(kmean.update_centroids());
        }
        assert_eq!(kmean.snapshot(), before);
        assert_eq!(kmean.iterations(), 1);
        assert_eq!(calls.get(), 1);
        assert_eq!(kmean.phase(), Phase::Converged);
    }

    #[test]
    fn oversized_sample_count_is_a_mismatch() {
        let mut kmean = KMeans::<f64>::new(2, InitMethod::Random).unwrap();
        assert_eq!(
            kmean.set_samples(vec![], usize::MAX, 2),
            Err(KMeansError::DimensionMismatch { expected: usize::MAX, actual: 0 })
        );
        assert_eq!(
            kmean.set_samples(vec![0.0; 4], usize::MAX / 2 + 1, 2),
            Err(KMeansError::DimensionMismatch { expected: usize::MAX, actual: 4 })
        );
        assert_eq!(kmean.phase(), Phase::Uninitialized);
    }

    #[test]
    fn iteration_cap_is_not_convergence() {
        let mut kmean = two_blob_engine();
        assert_eq!(kmean.run_to_convergence(1), 1);
        assert!(!kmean.is_converged());
        assert_eq!(kmean.run_to_convergence(1), 1);
        assert!(kmean.is_converged());
    }

    #[test]
    fn reset_restarts_run() {
        let mut kmean = two_blob_engine();
        kmean.run_to_convergence(DEFAULT_MAX_ITER);
        kmean.reset().unwrap();
        assert_eq!(kmean.phase(), Phase::Ready);
        assert_eq!(kmean.iterations(), 0);
        assert!(kmean.clusters().is_empty());
        assert_eq!(kmean.centroids().len(), 2);
    }

    #[test]
    fn manual_flow() {
        let mut kmean = KMeans::with_config(2, InitMethod::Manual, EuclideanDistance, seeded(1)).unwrap();
        assert_eq!(kmean.add_manual_centroid(&[0.0, 0.0]), Ok(false));

        kmean.set_data(&two_blobs()).unwrap();
        assert_eq!(kmean.phase(), Phase::AwaitingManualCentroids { collected: 0 });
        assert!(kmean.centroids().is_empty());
        assert_eq!(kmean.remaining_manual_centroids(), 2);

        assert_eq!(kmean.add_manual_centroid(&[10.0, 10.0]), Ok(true));
        assert_eq!(kmean.remaining_manual_centroids(), 1);
        // partial picks never compute anything
        assert_eq!(kmean.run_step(), false);
        assert_eq!(kmean.run_to_convergence(DEFAULT_MAX_ITER), 0);
        assert_eq!(kmean.centroids(), vec![vec![10.0, 10.0]]);
        assert!(kmean.clusters().is_empty());

        assert_eq!(kmean.add_manual_centroid(&[1.0, 2.0, 3.0]), Err(KMeansError::DimensionMismatch { expected: 2, actual: 3 }));
        assert_eq!(kmean.add_manual_centroid(&[0.0, 0.0]), Ok(true));
        assert_eq!(kmean.phase(), Phase::Ready);
        assert!(!kmean.accepts_manual_centroids());
        assert_eq!(kmean.add_manual_centroid(&[5.0, 5.0]), Ok(false));
        // supply order decides the cluster index
        assert_eq!(kmean.centroids(), vec![vec![10.0, 10.0], vec![0.0, 0.0]]);

        assert_eq!(kmean.run_step(), true);
        assert_eq!(kmean.centroids(), vec![vec![10.0, 10.5], vec![0.0, 0.5]]);
    }

    #[test]
    fn manual_mode_allows_more_clusters_than_samples() {
        let mut kmean = KMeans::with_config(3, InitMethod::Manual, EuclideanDistance, seeded(2)).unwrap();
        kmean.set_data(&[[0.0f64, 0.0], [1.0, 1.0]]).unwrap();
        for c in [[0.0, 0.0], [1.0, 1.0], [50.0, 50.0]] {
            assert_eq!(kmean.add_manual_centroid(&c), Ok(true));
        }
        // cluster 2 runs empty and is reseeded onto a sample, which counts as standing still
        assert_eq!(kmean.run_step(), false);
        assert!(kmean.is_converged());
        assert_is_dataset_point(&kmean.centroids()[2], &[vec![0.0, 0.0], vec![1.0, 1.0]]);
    }

    #[test]
    fn bulk_manual_centroids_switch_method() {
        let mut kmean = KMeans::with_config(2, InitMethod::KMeansPlusPlus, EuclideanDistance, seeded(3)).unwrap();
        assert!(matches!(kmean.set_manual_centroids(&[[0.0, 0.0], [1.0, 1.0]]), Err(KMeansError::InvalidParameter(_))));

        kmean.set_data(&two_blobs()).unwrap();
        kmean.run_step();
        assert!(matches!(kmean.set_manual_centroids(&[[0.0, 0.0]]), Err(KMeansError::InvalidParameter(_))));
        assert_eq!(kmean.init_method(), InitMethod::KMeansPlusPlus);

        kmean.set_manual_centroids(&[[0.0, 0.0], [10.0, 10.0]]).unwrap();
        assert_eq!(kmean.init_method(), InitMethod::Manual);
        assert_eq!(kmean.phase(), Phase::Ready);
        assert_eq!(kmean.iterations(), 0);
        assert_eq!(kmean.run_to_convergence(DEFAULT_MAX_ITER), 2);
        assert_eq!(kmean.centroids(), vec![vec![0.0, 0.5], vec![10.0, 10.5]]);

        // a new dataset in manual mode waits for picks again
        kmean.set_data(&two_blobs()).unwrap();
        assert_eq!(kmean.phase(), Phase::AwaitingManualCentroids { collected: 0 });
    }

    #[test]
    fn callbacks_are_invoked() {
        let inits = Cell::new(0);
        let iterations = Cell::new(Vec::new());
        let init_done = |_: &KMeansState<f64>| inits.set(inits.get() + 1);
        let iteration_done = |s: &KMeansState<f64>, nr: usize, distsum: f64| {
            let mut seen = iterations.take();
            seen.push((nr, s.distsum, distsum));
            iterations.set(seen);
        };
        let conf = KMeansConfig::build()
            .random_generator(StepRng::new(0, 1 << 63))
            .init_done(&init_done)
            .iteration_done(&iteration_done)
            .build();
        let mut kmean = KMeans::with_config(2, InitMethod::Random, EuclideanDistance, conf).unwrap();
        kmean.set_data(&two_blobs()).unwrap();
        kmean.run_to_convergence(DEFAULT_MAX_ITER);

        assert_eq!(inits.get(), 1);
        assert_eq!(iterations.take(), vec![(1, f64::INFINITY, 2.0), (2, 2.0, 2.0)]);
    }

    #[test]
    fn no_improvement_criterion() {
        let conf = KMeansConfig::build()
            .random_generator(StepRng::new(0, 1 << 63))
            .convergence(ConvergenceCriterion::NoImprovement { threshold: 0.0005 })
            .build();
        let mut kmean = KMeans::with_config(2, InitMethod::Random, EuclideanDistance, conf).unwrap();
        kmean.set_data(&two_blobs()).unwrap();
        // distsum 2.0 (from infinity), then 2.0 again -> no improvement
        assert_eq!(kmean.run_to_convergence(DEFAULT_MAX_ITER), 2);
        assert!(kmean.is_converged());
    }

    #[test]
    fn custom_distance_function() {
        struct Manhattan;
        impl DistanceFunction<f32> for Manhattan {
            fn distance(&self, a: &[f32], b: &[f32]) -> f32 {
                a.iter().zip(b.iter()).map(|(av, bv)| (av - bv).abs()).sum()
            }
        }
        let conf = KMeansConfig::build().random_generator(StdRng::seed_from_u64(9)).build();
        let mut kmean = KMeans::with_config(2, InitMethod::Manual, Manhattan, conf).unwrap();
        kmean.set_data(&[[0.0f32, 0.0], [0.0, 2.0], [9.0, 9.0], [9.0, 11.0]]).unwrap();
        kmean.set_manual_centroids(&[[0.0, 0.0], [9.0, 9.0]]).unwrap();
        assert_eq!(kmean.run_step(), true);
        assert_eq!(kmean.centroids(), vec![vec![0.0, 1.0], vec![9.0, 10.0]]);
        assert_eq!(kmean.distsum(), 4.0);
    }

    #[test]
    fn f32_engine_converges() {
        let points: Vec<Vec<f32>> = uniform_points(&mut StdRng::seed_from_u64(11), 200, 2)
            .into_iter().map(|p| p.into_iter().map(|v| v as f32).collect()).collect();
        let conf = KMeansConfig::build().random_generator(StdRng::seed_from_u64(11)).build();
        let mut kmean = KMeans::with_config(4, InitMethod::KMeansPlusPlus, EuclideanDistance, conf).unwrap();
        kmean.set_data(&points).unwrap();
        let iterations = kmean.run_to_convergence(1000);
        assert!(iterations <= 1000);
        assert_partition_of(&kmean.clusters(), &points);
        assert_eq!(kmean.centroids().len(), 4);
    }
}
