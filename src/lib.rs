//! # kmeans-stepper - API documentation
//!
//! An interactive k-means clustering engine: given a set of points, a cluster count k, and a
//! centroid initialization method, it computes and incrementally refines a partition of the points
//! into k clusters, one step at a time or until convergence.
//!
//! ## Design target
//! The engine is meant to sit behind something that shows intermediate results (a chart, a REPL, ...):
//! every step can be observed, runs can be restarted, and centroids can be picked by hand.
//! It is single-threaded and synchronous; a caller driving it from multiple threads has to serialize access.
//!
//! ## Supported centroid initializations
//! The outcome of each K-Means run depends on the initialization of its clusters. See [`InitMethod`]:
//! - random samples (with replacement)
//! - farthest-first traversal
//! - K-Means++
//! - manual, with centroids supplied one by one by the caller
//!
//! ## Supported primitive types
//! - [`f32`]
//! - [`f64`]
//!
//! ## Example
//! ```rust
//! use kmeans_stepper::*;
//!
//! fn main() {
//!     // Generate some random data
//!     let samples: Vec<[f64; 2]> = (0..200).map(|_| [rand::random::<f64>() * 100.0, rand::random::<f64>() * 100.0]).collect();
//!
//!     // Step through kmeans, using kmean++ as initialization-method
//!     let mut kmean = KMeans::new(4, InitMethod::KMeansPlusPlus).unwrap();
//!     kmean.set_data(&samples).unwrap();
//!     while kmean.run_step() {
//!         println!("Iteration {} - Error: {:.2}", kmean.iterations(), kmean.distsum());
//!     }
//!
//!     println!("Centroids: {:?}", kmean.centroids());
//!     println!("Cluster-Assignments: {:?}", kmean.assignments());
//! }
//! ```
//!
//! ## Example (manual centroids)
//! ```rust
//! use kmeans_stepper::*;
//!
//! fn main() {
//!     let mut kmean = KMeans::new(2, InitMethod::Manual).unwrap();
//!     kmean.set_data(&[[0.0f64, 0.0], [0.0, 1.0], [10.0, 10.0], [10.0, 11.0]]).unwrap();
//!
//!     // e.g. one pick per click, until the engine stops accepting them
//!     for pick in [[1.0, 1.0], [9.0, 9.0]] {
//!         if kmean.accepts_manual_centroids() {
//!             kmean.add_manual_centroid(&pick).unwrap();
//!         }
//!     }
//!
//!     let iterations = kmean.run_to_convergence(DEFAULT_MAX_ITER);
//!     assert!(kmean.is_converged());
//!     println!("Converged in {} iterations: {:?}", iterations, kmean.centroids());
//! }
//! ```
//!
//! ## Short API-Overview / Description
//! Entry-point of the library is the [`KMeans`] struct. It is generic over the underlying primitive
//! type and the [`DistanceFunction`]. A run is started with [`KMeans::set_data`] (or [`KMeans::set_samples`]
//! for row-major input), which immediately initializes the centroids unless manual initialization was chosen.
//! The state of a run can be inspected through copy-out accessors ([`KMeans::centroids`], [`KMeans::clusters`],
//! [`KMeans::snapshot`], ...), or observed through the callbacks of [`KMeansConfig`], which also carries the
//! random number generator (seed it for reproducible runs) and the [`ConvergenceCriterion`].
//!
//! Empty clusters are not an error: their centroid is reseeded onto a random sample. Neither is hitting the
//! iteration cap of [`KMeans::run_to_convergence`]; check [`KMeans::is_converged`] to tell both outcomes apart.

#[macro_use] mod helpers;
mod memory;
mod error;
mod api;
mod variants;
mod inits;
mod distances;
mod convergence;

pub use api::{DistanceFunction, KMeans, KMeansConfig, KMeansConfigBuilder, KMeansState, Phase, DEFAULT_MAX_ITER};
pub use convergence::ConvergenceCriterion;
pub use distances::{euclidean_distance, EuclideanDistance};
pub use error::KMeansError;
pub use inits::InitMethod;
pub use memory::Primitive;
