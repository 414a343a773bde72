use crate::api::{DistanceFunction, KMeansState};
use crate::error::KMeansError;
use crate::memory::*;
use rand::RngCore;
use std::fmt;
use std::str::FromStr;

pub(crate) mod farthestfirst;
pub(crate) mod kmeanplusplus;
pub(crate) mod manual;
pub(crate) mod randomsample;

/// Centroid initialization methods.
///
/// The method is chosen once per engine and applied on every [`set_data`](crate::KMeans::set_data)
/// (or [`reset`](crate::KMeans::reset)). [`InitMethod::Manual`] is also switched to implicitly, once
/// a full centroid set is handed over with [`set_manual_centroids`](crate::KMeans::set_manual_centroids).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InitMethod {
    /// k samples drawn uniformly at random, with replacement (duplicates are possible).
    Random,
    /// One random sample, then repeatedly the sample farthest away from its nearest chosen centroid.
    FarthestFirst,
    /// One random sample, then samples drawn with a probability proportional to the distance to their nearest chosen centroid.
    KMeansPlusPlus,
    /// Centroids are supplied one by one by the caller.
    Manual,
}
impl InitMethod {
    /// Whether the centroids are computed by the engine itself (everything but [`InitMethod::Manual`]).
    pub fn is_automatic(&self) -> bool {
        !matches!(self, InitMethod::Manual)
    }
}
impl fmt::Display for InitMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InitMethod::Random => "random",
            InitMethod::FarthestFirst => "farthestFirst",
            InitMethod::KMeansPlusPlus => "kmeanspp",
            InitMethod::Manual => "manual",
        })
    }
}
impl FromStr for InitMethod {
    type Err = KMeansError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "random" => Ok(InitMethod::Random),
            "farthestFirst" | "farthest_first" | "farthest-first" => Ok(InitMethod::FarthestFirst),
            "kmeanspp" | "kmeans++" | "kmeans_plus_plus" | "kmeans-plus-plus" => Ok(InitMethod::KMeansPlusPlus),
            "manual" => Ok(InitMethod::Manual),
            other => Err(KMeansError::InvalidParameter(format!("unknown initialization method '{}'", other))),
        }
    }
}

/// Fills **state** with `state.k` centroids, using the automatic initialization **method**.
/// [`InitMethod::Manual`] leaves the centroids untouched.
pub(crate) fn calculate<T, D>(method: InitMethod, samples: &Samples<T>, distance: &D, state: &mut KMeansState<T>, rnd: &mut dyn RngCore)
where
    T: Primitive,
    D: DistanceFunction<T>,
{
    match method {
        InitMethod::Random => randomsample::calculate(samples, distance, state, rnd),
        InitMethod::FarthestFirst => farthestfirst::calculate(samples, distance, state, rnd),
        InitMethod::KMeansPlusPlus => kmeanplusplus::calculate(samples, distance, state, rnd),
        InitMethod::Manual => {}
    }
}
