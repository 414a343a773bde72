mod euclideandistance;

pub use euclideandistance::{euclidean_distance, EuclideanDistance};
