use num::{Float, NumCast, Zero};
use rand::distributions::uniform::SampleUniform;
use std::{
    fmt::{Debug, Display, LowerExp},
    iter::Sum,
    ops::{Add, AddAssign, Sub, SubAssign},
};

pub trait Primitive: Add + AddAssign + Sum + Sub + SubAssign + Zero + Float + NumCast + SampleUniform
                + PartialOrd + Copy + Default + Display + Debug + LowerExp + 'static
                + for<'a> AddAssign<&'a Self> {}
impl Primitive for f32 {}
impl Primitive for f64 {}

/// Converts a sample count into the primitive type.
#[inline(always)]
pub(crate) fn count_as<T: Primitive>(cnt: usize) -> T {
    T::from(cnt).unwrap_or_else(T::infinity)
}


/// Row-major sample storage of one dataset: `[<sample0>,<sample1>,<sample2>,...]`.
/// Every sample has exactly `sample_dims` components.
#[derive(Clone, Debug, Default)]
pub(crate) struct Samples<T: Primitive> {
    pub(crate) sample_cnt: usize,
    pub(crate) sample_dims: usize,
    pub(crate) data: Vec<T>,
}
impl<T: Primitive> Samples<T> {
    pub(crate) fn new(data: Vec<T>, sample_cnt: usize, sample_dims: usize) -> Self {
        debug_assert_eq!(data.len(), sample_cnt * sample_dims);
        Self { sample_cnt, sample_dims, data }
    }

    pub(crate) fn is_empty(&self) -> bool { self.sample_cnt == 0 }

    pub(crate) fn sample(&self, idx: usize) -> &[T] {
        &self.data[idx * self.sample_dims..(idx + 1) * self.sample_dims]
    }

    pub(crate) fn iter(&self) -> std::slice::ChunksExact<'_, T> {
        self.data.chunks_exact(self.sample_dims)
    }
}
