#[cfg(test)]
macro_rules! assert_approx_eq {
	($left: expr, $right: expr, $tol: expr) => ({
		match ($left, $right, $tol) {
			(left_val , right_val, tol_val) => {
				let delta = (left_val - right_val).abs();
				if !(delta < tol_val) {
					panic!(
						"assertion failed: `(left ≈ right)` \
						(left: `{}`, right: `{}`) \
						with ∆={:1.1e} (allowed ∆={:e})",
						left_val , right_val, delta, tol_val
					)
				}
			}
		}
	});
	($left: expr, $right: expr) => (assert_approx_eq!(($left), ($right), 1e-15))
}

#[cfg(test)]
pub(crate) mod testing {
	use crate::Primitive;
	use std::cmp::Ordering;

	/// Two well separated blobs of 2D points, the classic click-around dataset.
	pub fn two_blobs() -> Vec<Vec<f64>> {
		vec![vec![0.0, 0.0], vec![0.0, 1.0], vec![10.0, 10.0], vec![10.0, 11.0]]
	}

	/// Uniformly distributed points in `[0,100)^dims`.
	pub fn uniform_points(rnd: &mut impl rand::Rng, cnt: usize, dims: usize) -> Vec<Vec<f64>> {
		(0..cnt).map(|_| (0..dims).map(|_| rnd.gen_range(0.0..100.0)).collect()).collect()
	}

	pub fn sorted_points<T: Primitive>(mut points: Vec<Vec<T>>) -> Vec<Vec<T>> {
		points.sort_by(|a, b| {
			a.iter().zip(b.iter())
				.map(|(av, bv)| av.partial_cmp(bv).unwrap_or(Ordering::Equal))
				.find(|o| *o != Ordering::Equal)
				.unwrap_or(Ordering::Equal)
		});
		points
	}

	/// Asserts that the clusters together contain every dataset point exactly once.
	pub fn assert_partition_of<T: Primitive>(clusters: &[Vec<Vec<T>>], dataset: &[Vec<T>]) {
		let members: Vec<Vec<T>> = clusters.iter().flatten().cloned().collect();
		assert_eq!(members.len(), dataset.len(), "clusters hold {} points, dataset has {}", members.len(), dataset.len());
		assert_eq!(sorted_points(members), sorted_points(dataset.to_vec()));
	}

	/// Asserts that **point** is (by value) one of the points in **dataset**.
	pub fn assert_is_dataset_point<T: Primitive>(point: &[T], dataset: &[Vec<T>]) {
		if !dataset.iter().any(|p| p.as_slice() == point) {
			panic!("{:?} is not a point of the dataset {:?}", point, dataset);
		}
	}
}
