use crate::memory::*;

/// Enum with possible convergence criteria.
/// A criterion is evaluated once per step, after the centroids were updated, and decides
/// whether the run has converged. Convergence is terminal for a run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConvergenceCriterion<T: Primitive> {
	/// Converged, once every centroid moved less than `threshold` during the last update.
	/// Centroids of clusters that ran empty (and were reseeded) count as converged for that step.
	/// ## Fields:
	/// - **threshold**: Maximum movement (same unit as the input coordinates) still considered "standing still"
	CentroidShift { threshold: T },
	/// Converged, directly after a step produced no improvement of the total distance sum
	/// where `improvement > threshold`.
	/// ## Fields:
	/// - **threshold**: Threshold, used to detect an improvement (`improvement > threshold`)
	NoImprovement { threshold: T },
}
impl<T: Primitive> Default for ConvergenceCriterion<T> {
	fn default() -> Self {
		ConvergenceCriterion::CentroidShift { threshold: T::from(0.001).unwrap_or_else(T::epsilon) }
	}
}
impl<T: Primitive> ConvergenceCriterion<T> {
	pub(crate) fn create_logic(&self) -> Box<dyn ConvergenceLogic<T>> {
		match *self {
			ConvergenceCriterion::CentroidShift { threshold } => Box::new(CentroidShiftLogic { threshold }),
			ConvergenceCriterion::NoImprovement { threshold } => Box::new(NoImprovementLogic {
				threshold,
				prev_distsum: T::infinity()
			})
		}
	}
}

pub(crate) trait ConvergenceLogic<T: Primitive> {
	/// Function that has to be called once per step, after the centroids were updated.
	/// ## Arguments
	/// - **shifts**: Per centroid, the distance between its old and new position (**None** if its cluster was empty and it got reseeded)
	/// - **distsum**: The new total distance sum of the step
	/// ## Returns
	/// - **true** if the run converged
	/// - **false** if further steps are needed
	fn converged(&mut self, shifts: &[Option<T>], distsum: T) -> bool;
}


pub(crate) struct CentroidShiftLogic<T: Primitive> {
	threshold: T
}
impl<T: Primitive> ConvergenceLogic<T> for CentroidShiftLogic<T> {
	fn converged(&mut self, shifts: &[Option<T>], _distsum: T) -> bool {
		shifts.iter().all(|shift| match shift {
			None => true,
			Some(shift) => *shift < self.threshold
		})
	}
}


pub(crate) struct NoImprovementLogic<T: Primitive> {
	threshold: T,
	prev_distsum: T
}
impl<T: Primitive> ConvergenceLogic<T> for NoImprovementLogic<T> {
	fn converged(&mut self, _shifts: &[Option<T>], distsum: T) -> bool {
		let improvement = self.prev_distsum - distsum;
		self.prev_distsum = distsum;
		!(improvement > self.threshold)
	}
}
