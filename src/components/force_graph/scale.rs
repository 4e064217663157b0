//! Numeric scales: color bucket boundaries and data-to-pixel mapping.

/// Computes `steps` lower bucket boundaries spanning `[min, max]`.
///
/// Linear spacing puts boundaries `(max - min) / steps` apart. Exponential
/// spacing places them at `e^0 .. e^(steps - 1)` rescaled onto the range,
/// so resolution is finest near `min` and the last boundary lands on `max`.
///
/// Bucket `i` covers `[b[i], b[i + 1])`; the last one is closed by
/// [`bucket_index`] at `max + 1` so `max` itself is always bucketed.
pub fn get_buckets(min: f64, max: f64, steps: usize, exponential: bool) -> Vec<f64> {
	if steps <= 1 {
		return vec![min; steps];
	}
	if !exponential {
		let step_size = (max - min) / steps as f64;
		return (0..steps).map(|i| min + i as f64 * step_size).collect();
	}

	let log_space: Vec<f64> = (0..steps).map(|i| (i as f64).exp()).collect();
	let log_range = log_space[steps - 1] - log_space[0];
	let scale_factor = (max - min) / log_range;
	let translation = log_space[0];
	log_space
		.iter()
		.map(|point| (point - translation) * scale_factor + min)
		.collect()
}

/// Index of the bucket containing `value`, or `None` when it lies outside `[b[0], max + 1)`.
pub fn bucket_index(value: f64, boundaries: &[f64], max: f64) -> Option<usize> {
	let last = boundaries.len().checked_sub(1)?;
	boundaries.iter().enumerate().position(|(i, &lower)| {
		let upper = if i == last { max + 1.0 } else { boundaries[i + 1] };
		lower <= value && value < upper
	})
}

/// Linear map of `value` from `[in_min, in_max]` onto `[out_min, out_max]`, clamped.
pub fn map_data(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
	if in_max <= in_min {
		return out_min;
	}
	let t = ((value - in_min) / (in_max - in_min)).clamp(0.0, 1.0);
	out_min + t * (out_max - out_min)
}

/// Node diameter for a log10 user count.
pub fn node_diameter(size: f64) -> f64 {
	map_data(size, 1.0, 6.0, 20.0, 200.0)
}

/// Edge width for a mention ratio.
pub fn edge_width(weight: f64) -> f64 {
	map_data(weight, 0.0, 0.5, 1.0, 20.0)
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;

	use super::*;

	fn assert_close(a: f64, b: f64) {
		assert!((a - b).abs() < 1e-9, "{a} != {b}");
	}

	#[test]
	fn linear_buckets_are_evenly_spaced_from_min() {
		let buckets = get_buckets(10.0, 110.0, 4, false);
		assert_eq!(buckets, vec![10.0, 35.0, 60.0, 85.0]);
	}

	#[test]
	fn exponential_buckets_grow_apart() {
		let buckets = get_buckets(0.0, 100.0, 10, true);
		assert_eq!(buckets.len(), 10);
		assert_close(buckets[0], 0.0);
		assert_close(buckets[9], 100.0);
		let deltas: Vec<f64> = buckets.windows(2).map(|w| w[1] - w[0]).collect();
		assert!(deltas.windows(2).all(|d| d[0] < d[1]), "{deltas:?}");
	}

	#[test]
	fn exponential_buckets_start_at_a_nonzero_min() {
		let buckets = get_buckets(5.0, 25.0, 3, true);
		assert_close(buckets[0], 5.0);
		assert_close(buckets[2], 25.0);
	}

	#[test]
	fn single_step_is_just_the_minimum() {
		assert_eq!(get_buckets(3.0, 9.0, 1, false), vec![3.0]);
		assert_eq!(get_buckets(3.0, 9.0, 1, true), vec![3.0]);
		assert_eq!(bucket_index(9.0, &[3.0], 9.0), Some(0));
		assert_eq!(bucket_index(3.0, &[3.0], 9.0), Some(0));
	}

	#[test]
	fn maximum_falls_in_the_last_bucket() {
		let buckets = get_buckets(0.0, 100.0, 10, true);
		assert_eq!(bucket_index(100.0, &buckets, 100.0), Some(9));
		assert_eq!(bucket_index(-1.0, &buckets, 100.0), None);
		assert_eq!(bucket_index(101.0, &buckets, 100.0), None);
		assert_eq!(bucket_index(1.0, &[], 100.0), None);
	}

	#[test]
	fn map_data_clamps_to_the_output_range() {
		assert_eq!(node_diameter(1.0), 20.0);
		assert_eq!(node_diameter(6.0), 200.0);
		assert_eq!(node_diameter(9.0), 200.0);
		assert_eq!(edge_width(0.25), 10.5);
		assert_eq!(map_data(4.0, 2.0, 2.0, 1.0, 5.0), 1.0);
	}

	proptest! {
		#[test]
		fn linear_buckets_increase_from_min(min in -1e6f64..1e6, span in 1e-3f64..1e6, steps in 1usize..20) {
			let buckets = get_buckets(min, min + span, steps, false);
			prop_assert_eq!(buckets.len(), steps);
			prop_assert_eq!(buckets[0], min);
			prop_assert!(buckets.windows(2).all(|w| w[0] < w[1]));
		}

		#[test]
		fn every_value_in_range_has_exactly_one_bucket(
			min in -1e4f64..1e4,
			span in 1e-2f64..1e4,
			steps in 1usize..12,
			exponential in any::<bool>(),
			t in 0.0f64..=1.0,
		) {
			let max = min + span;
			let value = min + t * span;
			let buckets = get_buckets(min, max, steps, exponential);
			let hits = (0..buckets.len())
				.filter(|&i| {
					let upper = if i + 1 == buckets.len() { max + 1.0 } else { buckets[i + 1] };
					buckets[i] <= value && value < upper
				})
				.count();
			prop_assert_eq!(hits, 1);
			prop_assert!(bucket_index(value, &buckets, max).is_some());
		}
	}
}
