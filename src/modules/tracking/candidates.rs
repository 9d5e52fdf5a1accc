use crate::modules::geom::Vec2;
use crate::modules::tracking::rotate::{rotate_dot, rotate_pair};
use crate::settings::{CandidatePreference, PointerSettings};

use itertools::Itertools;
use tracing::trace;

/// A pair of dots taken as the two emitters of the sensor bar, left first.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarCandidate {
	pub raw: [Vec2; 2],
	pub tilted: [Vec2; 2],
	/// Rotated by the full bar angle; both dots share one y.
	pub corrected: [Vec2; 2],
	pub offset_angle: f64,
	pub angle: f64,
	pub score: f64,
}

impl BarCandidate {
	pub fn width(&self) -> f64 {
		self.corrected[1].x - self.corrected[0].x
	}

	pub fn center(&self) -> Vec2 {
		self.corrected[0].midpoint(self.corrected[1])
	}
}

/// Every pair of `dots` that could be the sensor bar. `tilted` holds the
/// same dots rotated by `roll`.
pub fn find_candidates(
	dots: &[Vec2],
	tilted: &[Vec2],
	roll: f64,
	settings: &PointerSettings,
) -> Vec<BarCandidate> {
	debug_assert_eq!(dots.len(), tilted.len());

	(0..dots.len())
		.tuple_combinations()
		.filter_map(|(first, second)| evaluate_pair(dots, tilted, first, second, roll, settings))
		.collect()
}

fn evaluate_pair(
	dots: &[Vec2],
	tilted: &[Vec2],
	first: usize,
	second: usize,
	roll: f64,
	settings: &PointerSettings,
) -> Option<BarCandidate> {
	let (left, right) = if tilted[first].x > tilted[second].x {
		(second, first)
	} else {
		(first, second)
	};
	let raw = [dots[left], dots[right]];
	let tilted_pair = [tilted[left], tilted[right]];

	let diff = tilted_pair[1] - tilted_pair[0];
	if diff.y.abs() > settings.max_slope * diff.x.abs() {
		trace!(left, right, dx = diff.x, dy = diff.y, "candidate too steep");
		return None;
	}

	let offset_angle = -diff.y.atan2(diff.x);
	let angle = offset_angle + roll;
	let corrected = rotate_pair(raw, angle);

	let width = corrected[1].x - corrected[0].x;
	if width < settings.min_width {
		trace!(left, right, width, "candidate too narrow");
		return None;
	}

	// A real bar has nothing between its two emitter clusters.
	let half_width = settings.dot_width / settings.bar_width * width;
	let half_height = settings.dot_height / settings.bar_width * width;
	let center_y = (corrected[0].y + corrected[1].y) / 2.;
	let blocked = (0..dots.len())
		.filter(|&i| i != first && i != second)
		.map(|i| rotate_dot(dots[i], angle))
		.any(|dot| {
			dot.x > corrected[0].x + half_width
				&& dot.x < corrected[1].x - half_width
				&& (dot.y - center_y).abs() < half_height
		});
	if blocked {
		trace!(left, right, "candidate has a dot in the middle");
		return None;
	}

	Some(BarCandidate {
		raw,
		tilted: tilted_pair,
		corrected,
		offset_angle,
		angle,
		score: 1. / width,
	})
}

/// Picks the winning candidate of one frame. On equal scores the earliest
/// candidate wins.
pub fn select_candidate(
	candidates: Vec<BarCandidate>,
	preference: CandidatePreference,
) -> Option<BarCandidate> {
	let beats = |a: &BarCandidate, b: &BarCandidate| match preference {
		CandidatePreference::Narrowest => a.score > b.score,
		CandidatePreference::Widest => a.score < b.score,
	};
	candidates.into_iter().fold(None, |best, candidate| match best {
		Some(best) if !beats(&candidate, &best) => Some(best),
		_ => Some(candidate),
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::modules::tracking::rotate::rotate;

	use approx::assert_abs_diff_eq;

	fn candidates(dots: &[Vec2], settings: &PointerSettings) -> Vec<BarCandidate> {
		find_candidates(dots, dots, 0., settings)
	}

	#[test]
	fn level_pair_is_one_candidate() {
		let dots = [Vec2::new(0.4, 0.), Vec2::new(-0.4, 0.)];
		let found = candidates(&dots, &PointerSettings::default());

		assert_eq!(found.len(), 1);
		let bar = found[0];
		assert!(bar.corrected[1].x > bar.corrected[0].x);
		assert!(bar.score > 0.);
		assert_eq!(bar.raw[0], Vec2::new(-0.4, 0.));
		assert_abs_diff_eq!(bar.width(), 0.8);
		assert_abs_diff_eq!(bar.score, 1.25);
	}

	#[test]
	fn steep_pair_is_rejected() {
		let settings = PointerSettings {
			max_slope: 0.2,
			..PointerSettings::default()
		};
		let dots = [Vec2::new(-0.4, -0.4), Vec2::new(0.4, 0.4)];
		assert!(candidates(&dots, &settings).is_empty());
	}

	#[test]
	fn narrow_pair_is_rejected() {
		let settings = PointerSettings {
			min_width: 0.9,
			..PointerSettings::default()
		};
		let dots = [Vec2::new(-0.2, 0.), Vec2::new(0.2, 0.)];
		assert!(candidates(&dots, &settings).is_empty());
	}

	#[test]
	fn vertical_and_coincident_pairs_are_rejected() {
		let settings = PointerSettings::default();
		assert!(candidates(&[Vec2::new(0.1, -0.3), Vec2::new(0.1, 0.3)], &settings).is_empty());
		assert!(candidates(&[Vec2::new(0.1, 0.1), Vec2::new(0.1, 0.1)], &settings).is_empty());
	}

	#[test]
	fn pair_with_dot_between_is_rejected() {
		let dots = [Vec2::new(-0.6, 0.), Vec2::new(0., 0.), Vec2::new(0.6, 0.)];
		let found = candidates(&dots, &PointerSettings::default());

		// Only the two adjacent pairs survive; the outer pair is blocked.
		assert_eq!(found.len(), 2);
		for bar in &found {
			assert_abs_diff_eq!(bar.width(), 0.6, epsilon = 1e-12);
		}
	}

	#[test]
	fn dot_off_the_bar_line_does_not_block() {
		let dots = [Vec2::new(-0.6, 0.), Vec2::new(0., 0.3), Vec2::new(0.6, 0.)];
		let found = candidates(&dots, &PointerSettings::default());
		assert!(found.iter().any(|bar| (bar.width() - 1.2).abs() < 1e-12));
	}

	#[test]
	fn roll_compensation_levels_a_tilted_bar() {
		let roll = 0.6;
		// A level bar seen through a controller rolled by `roll`.
		let dots = rotate(&[Vec2::new(-0.3, 0.1), Vec2::new(0.3, 0.1)], -roll);
		let tilted = rotate(&dots, roll);

		let found = find_candidates(&dots, &tilted, roll, &PointerSettings::default());
		assert_eq!(found.len(), 1);
		let bar = found[0];
		assert_abs_diff_eq!(bar.offset_angle, 0., epsilon = 1e-12);
		assert_abs_diff_eq!(bar.angle, roll, epsilon = 1e-12);
		assert_abs_diff_eq!(bar.corrected[0].y, bar.corrected[1].y, epsilon = 1e-12);
		assert_abs_diff_eq!(bar.width(), 0.6, epsilon = 1e-12);
	}

	#[test]
	fn selection_follows_preference() {
		let settings = PointerSettings {
			min_width: 0.01,
			dot_width: 0.01,
			dot_height: 0.01,
			..PointerSettings::default()
		};
		let dots = [Vec2::new(-0.4, 0.), Vec2::new(-0.05, 0.), Vec2::new(0.05, 0.), Vec2::new(0.4, 0.)];

		let found = candidates(&dots, &settings);
		assert!(found.len() >= 2);

		let narrow = select_candidate(found.clone(), CandidatePreference::Narrowest).unwrap();
		assert_abs_diff_eq!(narrow.width(), 0.1, epsilon = 1e-12);

		let wide = select_candidate(found, CandidatePreference::Widest).unwrap();
		assert!(wide.width() > narrow.width());
	}

	#[test]
	fn equal_scores_keep_the_first_candidate() {
		let scored = |x: f64, score: f64| BarCandidate {
			raw: [Vec2::new(x, 0.), Vec2::new(x + 0.5, 0.)],
			tilted: [Vec2::new(x, 0.), Vec2::new(x + 0.5, 0.)],
			corrected: [Vec2::new(x, 0.), Vec2::new(x + 0.5, 0.)],
			offset_angle: 0.,
			angle: 0.,
			score,
		};

		let tied = vec![scored(-0.5, 2.), scored(0., 2.), scored(0.25, 1.)];
		let narrow = select_candidate(tied.clone(), CandidatePreference::Narrowest).unwrap();
		assert_eq!(narrow.raw[0].x, -0.5);

		let tied = vec![scored(-0.5, 3.), scored(0., 1.), scored(0.25, 1.)];
		let wide = select_candidate(tied, CandidatePreference::Widest).unwrap();
		assert_eq!(wide.raw[0].x, 0.);
	}

	#[test]
	fn equal_width_pairs_keep_the_first_found() {
		let settings = PointerSettings {
			dot_width: 0.01,
			dot_height: 0.01,
			..PointerSettings::default()
		};
		let dots = [Vec2::new(-0.75, 0.), Vec2::new(-0.5, 0.), Vec2::new(0.5, 0.), Vec2::new(0.75, 0.)];

		let found = candidates(&dots, &settings);
		let bar = select_candidate(found, CandidatePreference::Narrowest).unwrap();
		assert_eq!(bar.raw[0], Vec2::new(-0.75, 0.));
		assert_eq!(bar.width(), 0.25);
	}

	#[test]
	fn nothing_to_select_from_empty_list() {
		assert_eq!(select_candidate(Vec::new(), CandidatePreference::Narrowest), None);
	}
}
