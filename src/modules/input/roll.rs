use crate::settings::{RollAxis, RollSettings};

use tracing::trace;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3 {
	pub x: f64,
	pub y: f64,
	pub z: f64,
}

impl Vec3 {
	pub const fn new(x: f64, y: f64, z: f64) -> Self {
		Self { x, y, z }
	}

	pub fn norm(self) -> f64 {
		(self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
	}
}

/// Roll in radians from a gravity reading: 0 when level, growing clockwise.
pub fn roll_from_accel(accel: Vec3, axis: RollAxis) -> f64 {
	match axis {
		RollAxis::Y => accel.x.atan2(accel.y),
		RollAxis::Z => accel.x.atan2(accel.z),
	}
}

/// Derives roll from accelerometer readings, holding the last trustworthy
/// value while the controller is being accelerated.
pub struct RollEstimator {
	settings: RollSettings,
	last_good: f64,
}

impl RollEstimator {
	pub fn new(settings: RollSettings) -> Self {
		Self {
			settings,
			last_good: 0.,
		}
	}

	pub fn is_reliable(&self, accel: Vec3) -> bool {
		let ratio = accel.norm() / self.settings.gravity;
		(ratio - 1.).abs() <= self.settings.tolerance
	}

	pub fn update(&mut self, accel: Vec3) -> f64 {
		if self.is_reliable(accel) {
			self.last_good = roll_from_accel(accel, self.settings.axis);
		} else {
			trace!(?accel, roll = self.last_good, "accelerating, holding last roll");
		}
		self.last_good
	}

	pub fn roll(&self) -> f64 {
		self.last_good
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	use approx::assert_abs_diff_eq;

	use std::f64::consts::FRAC_PI_2;

	#[test]
	fn level_controller_has_zero_roll() {
		assert_eq!(roll_from_accel(Vec3::new(0., 0., 1.), RollAxis::Z), 0.);
		assert_eq!(roll_from_accel(Vec3::new(0., 1., 0.), RollAxis::Y), 0.);
	}

	#[test]
	fn sideways_controller_has_quarter_turn() {
		assert_abs_diff_eq!(roll_from_accel(Vec3::new(1., 0., 0.), RollAxis::Z), FRAC_PI_2);
		assert_abs_diff_eq!(roll_from_accel(Vec3::new(-1., 0., 0.), RollAxis::Y), -FRAC_PI_2);
	}

	#[test]
	fn holds_last_good_roll_under_linear_acceleration() {
		let mut estimator = RollEstimator::new(RollSettings::default());

		let tilted = Vec3::new(0.5_f64.sin(), 0., 0.5_f64.cos());
		assert_abs_diff_eq!(estimator.update(tilted), 0.5, epsilon = 1e-12);

		// Shaking: magnitude far from 1 g.
		let shaken = Vec3::new(2.5, 0., 0.3);
		assert!(!estimator.is_reliable(shaken));
		assert_abs_diff_eq!(estimator.update(shaken), 0.5, epsilon = 1e-12);
		assert_abs_diff_eq!(estimator.roll(), 0.5, epsilon = 1e-12);

		assert_eq!(estimator.update(Vec3::new(0., 0., 1.)), 0.);
	}
}
