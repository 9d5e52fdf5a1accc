use crate::modules::geom::Vec2;
use crate::modules::{FilterModule, Frame};
use crate::settings::RadiusSmoothingSettings;

use std::time::Instant;

/// Trails the raw position at no more than `radius` pseudo-pixels. Inside the
/// radius it eases towards the raw position, inside the deadzone it holds.
pub struct RadiusSmoothing {
	radius: f64,
	speed: f64,
	deadzone: f64,
	position: Option<Vec2>,
}

impl FilterModule for RadiusSmoothing {
	fn run_at(&mut self, mut frame: Frame, _now: Instant) -> Frame {
		if !frame.valid {
			return frame;
		}

		let smoothed = match self.position {
			Some(smoothed) => self.follow(smoothed, frame.position),
			None => frame.position,
		};
		self.position = Some(smoothed);
		frame.position = smoothed;
		frame
	}
}

impl RadiusSmoothing {
	pub fn new(radius: f64, speed: f64, deadzone: f64) -> Self {
		Self {
			radius,
			speed,
			deadzone,
			position: None,
		}
	}

	pub fn from_settings(settings: &RadiusSmoothingSettings) -> Self {
		Self::new(settings.radius, settings.speed, settings.deadzone)
	}

	fn follow(&self, smoothed: Vec2, raw: Vec2) -> Vec2 {
		let delta = raw - smoothed;
		let distance = delta.norm();

		if distance <= self.deadzone {
			smoothed
		} else if distance < self.radius {
			smoothed + delta * self.speed
		} else {
			let (sin, cos) = delta.y.atan2(delta.x).sin_cos();
			raw - Vec2::new(cos, sin) * self.radius
		}
	}
}
