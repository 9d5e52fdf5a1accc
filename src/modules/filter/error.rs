use crate::modules::geom::Vec2;
use crate::modules::{FilterModule, Frame};
use crate::settings::ErrorFilterSettings;

use tracing::trace;

use std::time::Instant;

/// Bridges short dropouts by repeating the last valid position.
pub struct ErrorFilter {
	max_count: u32,
	count: u32,
	position: Option<Vec2>,
}

impl FilterModule for ErrorFilter {
	fn run_at(&mut self, mut frame: Frame, _now: Instant) -> Frame {
		if frame.valid {
			self.count = 0;
			self.position = Some(frame.position);
			return frame;
		}

		if let Some(position) = self.position {
			if self.count < self.max_count {
				self.count += 1;
				trace!(count = self.count, "bridging dropout");
				frame.position = position;
				frame.valid = true;
			}
		}
		frame
	}
}

impl ErrorFilter {
	pub fn new(max_count: u32) -> Self {
		Self {
			max_count,
			count: 0,
			position: None,
		}
	}

	pub fn from_settings(settings: &ErrorFilterSettings) -> Self {
		Self::new(settings.max_count)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::modules::Health;

	fn valid(x: f64, y: f64) -> Frame {
		Frame {
			valid: true,
			health: Health::Good,
			position: Vec2::new(x, y),
			distance: 1.,
		}
	}

	#[test]
	fn repairs_up_to_max_count_dropouts() {
		let mut filter = ErrorFilter::new(3);
		assert_eq!(filter.run(valid(10., 20.)), valid(10., 20.));

		for _ in 0..3 {
			let out = filter.run(Frame::invalid(Health::Lost));
			assert!(out.valid);
			assert_eq!(out.position, Vec2::new(10., 20.));
			assert_eq!(out.health, Health::Lost);
		}

		let out = filter.run(Frame::invalid(Health::Lost));
		assert!(!out.valid);
	}

	#[test]
	fn does_nothing_before_first_valid_frame() {
		let mut filter = ErrorFilter::new(3);
		let out = filter.run(Frame::invalid(Health::Dead));
		assert_eq!(out, Frame::invalid(Health::Dead));
	}

	#[test]
	fn valid_frame_resets_the_budget() {
		let mut filter = ErrorFilter::new(1);
		filter.run(valid(1., 1.));
		assert!(filter.run(Frame::invalid(Health::Lost)).valid);
		assert!(!filter.run(Frame::invalid(Health::Lost)).valid);

		filter.run(valid(2., 2.));
		let out = filter.run(Frame::invalid(Health::Lost));
		assert!(out.valid);
		assert_eq!(out.position, Vec2::new(2., 2.));
	}
}
