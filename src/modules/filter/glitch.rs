use crate::modules::geom::Vec2;
use crate::modules::{FilterModule, Frame};
use crate::settings::GlitchFilterSettings;

use tracing::{debug, trace};

use std::time::Instant;

/// Holds the pointer still through isolated far jumps. A jump that persists
/// for `max_count` frames is taken as real motion.
pub struct GlitchFilter {
	max_count: u32,
	distance_squared: f64,
	count: u32,
	position: Option<Vec2>,
}

impl FilterModule for GlitchFilter {
	fn run_at(&mut self, mut frame: Frame, _now: Instant) -> Frame {
		if !frame.valid {
			// No glitch state survives a dropout.
			self.count = 0;
			return frame;
		}

		let accepted = match self.position {
			Some(accepted) => accepted,
			None => {
				self.position = Some(frame.position);
				self.count = 0;
				return frame;
			}
		};

		let jump = accepted.distance_squared(frame.position);
		if jump > self.distance_squared {
			if self.count < self.max_count {
				self.count += 1;
				trace!(count = self.count, jump, "suppressing glitch");
				frame.position = accepted;
				return frame;
			}
			debug!(jump, "jump persisted, accepting as motion");
		}

		self.position = Some(frame.position);
		self.count = 0;
		frame
	}
}

impl GlitchFilter {
	pub fn new(max_count: u32, distance_squared: f64) -> Self {
		Self {
			max_count,
			distance_squared,
			count: 0,
			position: None,
		}
	}

	pub fn from_settings(settings: &GlitchFilterSettings) -> Self {
		Self::new(settings.max_count, settings.distance_squared)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::modules::Health;

	fn at(x: f64, y: f64) -> Frame {
		Frame {
			valid: true,
			health: Health::Good,
			position: Vec2::new(x, y),
			distance: 1.,
		}
	}

	#[test]
	fn persisting_jump_is_accepted_after_max_count() {
		let mut filter = GlitchFilter::new(2, 1.);
		assert_eq!(filter.run(at(0., 0.)).position, Vec2::new(0., 0.));

		assert_eq!(filter.run(at(100., 50.)).position, Vec2::new(0., 0.));
		assert_eq!(filter.run(at(100., 50.)).position, Vec2::new(0., 0.));
		assert_eq!(filter.run(at(100., 50.)).position, Vec2::new(100., 50.));
	}

	#[test]
	fn small_moves_pass_through() {
		let mut filter = GlitchFilter::new(2, 25.);
		filter.run(at(0., 0.));
		assert_eq!(filter.run(at(3., 4.)).position, Vec2::new(3., 4.));
		assert_eq!(filter.run(at(6., 8.)).position, Vec2::new(6., 8.));
	}

	#[test]
	fn isolated_glitch_is_dropped() {
		let mut filter = GlitchFilter::new(2, 1.);
		filter.run(at(0., 0.));
		assert_eq!(filter.run(at(300., 0.)).position, Vec2::new(0., 0.));
		assert_eq!(filter.run(at(0.5, 0.)).position, Vec2::new(0.5, 0.));
		// The count was reset, so a new jump is suppressed again.
		assert_eq!(filter.run(at(300., 0.)).position, Vec2::new(0.5, 0.));
	}

	#[test]
	fn dropout_resets_the_count() {
		let mut filter = GlitchFilter::new(2, 1.);
		filter.run(at(0., 0.));
		filter.run(at(100., 0.));

		let invalid = Frame::invalid(Health::Lost);
		assert_eq!(filter.run(invalid), invalid);

		// Two more suppressions are needed after the dropout.
		assert_eq!(filter.run(at(100., 0.)).position, Vec2::new(0., 0.));
		assert_eq!(filter.run(at(100., 0.)).position, Vec2::new(0., 0.));
		assert_eq!(filter.run(at(100., 0.)).position, Vec2::new(100., 0.));
	}
}
