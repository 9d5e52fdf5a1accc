pub mod geom;
pub mod input;
pub mod tracking;
pub mod filter;
pub mod output;

use crate::error::Result;
use crate::modules::geom::Vec2;
use crate::modules::input::{Slots, Vec3};

use std::fmt;
use std::time::Instant;

/// Tracking confidence tier, ordered from worst to best.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Health {
	Dead,
	Lost,
	Single,
	Good,
}

impl fmt::Display for Health {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Health::Dead => "dead",
			Health::Lost => "lost",
			Health::Single => "single",
			Health::Good => "good",
		};
		f.write_str(name)
	}
}

/// One pointer estimate. `position` is in pseudo-pixel space where roughly
/// -512..512 covers the camera's field of view, `distance` is in meters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
	pub valid: bool,
	pub health: Health,
	pub position: Vec2,
	pub distance: f64,
}

impl Frame {
	pub fn invalid(health: Health) -> Self {
		Self {
			valid: false,
			health,
			position: Vec2::ZERO,
			distance: 0.,
		}
	}

	/// Whether a consumer should act on this frame when it accepts tracking
	/// down to `min_health`.
	pub fn is_usable(&self, min_health: Health) -> bool {
		self.valid && self.health >= min_health
	}
}

impl Default for Frame {
	fn default() -> Self {
		Self::invalid(Health::Dead)
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
	pub t_ms: u64,
	pub slots: Slots,
	pub accel: Vec3,
}

pub struct OutputData {
	pub t_ms: u64,
	pub frame: Frame,
}

pub trait InputModule {
	fn run(&mut self) -> Result<Option<Sample>>;
}

pub trait FilterModule {
	/// Filters `frame` as if it arrived at `now`. Filters that do not depend
	/// on elapsed time ignore `now`.
	fn run_at(&mut self, frame: Frame, now: Instant) -> Frame;

	fn run(&mut self, frame: Frame) -> Frame {
		self.run_at(frame, Instant::now())
	}
}

pub trait OutputModule {
	fn run(&mut self, data: OutputData) -> Result<()>;
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn health_orders_by_confidence() {
		assert!(Health::Dead < Health::Lost);
		assert!(Health::Lost < Health::Single);
		assert!(Health::Single < Health::Good);
	}

	#[test]
	fn usable_requires_validity_and_health() {
		let mut frame = Frame {
			valid: true,
			health: Health::Single,
			position: Vec2::new(1., 2.),
			distance: 1.,
		};
		assert!(frame.is_usable(Health::Single));
		assert!(!frame.is_usable(Health::Good));

		frame.valid = false;
		assert!(!frame.is_usable(Health::Dead));
	}
}
