use crate::modules::geom::Vec2;
use crate::modules::input::{find_dots, Slots};
use crate::modules::tracking::candidates::{find_candidates, select_candidate, BarCandidate};
use crate::modules::tracking::rotate::rotate;
use crate::modules::tracking::single::guess_single;
use crate::modules::{Frame, Health};
use crate::settings::PointerSettings;

use tracing::{debug, trace};

pub const POINTER_SCALE: f64 = 512.;

/// Tracks the sensor bar across frames and turns camera slots into a raw
/// pointer estimate.
///
/// Output positions are roughly -512..512 on both axes with 0,0 meaning the
/// controller points straight at the bar. X grows to the right of the bar and
/// Y grows below it. Expect less than -384..384 on Y with a level controller,
/// so map the screen onto a subset of this space.
///
/// Roll is 0 with a level controller and grows clockwise over -pi..pi. While
/// the controller is accelerating, pass the last good roll instead.
pub struct IrPointer {
	settings: PointerSettings,
	health: Health,
	last_bar: Option<BarCandidate>,
	position: Vec2,
	distance: f64,
}

impl Default for IrPointer {
	fn default() -> Self {
		Self::new(PointerSettings::default())
	}
}

impl IrPointer {
	pub fn new(settings: PointerSettings) -> Self {
		Self {
			settings,
			health: Health::Dead,
			last_bar: None,
			position: Vec2::ZERO,
			distance: 0.,
		}
	}

	pub fn health(&self) -> Health {
		self.health
	}

	pub fn last_bar(&self) -> Option<&BarCandidate> {
		self.last_bar.as_ref()
	}

	pub fn step(&mut self, slots: &Slots, roll: f64) -> Frame {
		let dots = find_dots(slots);

		if dots.is_empty() {
			if self.health != Health::Dead {
				self.set_health(Health::Lost);
			}
			return self.stale_frame();
		}

		let tilted = rotate(&dots, roll);
		let candidates = find_candidates(&dots, &tilted, roll, &self.settings);
		trace!(dots = dots.len(), candidates = candidates.len(), "searched sensor bar");

		let tracked = match select_candidate(candidates, self.settings.candidate_preference) {
			Some(bar) => Some((bar, Health::Good)),
			None => guess_single(
				self.last_bar.as_ref(),
				self.health,
				&dots,
				&tilted,
				roll,
				&self.settings,
			)
			.map(|bar| (bar, Health::Single)),
		};

		let (bar, health) = match tracked {
			Some(tracked) => tracked,
			None => return self.stale_frame(),
		};

		self.last_bar = Some(bar);
		self.set_health(health);
		self.position = bar.center() * POINTER_SCALE;
		self.distance = self.settings.distance_for_width(bar.width());

		Frame {
			valid: true,
			health,
			position: self.position,
			distance: self.distance,
		}
	}

	fn stale_frame(&self) -> Frame {
		Frame {
			valid: false,
			health: self.health,
			position: self.position,
			distance: self.distance,
		}
	}

	fn set_health(&mut self, health: Health) {
		if self.health != health {
			debug!(from = %self.health, to = %health, "tracking health changed");
			self.health = health;
		}
	}
}
