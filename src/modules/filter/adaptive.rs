use crate::modules::geom::Vec2;
use crate::modules::{FilterModule, Frame};
use crate::settings::AdaptiveSmoothingSettings;

use tracing::debug;

use std::f64::consts::PI;
use std::time::{Duration, Instant};

/// Gaps longer than this restart the filter from the incoming position.
pub const MAX_GAP: Duration = Duration::from_millis(500);

fn smoothing_factor(dt: f64, cutoff: f64) -> f64 {
	let r = 2. * PI * cutoff * dt;
	r / (r + 1.)
}

#[derive(Clone, Copy, Debug)]
struct LowPass {
	value: f64,
	speed: f64,
}

impl LowPass {
	fn new(value: f64) -> Self {
		Self { value, speed: 0. }
	}

	fn update(&mut self, x: f64, dt: f64, settings: &AdaptiveSmoothingSettings) -> f64 {
		let a_d = smoothing_factor(dt, settings.d_cutoff);
		let dx = (x - self.value) / dt;
		self.speed = a_d * dx + (1. - a_d) * self.speed;

		let cutoff = settings.min_cutoff + settings.beta * self.speed.abs();
		let a = smoothing_factor(dt, cutoff);
		self.value = a * x + (1. - a) * self.value;
		self.value
	}
}

/// One-euro style low-pass per axis: heavy smoothing at rest, little lag at
/// speed. Time steps come from the `now` passed to each frame.
pub struct AdaptiveSmoothing {
	settings: AdaptiveSmoothingSettings,
	state: Option<([LowPass; 2], Instant)>,
}

impl FilterModule for AdaptiveSmoothing {
	fn run_at(&mut self, mut frame: Frame, now: Instant) -> Frame {
		if !frame.valid {
			return frame;
		}

		let ([x, y], last) = match &mut self.state {
			Some(state) => state,
			None => return self.restart(frame, now),
		};

		let elapsed = match now.checked_duration_since(*last) {
			Some(elapsed) if elapsed > Duration::ZERO => elapsed,
			_ => {
				debug!("non-increasing frame time, holding smoothed position");
				frame.position = Vec2::new(x.value, y.value);
				return frame;
			}
		};
		if elapsed > MAX_GAP {
			debug!(gap_ms = elapsed.as_millis() as u64, "frame gap too long, restarting smoothing");
			return self.restart(frame, now);
		}

		let dt = elapsed.as_secs_f64();
		frame.position = Vec2::new(
			x.update(frame.position.x, dt, &self.settings),
			y.update(frame.position.y, dt, &self.settings),
		);
		*last = now;
		frame
	}
}

impl AdaptiveSmoothing {
	pub fn new(settings: AdaptiveSmoothingSettings) -> Self {
		Self {
			settings,
			state: None,
		}
	}

	fn restart(&mut self, frame: Frame, now: Instant) -> Frame {
		let axes = [LowPass::new(frame.position.x), LowPass::new(frame.position.y)];
		self.state = Some((axes, now));
		frame
	}
}
