use crate::modules::geom::Vec2;
use crate::modules::tracking::candidates::BarCandidate;
use crate::modules::tracking::rotate::rotate_pair;
use crate::modules::Health;
use crate::settings::PointerSettings;

use tracing::trace;

/// Keeps tracking with one visible emitter by moving the previous bar as a
/// rigid body onto a visible dot. Returns `None` without a previous bar.
pub fn guess_single(
	previous: Option<&BarCandidate>,
	health: Health,
	dots: &[Vec2],
	tilted: &[Vec2],
	roll: f64,
	settings: &PointerSettings,
) -> Option<BarCandidate> {
	let previous = previous.filter(|_| health != Health::Dead)?;
	if dots.is_empty() {
		return None;
	}

	if let Some(bar) = follow_nearest(previous, health, tilted, roll, settings) {
		return Some(bar);
	}

	let edge = closest_to_edge(dots, settings.height);
	let guesses = [
		translate_bar(previous, 0, tilted[edge], roll),
		translate_bar(previous, 1, tilted[edge], roll),
	];
	let spread = |role: usize| {
		let other = guesses[role].raw[role ^ 1];
		other.x.abs().max((other.y / settings.height).abs())
	};
	let role = if spread(0) > spread(1) { 0 } else { 1 };
	trace!(dot = edge, role, "guessed role of lone dot");

	Some(finish(guesses[role], roll))
}

/// Matches the visible dot nearest to either end of the previous bar.
fn follow_nearest(
	previous: &BarCandidate,
	health: Health,
	tilted: &[Vec2],
	roll: f64,
	settings: &PointerSettings,
) -> Option<BarCandidate> {
	let (distance, dot, role) = tilted
		.iter()
		.enumerate()
		.flat_map(|(i, dot)| {
			previous
				.tilted
				.iter()
				.enumerate()
				.map(move |(j, end)| (dot.distance_squared(*end), i, j))
		})
		.fold(None, |best: Option<(f64, usize, usize)>, item| match best {
			Some(best) if best.0 <= item.0 => Some(best),
			_ => Some(item),
		})?;

	if health == Health::Lost && distance >= settings.single_no_guess_distance {
		trace!(distance, "lone dot too far from lost bar");
		return None;
	}

	let bar = translate_bar(previous, role, tilted[dot], roll);
	let other = bar.raw[role ^ 1];
	if other.x.abs() < settings.off_screen_x && other.y.abs() < settings.off_screen_y {
		// The other emitter would be in view, yet no pair was found.
		trace!(?other, "reconstructed emitter should be visible");
		return None;
	}

	Some(finish(bar, roll))
}

fn closest_to_edge(dots: &[Vec2], height: f64) -> usize {
	let margin = |dot: &Vec2| (1. - dot.x.abs()).min(height - dot.y.abs());
	let mut best = 0;
	for (i, dot) in dots.iter().enumerate().skip(1) {
		if margin(dot) < margin(&dots[best]) {
			best = i;
		}
	}
	best
}

/// Places `dot` at end `role` of the previous bar and carries the other end
/// along, in the tilted frame.
fn translate_bar(previous: &BarCandidate, role: usize, dot: Vec2, roll: f64) -> BarCandidate {
	let mut tilted = [Vec2::ZERO; 2];
	tilted[role] = dot;
	tilted[role ^ 1] = previous.tilted[role ^ 1] - previous.tilted[role] + dot;

	BarCandidate {
		raw: rotate_pair(tilted, -roll),
		tilted,
		..*previous
	}
}

fn finish(mut bar: BarCandidate, roll: f64) -> BarCandidate {
	// Angles drift over successive guesses, so derive them again.
	let diff = bar.tilted[1] - bar.tilted[0];
	bar.offset_angle = -diff.y.atan2(diff.x);
	bar.angle = bar.offset_angle + roll;
	bar.corrected = rotate_pair(bar.tilted, bar.offset_angle);
	bar.score = 0.;
	bar
}
