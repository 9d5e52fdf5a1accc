use crate::modules::geom::Vec2;

pub const SLOT_MAX: u16 = 1023;

pub const INACTIVE: (u16, u16) = (SLOT_MAX, SLOT_MAX);

/// One active camera slot in native sensor coordinates, origin at the
/// bottom-left of the field of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawDot {
	pub x: u16,
	pub y: u16,
}

pub type Slots = [Option<RawDot>; 4];

impl RawDot {
	pub fn from_wire(x: u16, y: u16) -> Option<RawDot> {
		if (x, y) == INACTIVE {
			None
		} else {
			Some(RawDot { x, y })
		}
	}

	/// Maps onto the signed camera plane: x flipped and centered to -1..1,
	/// y centered to roughly -0.75..0.75.
	pub fn normalize(self) -> Vec2 {
		debug_assert!(
			self.x <= SLOT_MAX && self.y <= SLOT_MAX,
			"slot coordinates out of range: {:?}",
			self
		);
		debug_assert_ne!((self.x, self.y), INACTIVE, "inactive slot passed as a dot");
		Vec2::new(-(f64::from(self.x) - 512.) / 512., (f64::from(self.y) - 384.) / 512.)
	}
}

pub fn slots_from_wire(wire: [(u16, u16); 4]) -> Slots {
	wire.map(|(x, y)| RawDot::from_wire(x, y))
}

pub fn find_dots(slots: &Slots) -> Vec<Vec2> {
	slots.iter().flatten().map(|raw| raw.normalize()).collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	use approx::assert_abs_diff_eq;

	#[test]
	fn center_and_edge_mapping() {
		let center = RawDot { x: 512, y: 384 }.normalize();
		assert_eq!(center, Vec2::ZERO);

		let left = RawDot { x: 0, y: 384 }.normalize();
		assert_eq!(left, Vec2::new(1., 0.));

		let right = RawDot { x: 1023, y: 384 }.normalize();
		assert_abs_diff_eq!(right.x, -(1023. - 512.) / 512.);
		assert_abs_diff_eq!(right.y, 0.);
	}

	#[test]
	fn inactive_sentinel_is_dropped_in_any_position() {
		for inactive in 0..4 {
			let mut wire = [(512, 384), (0, 384), (100, 200), (700, 500)];
			wire[inactive] = INACTIVE;
			let slots = slots_from_wire(wire);
			assert_eq!(slots[inactive], None);

			let dots = find_dots(&slots);
			assert_eq!(dots.len(), 3);
			assert!(dots.iter().all(|d| d.x.abs() <= 1. && d.y.abs() <= 1.));
		}
	}

	#[test]
	fn only_both_coordinates_at_max_mean_inactive() {
		assert_eq!(RawDot::from_wire(1023, 1023), None);
		assert_eq!(RawDot::from_wire(1023, 384), Some(RawDot { x: 1023, y: 384 }));
		assert_eq!(RawDot::from_wire(512, 1023), Some(RawDot { x: 512, y: 1023 }));
	}

	#[test]
	#[cfg(debug_assertions)]
	#[should_panic(expected = "inactive slot")]
	fn inactive_sentinel_as_dot_is_caught() {
		find_dots(&[Some(RawDot { x: 1023, y: 1023 }), None, None, None]);
	}

	#[test]
	fn no_active_slots_gives_no_dots() {
		assert!(find_dots(&[None; 4]).is_empty());
	}
}
