use crate::modules::geom::Rect;
use crate::modules::{FilterModule, Frame};
use crate::settings::TranslateSettings;

use std::time::Instant;

/// Maps pointer space onto a destination rectangle, such as a screen.
pub struct TranslateFilter {
	source: Rect,
	destination: Rect,
	clamp: bool,
}

impl FilterModule for TranslateFilter {
	fn run_at(&mut self, mut frame: Frame, _now: Instant) -> Frame {
		if !frame.valid {
			return frame;
		}

		frame.valid = self.clamp || self.source.contains(frame.position);
		match self.source.map_to(frame.position, &self.destination, self.clamp) {
			Some(position) => frame.position = position,
			None => frame.valid = false,
		}
		frame
	}
}

impl TranslateFilter {
	pub fn new(source: Rect, destination: Rect, clamp: bool) -> Self {
		Self {
			source,
			destination,
			clamp,
		}
	}

	pub fn from_settings(settings: &TranslateSettings) -> Option<Self> {
		settings
			.mapping()
			.map(|(source, destination, clamp)| Self::new(source, destination, clamp))
	}

	pub fn safe_top() -> Self {
		Self::preset(&TranslateSettings::SafeTop)
	}

	pub fn safe_bottom() -> Self {
		Self::preset(&TranslateSettings::SafeBottom)
	}

	pub fn wide_top() -> Self {
		Self::preset(&TranslateSettings::WideTop)
	}

	pub fn wide_bottom() -> Self {
		Self::preset(&TranslateSettings::WideBottom)
	}

	fn preset(settings: &TranslateSettings) -> Self {
		let (source, destination, clamp) = settings
			.mapping()
			.unwrap_or((Rect::default(), Rect::default(), false));
		Self::new(source, destination, clamp)
	}

	pub fn source(&self) -> Rect {
		self.source
	}

	pub fn destination(&self) -> Rect {
		self.destination
	}

	pub fn is_clamped(&self) -> bool {
		self.clamp
	}
}

impl Default for TranslateFilter {
	fn default() -> Self {
		Self::safe_top()
	}
}
