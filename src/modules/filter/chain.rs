use crate::modules::filter::{
	AdaptiveSmoothing, ErrorFilter, GlitchFilter, RadiusSmoothing, TranslateFilter,
};
use crate::modules::{FilterModule, Frame};
use crate::settings::{FilterSettings, SmoothingSettings};

use std::time::Instant;

#[derive(Default)]
pub struct FilterChain {
	filters: Vec<Box<dyn FilterModule>>,
}

impl FilterModule for FilterChain {
	fn run_at(&mut self, frame: Frame, now: Instant) -> Frame {
		self.filters
			.iter_mut()
			.fold(frame, |frame, filter| filter.run_at(frame, now))
	}
}

impl FilterChain {
	pub fn new() -> Self {
		Self::default()
	}

	/// Dropout repair, glitch rejection, smoothing, then translation. Stages
	/// disabled in `settings` are left out.
	pub fn from_settings(settings: &FilterSettings) -> Self {
		let mut filters: Vec<Box<dyn FilterModule>> = vec![
			Box::new(ErrorFilter::from_settings(&settings.error)),
			Box::new(GlitchFilter::from_settings(&settings.glitch)),
		];

		match &settings.smoothing {
			SmoothingSettings::None => (),
			SmoothingSettings::Radius(radius) => {
				filters.push(Box::new(RadiusSmoothing::from_settings(radius)))
			}
			SmoothingSettings::Adaptive(adaptive) => {
				filters.push(Box::new(AdaptiveSmoothing::new(adaptive.clone())))
			}
		}

		if let Some(translate) = TranslateFilter::from_settings(&settings.translate) {
			filters.push(Box::new(translate));
		}

		Self { filters }
	}

	pub fn push(&mut self, filter: impl FilterModule + 'static) -> &mut Self {
		self.filters.push(Box::new(filter));
		self
	}

	pub fn len(&self) -> usize {
		self.filters.len()
	}

	pub fn is_empty(&self) -> bool {
		self.filters.is_empty()
	}
}
