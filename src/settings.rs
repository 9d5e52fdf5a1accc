use crate::error::{Error, Result};
use crate::modules::geom::{Rect, Vec2};

use serde::Deserialize;

use std::fs;
use std::path::Path;

/// Every tunable of the pointer engine and the filter chain. Each section
/// falls back to its defaults when absent from the settings file.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
	pub pointer: PointerSettings,
	pub roll: RollSettings,
	pub filter: FilterSettings,
}

impl Settings {
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let content = fs::read_to_string(path).map_err(|source| Error::ReadSettings {
			path: path.to_path_buf(),
			source,
		})?;
		Self::from_toml_str(&content)
	}

	pub fn from_toml_str(content: &str) -> Result<Self> {
		let settings: Settings = toml::from_str(content)?;
		settings.validate()?;
		Ok(settings)
	}

	pub fn validate(&self) -> Result<()> {
		self.pointer.validate()?;
		self.roll.validate()?;
		self.filter.validate()
	}
}

fn check(condition: bool, message: &str) -> Result<()> {
	if condition {
		Ok(())
	} else {
		Err(Error::InvalidSettings(message.to_string()))
	}
}

/// Which candidate wins when several pairs pass the geometric checks in
/// one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CandidatePreference {
	Narrowest,
	Widest,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PointerSettings {
	pub height: f64,
	pub max_slope: f64,
	pub min_width: f64,
	/// Center to center distance of the two emitters, in cm.
	pub bar_width: f64,
	pub dot_width: f64,
	pub dot_height: f64,
	/// A reconstructed emitter closer to the center than these bounds should
	/// have been visible, so the reconstruction is rejected. Zero disables it.
	pub off_screen_x: f64,
	pub off_screen_y: f64,
	/// Squared distance under which a reappearing dot is matched to the old
	/// bar instead of guessing its role.
	pub single_no_guess_distance: f64,
	/// Distance from the FOV center to its left or right edge at one meter.
	pub fov_coefficient: f64,
	pub candidate_preference: CandidatePreference,
}

impl Default for PointerSettings {
	fn default() -> Self {
		Self {
			height: 384. / 512.,
			max_slope: 0.7, // tan(35 degrees)
			min_width: 0.1,
			bar_width: 19.5,
			dot_width: 2.25,
			dot_height: 1.0,
			off_screen_x: 0.,
			off_screen_y: 0.,
			single_no_guess_distance: 100. * 100.,
			fov_coefficient: 0.39,
			candidate_preference: CandidatePreference::Narrowest,
		}
	}
}

impl PointerSettings {
	/// Distance to the sensor bar in meters for a bar imaged `width` units
	/// wide in the corrected frame.
	pub fn distance_for_width(&self, width: f64) -> f64 {
		(self.bar_width / 100.) / (self.fov_coefficient * width)
	}

	fn validate(&self) -> Result<()> {
		check(self.height > 0., "pointer.height must be positive")?;
		check(self.max_slope > 0., "pointer.max_slope must be positive")?;
		check(self.min_width > 0., "pointer.min_width must be positive")?;
		check(self.bar_width > 0., "pointer.bar_width must be positive")?;
		check(self.dot_width >= 0., "pointer.dot_width must not be negative")?;
		check(self.dot_height >= 0., "pointer.dot_height must not be negative")?;
		check(
			self.off_screen_x >= 0. && self.off_screen_y >= 0.,
			"pointer.off_screen_x/y must not be negative",
		)?;
		check(
			self.single_no_guess_distance >= 0.,
			"pointer.single_no_guess_distance must not be negative",
		)?;
		check(self.fov_coefficient > 0., "pointer.fov_coefficient must be positive")
	}
}

/// Accelerometer component paired with `x` when deriving roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RollAxis {
	Y,
	Z,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RollSettings {
	pub axis: RollAxis,
	pub gravity: f64,
	/// Relative deviation from `gravity` above which the reading is treated
	/// as linear acceleration and the last good roll is kept.
	pub tolerance: f64,
}

impl Default for RollSettings {
	fn default() -> Self {
		Self {
			axis: RollAxis::Z,
			gravity: 1.,
			tolerance: 0.2,
		}
	}
}

impl RollSettings {
	fn validate(&self) -> Result<()> {
		check(self.gravity > 0., "roll.gravity must be positive")?;
		check(self.tolerance > 0., "roll.tolerance must be positive")
	}
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterSettings {
	pub error: ErrorFilterSettings,
	pub glitch: GlitchFilterSettings,
	pub smoothing: SmoothingSettings,
	pub translate: TranslateSettings,
}

impl FilterSettings {
	fn validate(&self) -> Result<()> {
		self.glitch.validate()?;
		self.smoothing.validate()?;
		self.translate.validate()
	}
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ErrorFilterSettings {
	pub max_count: u32,
}

impl Default for ErrorFilterSettings {
	fn default() -> Self {
		Self { max_count: 8 }
	}
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlitchFilterSettings {
	pub max_count: u32,
	pub distance_squared: f64,
}

impl Default for GlitchFilterSettings {
	fn default() -> Self {
		Self {
			max_count: 5,
			distance_squared: 150. * 150.,
		}
	}
}

impl GlitchFilterSettings {
	fn validate(&self) -> Result<()> {
		check(
			self.distance_squared >= 0.,
			"filter.glitch.distance_squared must not be negative",
		)
	}
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct RadiusSmoothingSettings {
	pub radius: f64,
	pub speed: f64,
	pub deadzone: f64,
}

impl Default for RadiusSmoothingSettings {
	fn default() -> Self {
		Self {
			radius: 8.,
			speed: 0.25,
			deadzone: 2.5,
		}
	}
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct AdaptiveSmoothingSettings {
	pub min_cutoff: f64,
	pub beta: f64,
	pub d_cutoff: f64,
}

impl Default for AdaptiveSmoothingSettings {
	fn default() -> Self {
		Self {
			min_cutoff: 1.,
			beta: 0.007,
			d_cutoff: 1.,
		}
	}
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SmoothingSettings {
	None,
	Radius(RadiusSmoothingSettings),
	Adaptive(AdaptiveSmoothingSettings),
}

impl Default for SmoothingSettings {
	fn default() -> Self {
		SmoothingSettings::Radius(RadiusSmoothingSettings::default())
	}
}

impl SmoothingSettings {
	fn validate(&self) -> Result<()> {
		match self {
			SmoothingSettings::None => Ok(()),
			SmoothingSettings::Radius(radius) => {
				check(radius.radius > 0., "filter.smoothing.radius must be positive")?;
				check(
					radius.speed > 0. && radius.speed <= 1.,
					"filter.smoothing.speed must be in (0, 1]",
				)?;
				check(
					radius.deadzone >= 0. && radius.deadzone <= radius.radius,
					"filter.smoothing.deadzone must be between 0 and the radius",
				)
			}
			SmoothingSettings::Adaptive(adaptive) => {
				check(adaptive.min_cutoff > 0., "filter.smoothing.min_cutoff must be positive")?;
				check(adaptive.beta >= 0., "filter.smoothing.beta must not be negative")?;
				check(adaptive.d_cutoff > 0., "filter.smoothing.d_cutoff must be positive")
			}
		}
	}
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "preset", rename_all = "kebab-case")]
pub enum TranslateSettings {
	None,
	SafeTop,
	SafeBottom,
	WideTop,
	WideBottom,
	Custom {
		source: Rect,
		destination: Rect,
		#[serde(default)]
		clamp: bool,
	},
}

impl Default for TranslateSettings {
	fn default() -> Self {
		TranslateSettings::SafeTop
	}
}

const UNIT_SQUARE: Rect = Rect::new(Vec2::new(-1., -1.), Vec2::new(1., 1.));

impl TranslateSettings {
	pub fn mapping(&self) -> Option<(Rect, Rect, bool)> {
		let source = |min_x: f64, min_y: f64, max_x: f64, max_y: f64| {
			Rect::new(Vec2::new(min_x, min_y), Vec2::new(max_x, max_y))
		};
		match *self {
			TranslateSettings::None => None,
			TranslateSettings::SafeTop => Some((source(-340., -92., 340., 290.), UNIT_SQUARE, true)),
			TranslateSettings::SafeBottom => Some((source(-340., -290., 340., 92.), UNIT_SQUARE, true)),
			TranslateSettings::WideTop => Some((source(-430., -194., 430., 290.), UNIT_SQUARE, true)),
			TranslateSettings::WideBottom => Some((source(-430., -290., 430., 194.), UNIT_SQUARE, true)),
			TranslateSettings::Custom {
				source,
				destination,
				clamp,
			} => Some((source, destination, clamp)),
		}
	}

	fn validate(&self) -> Result<()> {
		match self.mapping() {
			Some((source, destination, _)) => check(
				!source.is_empty() && !destination.is_empty(),
				"filter.translate rectangles must not be empty",
			),
			None => Ok(()),
		}
	}
}
