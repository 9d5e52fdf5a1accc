use serde::Deserialize;

use std::ops::{Add, Mul, Sub};

/// A point or vector, either in the normalized camera plane or in
/// pseudo-pixel pointer space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
pub struct Vec2 {
	pub x: f64,
	pub y: f64,
}

impl Vec2 {
	pub const ZERO: Vec2 = Vec2 { x: 0., y: 0. };

	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn norm_squared(self) -> f64 {
		self.x * self.x + self.y * self.y
	}

	pub fn norm(self) -> f64 {
		self.norm_squared().sqrt()
	}

	pub fn distance_squared(self, other: Vec2) -> f64 {
		(other - self).norm_squared()
	}

	pub fn midpoint(self, other: Vec2) -> Vec2 {
		Vec2::new((self.x + other.x) / 2., (self.y + other.y) / 2.)
	}
}

impl Add for Vec2 {
	type Output = Vec2;

	fn add(self, rhs: Vec2) -> Vec2 {
		Vec2::new(self.x + rhs.x, self.y + rhs.y)
	}
}

impl Sub for Vec2 {
	type Output = Vec2;

	fn sub(self, rhs: Vec2) -> Vec2 {
		Vec2::new(self.x - rhs.x, self.y - rhs.y)
	}
}

impl Mul<f64> for Vec2 {
	type Output = Vec2;

	fn mul(self, rhs: f64) -> Vec2 {
		Vec2::new(self.x * rhs, self.y * rhs)
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
pub struct Rect {
	pub min: Vec2,
	pub max: Vec2,
}

impl Rect {
	pub const fn new(min: Vec2, max: Vec2) -> Self {
		Self { min, max }
	}

	pub fn width(&self) -> f64 {
		self.max.x - self.min.x
	}

	pub fn height(&self) -> f64 {
		self.max.y - self.min.y
	}

	pub fn is_empty(&self) -> bool {
		self.max.x <= self.min.x || self.max.y <= self.min.y
	}

	pub fn contains(&self, p: Vec2) -> bool {
		p.x >= self.min.x && p.x < self.max.x && p.y >= self.min.y && p.y < self.max.y
	}

	pub fn clamp(&self, p: Vec2) -> Vec2 {
		Vec2::new(p.x.max(self.min.x).min(self.max.x), p.y.max(self.min.y).min(self.max.y))
	}

	/// Maps `p` from this rectangle onto `dest` with an axis-aligned affine
	/// transform. With `clamp` the point is clipped to this rectangle first.
	/// Returns `None` when either rectangle is empty.
	pub fn map_to(&self, p: Vec2, dest: &Rect, clamp: bool) -> Option<Vec2> {
		if self.is_empty() || dest.is_empty() {
			return None;
		}
		let p = if clamp { self.clamp(p) } else { p };

		let u = (p.x - self.min.x) / self.width();
		let v = (p.y - self.min.y) / self.height();

		Some(Vec2::new(dest.min.x + u * dest.width(), dest.min.y + v * dest.height()))
	}
}
