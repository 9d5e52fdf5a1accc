use crate::modules::geom::Vec2;

/// Rotates `dot` by `theta` radians about the origin. A zero angle returns
/// the input untouched so level tracking stays bit-exact.
pub fn rotate_dot(dot: Vec2, theta: f64) -> Vec2 {
	if theta == 0. {
		return dot;
	}
	let (s, c) = theta.sin_cos();
	Vec2::new(c * dot.x - s * dot.y, s * dot.x + c * dot.y)
}

pub fn rotate(dots: &[Vec2], theta: f64) -> Vec<Vec2> {
	dots.iter().map(|&dot| rotate_dot(dot, theta)).collect()
}

pub fn rotate_pair(pair: [Vec2; 2], theta: f64) -> [Vec2; 2] {
	[rotate_dot(pair[0], theta), rotate_dot(pair[1], theta)]
}
