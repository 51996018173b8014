//! Force parameters and the centering/collision pass run after each
//! simulation step.

use force_graph::SimulationParameters;

/// Reference link distance that maps to the base spring constant.
const BASE_LINK_DISTANCE: f64 = 50.0;
const BASE_SPRING: f64 = 0.05;
/// Converts a many-body strength into the simulator's charge constant.
const CHARGE_SCALE: f64 = 1.5;

/// Rendered radius of a node with `degree` links.
pub fn node_radius(degree: usize) -> f64 {
	4.0 + (degree as f64).sqrt() * 2.0
}

/// Per-view force configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ForceParams {
	/// Preferred length of a link; longer means weaker attraction.
	pub link_distance: f64,
	/// Many-body strength; negative repels.
	pub charge: f64,
	/// Extra spacing added to each node's radius for collisions.
	pub collide_padding: f64,
}

impl ForceParams {
	/// Site-wide graph.
	pub const fn global() -> Self {
		Self {
			link_distance: 50.0,
			charge: -100.0,
			collide_padding: 2.0,
		}
	}

	/// Neighbourhood of a single page.
	pub const fn local() -> Self {
		Self {
			link_distance: 100.0,
			charge: -300.0,
			collide_padding: 2.0,
		}
	}

	pub fn simulation(&self) -> SimulationParameters {
		SimulationParameters {
			force_charge: (-self.charge * CHARGE_SCALE) as f32,
			force_spring: (BASE_SPRING * BASE_LINK_DISTANCE / self.link_distance.max(1.0)) as f32,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		}
	}
}

/// A node as seen by the settle pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
	pub x: f64,
	pub y: f64,
	/// Collision radius (rendered radius plus padding).
	pub radius: f64,
	/// Pinned bodies are never moved.
	pub pinned: bool,
}

/// Offsets that move the free bodies' centroid onto `center` and push
/// overlapping bodies apart. Returned in the same order as `bodies`.
pub fn settle(bodies: &[Body], center: (f64, f64)) -> Vec<(f64, f64)> {
	let mut offsets = vec![(0.0, 0.0); bodies.len()];
	let free = bodies.iter().filter(|b| !b.pinned).count();
	if free == 0 {
		return offsets;
	}

	let (sum_x, sum_y) = bodies
		.iter()
		.fold((0.0, 0.0), |(sx, sy), b| (sx + b.x, sy + b.y));
	let n = bodies.len() as f64;
	let shift = (center.0 - sum_x / n, center.1 - sum_y / n);
	for (offset, body) in offsets.iter_mut().zip(bodies) {
		if !body.pinned {
			*offset = shift;
		}
	}

	for i in 0..bodies.len() {
		for j in (i + 1)..bodies.len() {
			let (a, b) = (bodies[i], bodies[j]);
			let (ax, ay) = (a.x + offsets[i].0, a.y + offsets[i].1);
			let (bx, by) = (b.x + offsets[j].0, b.y + offsets[j].1);
			let (dx, dy) = (bx - ax, by - ay);
			let dist = dx.hypot(dy);
			let min = a.radius + b.radius;
			if dist >= min || dist < 1e-6 || (a.pinned && b.pinned) {
				continue;
			}
			let (ux, uy) = (dx / dist, dy / dist);
			let push = min - dist;
			// Split the correction between free bodies.
			let (share_a, share_b) = match (a.pinned, b.pinned) {
				(true, _) => (0.0, push),
				(_, true) => (push, 0.0),
				_ => (push / 2.0, push / 2.0),
			};
			offsets[i].0 -= ux * share_a;
			offsets[i].1 -= uy * share_a;
			offsets[j].0 += ux * share_b;
			offsets[j].1 += uy * share_b;
		}
	}
	offsets
}

/// Page URL for a graph node, under the site's base path.
pub fn node_href(base_url: &str, url: &str) -> String {
	let target = if url.starts_with('/') {
		url.to_owned()
	} else {
		format!("/{url}")
	};
	if !base_url.is_empty() && target.starts_with(base_url) {
		target
	} else {
		format!("{base_url}{target}")
	}
}
