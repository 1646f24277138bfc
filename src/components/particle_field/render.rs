//! Frame rendering for the particle field.
//!
//! Each frame is drawn in two passes over a cleared surface:
//! 1. Particles as filled discs at their own alpha
//! 2. Proximity links between every pair closer than the link distance
//!
//! Link detection is the O(n²) part of a frame. Pairs are rejected on squared
//! distance; the square root is only taken for pairs that get drawn.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::config::{Color, EngineConfig};
use super::particles::{Particle, ParticleField};

/// Minimal 2D drawing target.
pub trait Surface {
	/// Clears the `width` x `height` area starting at the origin.
	fn clear(&mut self, width: f64, height: f64);
	fn fill_disc(&mut self, x: f64, y: f64, radius: f64, color: Color);
	fn stroke_segment(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Color);
}

impl Surface for CanvasRenderingContext2d {
	fn clear(&mut self, width: f64, height: f64) {
		self.clear_rect(0.0, 0.0, width, height);
	}

	fn fill_disc(&mut self, x: f64, y: f64, radius: f64, color: Color) {
		self.set_fill_style_str(&color.to_css());
		self.begin_path();
		let _ = self.arc(x, y, radius, 0.0, PI * 2.0);
		self.fill();
	}

	fn stroke_segment(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Color) {
		self.set_stroke_style_str(&color.to_css());
		self.set_line_width(width);
		self.begin_path();
		self.move_to(from.0, from.1);
		self.line_to(to.0, to.1);
		self.stroke();
	}
}

/// Opacity of a link between two particles `distance` apart.
///
/// Falls off linearly from `link_opacity_scale` at zero distance to 0 at the
/// link distance, and is 0 beyond it.
pub fn link_opacity(distance: f64, config: &EngineConfig) -> f64 {
	if config.link_distance <= 0.0 || distance >= config.link_distance {
		return 0.0;
	}
	config.link_opacity_scale * (1.0 - distance / config.link_distance)
}

/// Calls `visit(i, j, distance)` once for every unordered pair `i < j` closer than `link_distance`.
pub fn visit_links(particles: &[Particle], link_distance: f64, mut visit: impl FnMut(usize, usize, f64)) {
	let max_sq = link_distance * link_distance;
	for (i, a) in particles.iter().enumerate() {
		for (j, b) in particles.iter().enumerate().skip(i + 1) {
			let (dx, dy) = (a.x - b.x, a.y - b.y);
			let dist_sq = dx * dx + dy * dy;
			if dist_sq < max_sq {
				visit(i, j, dist_sq.sqrt());
			}
		}
	}
}

/// Draws one frame of `field` onto `surface`.
pub fn draw_frame<S: Surface + ?Sized>(
	field: &ParticleField,
	surface: &mut S,
	config: &EngineConfig,
	width: f64,
	height: f64,
) {
	surface.clear(width, height);

	for p in &field.particles {
		surface.fill_disc(p.x, p.y, p.radius, config.particle_color.with_alpha(p.alpha));
	}

	let particles = &field.particles;
	visit_links(particles, config.link_distance, |i, j, distance| {
		let opacity = link_opacity(distance, config);
		if opacity <= 0.0 {
			return;
		}
		let (a, b) = (&particles[i], &particles[j]);
		surface.stroke_segment(
			(a.x, a.y),
			(b.x, b.y),
			config.link_width,
			config.link_color_base.with_alpha(opacity),
		);
	});
}

#[cfg(test)]
mod tests {
	use super::super::test_host::{DrawCall, RecordingSurface};
	use super::*;

	fn at(x: f64, y: f64) -> Particle {
		Particle {
			x,
			y,
			vx: 0.0,
			vy: 0.0,
			radius: 2.0,
			alpha: 0.4,
		}
	}

	fn field_of(points: &[(f64, f64)]) -> ParticleField {
		let mut field = ParticleField::new();
		field.particles = points.iter().map(|&(x, y)| at(x, y)).collect();
		field
	}

	#[test]
	fn opacity_is_full_scale_at_zero_and_zero_at_cutoff() {
		let config = EngineConfig::hero();
		assert_eq!(link_opacity(0.0, &config), config.link_opacity_scale);
		assert_eq!(link_opacity(config.link_distance, &config), 0.0);
		assert_eq!(link_opacity(config.link_distance + 1.0, &config), 0.0);
	}

	#[test]
	fn opacity_falls_off_linearly() {
		let config = EngineConfig::ambient();
		let half = link_opacity(config.link_distance / 2.0, &config);
		assert!((half - config.link_opacity_scale / 2.0).abs() < 1e-12);
	}

	#[test]
	fn zero_link_distance_disables_links() {
		let config = EngineConfig {
			link_distance: 0.0,
			..EngineConfig::ambient()
		};
		assert_eq!(link_opacity(0.0, &config), 0.0);
	}

	#[test]
	fn each_close_pair_visited_once() {
		let field = field_of(&[(0.0, 0.0), (10.0, 0.0), (20.0, 0.0), (500.0, 500.0)]);
		let mut pairs = Vec::new();
		visit_links(&field.particles, 120.0, |i, j, _| pairs.push((i, j)));
		assert_eq!(pairs, vec![(0, 1), (0, 2), (1, 2)]);
	}

	#[test]
	fn pair_at_exact_cutoff_is_not_linked() {
		let field = field_of(&[(0.0, 0.0), (120.0, 0.0)]);
		let mut count = 0;
		visit_links(&field.particles, 120.0, |_, _, _| count += 1);
		assert_eq!(count, 0);
	}

	#[test]
	fn frame_clears_then_draws_discs_then_links() {
		let config = EngineConfig::hero();
		let field = field_of(&[(0.0, 0.0), (100.0, 0.0)]);
		let mut surface = RecordingSurface::default();

		draw_frame(&field, &mut surface, &config, 1000.0, 800.0);

		assert_eq!(surface.calls.len(), 4);
		assert_eq!(surface.calls[0], DrawCall::Clear { width: 1000.0, height: 800.0 });
		assert!(matches!(surface.calls[1], DrawCall::Disc { x, .. } if x == 0.0));
		assert!(matches!(surface.calls[2], DrawCall::Disc { x, .. } if x == 100.0));

		let DrawCall::Segment { from, to, width, color } = surface.calls[3] else {
			panic!("expected a link, got {:?}", surface.calls[3]);
		};
		assert_eq!((from, to), ((0.0, 0.0), (100.0, 0.0)));
		assert_eq!(width, config.link_width);
		let expected = config.link_opacity_scale / 6.0;
		assert!((color.a - expected).abs() < 1e-12, "opacity = {}", color.a);
	}

	#[test]
	fn discs_use_particle_alpha_and_configured_color() {
		let config = EngineConfig::ambient();
		let field = field_of(&[(5.0, 5.0)]);
		let mut surface = RecordingSurface::default();

		draw_frame(&field, &mut surface, &config, 10.0, 10.0);

		assert_eq!(
			surface.calls[1],
			DrawCall::Disc {
				x: 5.0,
				y: 5.0,
				radius: 2.0,
				color: config.particle_color.with_alpha(0.4),
			}
		);
	}

	#[test]
	fn distant_particles_draw_no_links() {
		let config = EngineConfig::ambient();
		let field = field_of(&[(0.0, 0.0), (300.0, 300.0), (600.0, 0.0)]);
		let mut surface = RecordingSurface::default();

		draw_frame(&field, &mut surface, &config, 1000.0, 800.0);

		assert_eq!(surface.segments().count(), 0);
		assert_eq!(surface.discs().count(), 3);
	}
}
