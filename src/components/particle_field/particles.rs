//! Particle storage and (re)population.

use log::debug;
use rand::Rng;

use super::config::{EngineConfig, SampleRange};

/// A single floating particle. Only the position changes after creation.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub radius: f64,
	pub alpha: f64,
}

/// Owns the particle collection of one mounted engine.
#[derive(Debug, Default)]
pub struct ParticleField {
	pub particles: Vec<Particle>,
	width: f64,
	height: f64,
}

impl ParticleField {
	pub fn new() -> Self {
		Self::default()
	}

	/// Replaces every particle with a freshly sampled one for a `width` x `height` surface.
	///
	/// The count follows the density tier for `width`. Old particles are
	/// dropped; the allocation is reused.
	pub fn reinit<R: Rng>(&mut self, width: f64, height: f64, config: &EngineConfig, rng: &mut R) {
		let count = config.particle_count(width);
		self.particles.clear();
		self.particles.reserve(count);
		self.width = width;
		self.height = height;

		for _ in 0..count {
			self.particles.push(Particle {
				x: sample_extent(rng, width),
				y: sample_extent(rng, height),
				vx: sample(rng, config.velocity_range),
				vy: sample(rng, config.velocity_range),
				radius: sample(rng, config.radius_range),
				alpha: sample(rng, config.alpha_range),
			});
		}

		debug!("particle-field: reinit {count} particles for {width}x{height}");
	}

	pub fn len(&self) -> usize {
		self.particles.len()
	}

	pub fn is_empty(&self) -> bool {
		self.particles.is_empty()
	}

	/// Surface dimensions used by the last reinit.
	pub fn bounds(&self) -> (f64, f64) {
		(self.width, self.height)
	}

	/// Drops all particles, releasing the allocation.
	pub fn clear(&mut self) {
		self.particles = Vec::new();
		self.width = 0.0;
		self.height = 0.0;
	}
}

/// Uniform sample in `[range.min, range.max)`; a degenerate range yields `min`.
fn sample<R: Rng>(rng: &mut R, range: SampleRange) -> f64 {
	if range.is_degenerate() {
		range.min
	} else {
		rng.gen_range(range.min..range.max)
	}
}

/// Uniform coordinate in `[0, extent)`.
fn sample_extent<R: Rng>(rng: &mut R, extent: f64) -> f64 {
	if extent > 0.0 {
		rng.gen_range(0.0..extent)
	} else {
		0.0
	}
}
