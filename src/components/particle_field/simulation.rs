//! Per-frame particle motion with toroidal wrap-around.

use super::particles::ParticleField;

/// Moves every particle by its velocity, wrapping positions into `[0, width) x [0, height)`.
pub fn advance(field: &mut ParticleField, width: f64, height: f64) {
	for p in &mut field.particles {
		p.x = wrap(p.x + p.vx, width);
		p.y = wrap(p.y + p.vy, height);
	}
}

/// Wraps `value` onto `[0, extent)`. A non-positive extent pins to 0.
fn wrap(value: f64, extent: f64) -> f64 {
	if extent <= 0.0 {
		return 0.0;
	}
	let wrapped = value.rem_euclid(extent);
	// rem_euclid can round up to `extent` for tiny negative inputs
	if wrapped >= extent { 0.0 } else { wrapped }
}
