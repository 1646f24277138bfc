//! Engine configuration and tuning profiles.
//!
//! An [`EngineConfig`] is fixed for the life of an engine. The two built-in
//! profiles differ only in density, motion and style constants: `ambient` is
//! the subdued page background, `hero` the brighter landing variant.

use log::warn;
use serde::{Deserialize, Serialize};

/// Surface width (CSS pixels) below which the mobile density tier applies.
pub const MOBILE_BREAKPOINT: f64 = 768.0;

/// Quiet period before a burst of resize events triggers a reinit.
pub const RESIZE_DEBOUNCE_MS: u32 = 100;

/// Upper bound on either density tier. Linking is quadratic in the count, so
/// larger fields stall the frame loop.
pub const MAX_PARTICLES: usize = 500;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	#[serde(default = "opaque")]
	pub a: f64,
}

fn opaque() -> f64 {
	1.0
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Closed value bounds `[min, max]`.
///
/// Particles sample from `[min, max)`, so [`contains`](Self::contains) holds for every sample.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SampleRange {
	pub min: f64,
	pub max: f64,
}

impl SampleRange {
	pub const fn new(min: f64, max: f64) -> Self {
		Self { min, max }
	}

	/// Symmetric range `[-magnitude, magnitude]`.
	pub const fn symmetric(magnitude: f64) -> Self {
		Self {
			min: -magnitude,
			max: magnitude,
		}
	}

	pub fn is_degenerate(&self) -> bool {
		self.max <= self.min
	}

	/// Both bounds are finite and so is the width between them.
	pub fn is_finite(&self) -> bool {
		self.min.is_finite() && self.max.is_finite() && (self.max - self.min).is_finite()
	}

	pub fn contains(&self, value: f64) -> bool {
		value >= self.min && value <= self.max
	}
}

/// Named tuning presets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
	/// Subdued cyan field used behind content pages.
	#[default]
	Ambient,
	/// Brighter, denser-looking white field for landing sections.
	Hero,
}

/// Immutable engine configuration.
///
/// Deserializes from partial JSON; missing fields take the ambient defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
	/// Particle count when the surface is narrower than [`MOBILE_BREAKPOINT`].
	pub particle_count_mobile: usize,
	/// Particle count at or above the breakpoint.
	pub particle_count_desktop: usize,
	/// Per-axis velocity bounds (pixels per frame).
	pub velocity_range: SampleRange,
	pub radius_range: SampleRange,
	pub alpha_range: SampleRange,
	/// Maximum distance (pixels) at which two particles are linked.
	pub link_distance: f64,
	pub particle_color: Color,
	/// Link stroke color; its alpha is replaced by the computed link opacity.
	pub link_color_base: Color,
	/// Link opacity at zero distance.
	pub link_opacity_scale: f64,
	pub link_width: f64,
	/// CSS opacity applied to the whole canvas element.
	pub surface_opacity: f64,
}

impl EngineConfig {
	/// Subdued cyan background field.
	pub fn ambient() -> Self {
		Self {
			particle_count_mobile: 30,
			particle_count_desktop: 50,
			velocity_range: SampleRange::symmetric(0.1),
			radius_range: SampleRange::new(2.2, 4.0),
			alpha_range: SampleRange::new(0.2, 0.45),
			link_distance: 120.0,
			particle_color: Color::rgb(0, 200, 255),
			link_color_base: Color::rgb(0, 200, 255),
			link_opacity_scale: 0.15,
			link_width: 0.6,
			surface_opacity: 0.8,
		}
	}

	/// Brighter white field with larger, faster particles.
	pub fn hero() -> Self {
		Self {
			particle_count_mobile: 30,
			particle_count_desktop: 50,
			velocity_range: SampleRange::symmetric(0.175),
			radius_range: SampleRange::new(3.5, 5.5),
			alpha_range: SampleRange::new(0.35, 0.7),
			link_distance: 120.0,
			particle_color: Color::rgb(255, 255, 255),
			link_color_base: Color::rgb(255, 255, 255),
			link_opacity_scale: 0.25,
			link_width: 1.2,
			surface_opacity: 0.9,
		}
	}

	pub fn for_profile(profile: Profile) -> Self {
		match profile {
			Profile::Ambient => Self::ambient(),
			Profile::Hero => Self::hero(),
		}
	}

	/// Density tier for a surface of the given width.
	pub fn particle_count(&self, width: f64) -> usize {
		if width < MOBILE_BREAKPOINT {
			self.particle_count_mobile
		} else {
			self.particle_count_desktop
		}
	}

	/// Normalizes values that would make sampling or link falloff ill-defined.
	///
	/// Unusable ranges fall back to the ambient preset.
	pub fn validated(self) -> Self {
		self.validated_against(&Self::ambient())
	}

	/// Like [`validated`](Self::validated), taking replacement ranges from `fallback`.
	pub fn validated_against(mut self, fallback: &EngineConfig) -> Self {
		for (name, range, default) in [
			("velocity_range", &mut self.velocity_range, fallback.velocity_range),
			("radius_range", &mut self.radius_range, fallback.radius_range),
			("alpha_range", &mut self.alpha_range, fallback.alpha_range),
		] {
			if !range.is_finite() {
				warn!("particle-field: {name} {range:?} is not finite, using {default:?}");
				*range = default;
			} else if range.min > range.max {
				warn!("particle-field: {name} has min > max, swapping bounds");
				std::mem::swap(&mut range.min, &mut range.max);
			}
		}
		for (name, count) in [
			("particle_count_mobile", &mut self.particle_count_mobile),
			("particle_count_desktop", &mut self.particle_count_desktop),
		] {
			if *count > MAX_PARTICLES {
				warn!("particle-field: {name} {count} capped at {MAX_PARTICLES}");
				*count = MAX_PARTICLES;
			}
		}
		if self.radius_range.min < 0.0 {
			warn!("particle-field: negative radius clamped to 0");
			self.radius_range.min = 0.0;
			self.radius_range.max = self.radius_range.max.max(0.0);
		}
		let (lo, hi) = (
			self.alpha_range.min.clamp(0.0, 1.0),
			self.alpha_range.max.clamp(0.0, 1.0),
		);
		if lo != self.alpha_range.min || hi != self.alpha_range.max {
			warn!("particle-field: alpha_range clamped to [0, 1]");
			self.alpha_range = SampleRange::new(lo, hi);
		}
		if self.link_distance.is_nan() || self.link_distance <= 0.0 {
			warn!(
				"particle-field: link_distance {} is not positive, links disabled",
				self.link_distance
			);
			self.link_distance = 0.0;
		}
		self
	}
}

impl Default for EngineConfig {
	fn default() -> Self {
		Self::ambient()
	}
}

/// Page-level configuration document: a profile plus optional overrides.
///
/// ```json
/// { "profile": "hero", "config": { "link_distance": 150.0 } }
/// ```
#[derive(Clone, Debug, Default, Deserialize)]
pub struct FieldSettings {
	#[serde(default)]
	pub profile: Profile,
	#[serde(default)]
	pub config: Option<serde_json::Value>,
}

impl FieldSettings {
	/// Resolves the profile preset, then applies any overrides on top of it.
	pub fn resolve(&self) -> Result<EngineConfig, serde_json::Error> {
		let base = EngineConfig::for_profile(self.profile);
		let Some(overrides) = &self.config else {
			return Ok(base);
		};
		let serde_json::Value::Object(fields) = overrides else {
			return serde_json::from_value(overrides.clone());
		};
		let serde_json::Value::Object(mut merged) = serde_json::to_value(&base)? else {
			return Ok(base);
		};
		for (key, value) in fields {
			merged.insert(key.clone(), value.clone());
		}
		let config: EngineConfig = serde_json::from_value(serde_json::Value::Object(merged))?;
		Ok(config.validated_against(&base))
	}
}
