//! Engine lifecycle: mount, frame loop, debounced resize and teardown.
//!
//! The engine is host-agnostic. Everything it needs from the environment
//! (frame callbacks, timers, resize notifications, the drawing surface) goes
//! through [`FrameHost`]. The host calls back into the engine:
//!
//! - [`ParticleEngine::on_frame`] when a requested frame fires
//! - [`ParticleEngine::on_resize`] for every viewport resize event
//! - [`ParticleEngine::on_resize_settled`] when the debounce timer fires
//!
//! State machine: `Uninitialized -> Running -> Stopped`. A mount against a
//! zero-sized surface stays `Uninitialized` until a settled resize reports a
//! usable size.

use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::config::{EngineConfig, RESIZE_DEBOUNCE_MS};
use super::particles::ParticleField;
use super::render::{self, Surface};
use super::simulation;
use super::viewport::{self, Debounce};

/// Handle of a scheduled animation frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// Handle of a scheduled one-shot timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub i32);

/// Environment services the engine schedules against.
///
/// Scheduling calls return `None` when the host refused the request; the
/// engine then treats nothing as pending.
pub trait FrameHost {
	type Surface: Surface;

	fn surface(&mut self) -> &mut Self::Surface;
	/// Current viewport size, or `None` if it cannot be determined.
	fn viewport_size(&self) -> Option<(f64, f64)>;
	fn resize_surface(&mut self, width: f64, height: f64);
	fn request_frame(&mut self) -> Option<FrameHandle>;
	fn cancel_frame(&mut self, handle: FrameHandle);
	fn start_timer(&mut self, delay_ms: u32) -> Option<TimerHandle>;
	fn clear_timer(&mut self, handle: TimerHandle);
	/// Starts delivering resize events. Returns `false` if the listener could not be attached.
	fn listen_resize(&mut self) -> bool;
	fn unlisten_resize(&mut self);
}

/// Lifecycle state of a mounted engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
	Uninitialized,
	Running,
	/// Terminal.
	Stopped,
}

/// One particle field bound to one host surface.
pub struct ParticleEngine<H: FrameHost> {
	host: H,
	config: EngineConfig,
	field: ParticleField,
	rng: SmallRng,
	state: EngineState,
	mounted: bool,
	listening: bool,
	frame: Option<FrameHandle>,
	resize: Debounce,
	size: (f64, f64),
	generation: u64,
}

impl<H: FrameHost> ParticleEngine<H> {
	pub fn new(host: H, config: EngineConfig, seed: u64) -> Self {
		Self {
			host,
			config: config.validated(),
			field: ParticleField::new(),
			rng: SmallRng::seed_from_u64(seed),
			state: EngineState::Uninitialized,
			mounted: false,
			listening: false,
			frame: None,
			resize: Debounce::new(RESIZE_DEBOUNCE_MS),
			size: (0.0, 0.0),
			generation: 0,
		}
	}

	/// Sizes the surface, populates the field and starts the frame loop.
	///
	/// Ignored after the first call. With no usable surface size only the
	/// resize listener is attached.
	pub fn on_mount(&mut self) {
		if self.mounted || self.state == EngineState::Stopped {
			return;
		}
		self.mounted = true;
		self.listening = self.host.listen_resize();
		if !self.listening {
			warn!("particle-field: resize listener not attached, field will not follow the viewport");
		}

		if self.rebuild() {
			info!(
				"particle-field: mounted with {} particles on {}x{}",
				self.field.len(),
				self.size.0,
				self.size.1
			);
		} else {
			warn!("particle-field: surface has no usable size, waiting for resize");
		}
	}

	/// Restarts the resize quiet period.
	pub fn on_resize(&mut self) {
		if !self.mounted || self.state == EngineState::Stopped {
			return;
		}
		self.resize.trigger(&mut self.host);
	}

	/// Rebuilds the field for the current viewport once resizing has settled.
	pub fn on_resize_settled(&mut self) {
		if !self.resize.settle() || self.state == EngineState::Stopped {
			return;
		}
		if self.rebuild() {
			debug!(
				"particle-field: resize settled at {}x{} (generation {})",
				self.size.0, self.size.1, self.generation
			);
		} else {
			warn!("particle-field: settled resize left no usable surface");
		}
	}

	/// Advances and draws one frame, then schedules the next.
	pub fn on_frame(&mut self) {
		self.frame = None;
		if self.state != EngineState::Running {
			return;
		}

		let (width, height) = self.size;
		simulation::advance(&mut self.field, width, height);
		render::draw_frame(&self.field, self.host.surface(), &self.config, width, height);

		self.schedule_frame();
	}

	/// Cancels the pending frame and resize timer, detaches the listener and drops the field.
	pub fn on_unmount(&mut self) {
		if self.state == EngineState::Stopped {
			return;
		}
		if let Some(handle) = self.frame.take() {
			self.host.cancel_frame(handle);
		}
		self.resize.cancel(&mut self.host);
		if self.listening {
			self.host.unlisten_resize();
			self.listening = false;
		}
		self.field.clear();
		self.state = EngineState::Stopped;
		info!("particle-field: unmounted after {} generations", self.generation);
	}

	/// Sizes the surface to the viewport and repopulates the field.
	///
	/// Returns `false` without touching anything if the viewport is unusable.
	fn rebuild(&mut self) -> bool {
		let Some((width, height)) = viewport::usable_size(self.host.viewport_size()) else {
			return false;
		};
		self.host.resize_surface(width, height);
		self.field.reinit(width, height, &self.config, &mut self.rng);
		self.size = (width, height);
		self.generation += 1;

		self.state = EngineState::Running;
		if self.frame.is_none() {
			self.schedule_frame();
		}
		true
	}

	fn schedule_frame(&mut self) {
		self.frame = self.host.request_frame();
		if self.frame.is_none() {
			warn!("particle-field: frame request refused, animation paused until next resize");
		}
	}

	pub fn state(&self) -> EngineState {
		self.state
	}

	pub fn is_running(&self) -> bool {
		self.state == EngineState::Running
	}

	pub fn field(&self) -> &ParticleField {
		&self.field
	}

	pub fn config(&self) -> &EngineConfig {
		&self.config
	}

	/// Number of completed field rebuilds.
	pub fn generation(&self) -> u64 {
		self.generation
	}

	pub fn has_pending_frame(&self) -> bool {
		self.frame.is_some()
	}

	pub fn has_pending_resize(&self) -> bool {
		self.resize.is_pending()
	}

	pub fn host(&self) -> &H {
		&self.host
	}

	pub fn host_mut(&mut self) -> &mut H {
		&mut self.host
	}
}
