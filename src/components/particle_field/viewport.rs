//! Viewport tracking: resize debouncing and surface size checks.

use log::warn;

use super::engine::{FrameHost, TimerHandle};

/// Trailing-edge debounce owning at most one pending host timer.
///
/// Every [`trigger`](Self::trigger) cancels the pending timer and starts a new
/// one, so the action runs once the events have been quiet for `quiet_ms`.
#[derive(Debug)]
pub struct Debounce {
	quiet_ms: u32,
	pending: Option<TimerHandle>,
}

impl Debounce {
	pub fn new(quiet_ms: u32) -> Self {
		Self {
			quiet_ms,
			pending: None,
		}
	}

	pub fn quiet_ms(&self) -> u32 {
		self.quiet_ms
	}

	pub fn is_pending(&self) -> bool {
		self.pending.is_some()
	}

	/// Restarts the quiet period.
	pub fn trigger<H: FrameHost + ?Sized>(&mut self, host: &mut H) {
		self.cancel(host);
		self.pending = host.start_timer(self.quiet_ms);
		if self.pending.is_none() {
			warn!("particle-field: could not start resize timer");
		}
	}

	/// Marks the pending timer as fired. Returns `false` if nothing was pending.
	pub fn settle(&mut self) -> bool {
		self.pending.take().is_some()
	}

	/// Clears the pending timer, if any.
	pub fn cancel<H: FrameHost + ?Sized>(&mut self, host: &mut H) {
		if let Some(handle) = self.pending.take() {
			host.clear_timer(handle);
		}
	}
}

/// Returns the size if both dimensions are finite and positive.
pub fn usable_size(size: Option<(f64, f64)>) -> Option<(f64, f64)> {
	let (width, height) = size?;
	let usable = |v: f64| v.is_finite() && v >= 1.0;
	(usable(width) && usable(height)).then_some((width.floor(), height.floor()))
}
