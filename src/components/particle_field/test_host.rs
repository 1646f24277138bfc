//! In-memory host and surface for exercising the engine without a browser.

use super::config::Color;
use super::engine::{FrameHandle, FrameHost, TimerHandle};
use super::render::Surface;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawCall {
	Clear {
		width: f64,
		height: f64,
	},
	Disc {
		x: f64,
		y: f64,
		radius: f64,
		color: Color,
	},
	Segment {
		from: (f64, f64),
		to: (f64, f64),
		width: f64,
		color: Color,
	},
}

/// Surface that records every draw call in order.
#[derive(Debug, Default)]
pub struct RecordingSurface {
	pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
	pub fn clears(&self) -> usize {
		self.calls
			.iter()
			.filter(|c| matches!(c, DrawCall::Clear { .. }))
			.count()
	}

	/// `(x, y, radius, color)` of every disc drawn.
	pub fn discs(&self) -> impl Iterator<Item = (f64, f64, f64, Color)> + '_ {
		self.calls.iter().filter_map(|c| match *c {
			DrawCall::Disc {
				x,
				y,
				radius,
				color,
			} => Some((x, y, radius, color)),
			_ => None,
		})
	}

	/// `(from, to, color)` of every segment drawn.
	pub fn segments(&self) -> impl Iterator<Item = ((f64, f64), (f64, f64), Color)> + '_ {
		self.calls.iter().filter_map(|c| match *c {
			DrawCall::Segment { from, to, color, .. } => Some((from, to, color)),
			_ => None,
		})
	}
}

impl Surface for RecordingSurface {
	fn clear(&mut self, width: f64, height: f64) {
		self.calls.push(DrawCall::Clear { width, height });
	}

	fn fill_disc(&mut self, x: f64, y: f64, radius: f64, color: Color) {
		self.calls.push(DrawCall::Disc {
			x,
			y,
			radius,
			color,
		});
	}

	fn stroke_segment(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Color) {
		self.calls.push(DrawCall::Segment {
			from,
			to,
			width,
			color,
		});
	}
}

/// Host with a virtual millisecond clock. Timers and frames only fire when
/// the test asks for them.
#[derive(Debug)]
pub struct FakeHost {
	pub now: u64,
	pub viewport: (f64, f64),
	pub surface: RecordingSurface,
	pub surface_size: (f64, f64),
	/// `(time, width, height)` of every surface resize.
	pub surface_resizes: Vec<(u64, f64, f64)>,
	pub listening: bool,
	pub pending_frame: Option<FrameHandle>,
	pub requested_frames: usize,
	pub cancelled_frames: usize,
	pub refuse_frames: bool,
	timers: Vec<(TimerHandle, u64)>,
	pub cleared_timers: usize,
	next_id: i32,
}

impl FakeHost {
	pub fn new(width: f64, height: f64) -> Self {
		Self {
			now: 0,
			viewport: (width, height),
			surface: RecordingSurface::default(),
			surface_size: (0.0, 0.0),
			surface_resizes: Vec::new(),
			listening: false,
			pending_frame: None,
			requested_frames: 0,
			cancelled_frames: 0,
			refuse_frames: false,
			timers: Vec::new(),
			cleared_timers: 0,
			next_id: 1,
		}
	}

	pub fn advance_to(&mut self, t: u64) {
		self.now = self.now.max(t);
	}

	pub fn set_viewport(&mut self, width: f64, height: f64) {
		self.viewport = (width, height);
	}

	/// Removes the earliest timer due at or before `t`, moving the clock to its deadline.
	pub fn fire_due_timer(&mut self, t: u64) -> Option<u64> {
		let (idx, &(_, deadline)) = self
			.timers
			.iter()
			.enumerate()
			.filter(|(_, (_, deadline))| *deadline <= t)
			.min_by_key(|(_, (_, deadline))| *deadline)?;
		self.timers.remove(idx);
		self.now = self.now.max(deadline);
		Some(deadline)
	}

	pub fn take_frame(&mut self) -> Option<FrameHandle> {
		self.pending_frame.take()
	}

	pub fn live_timers(&self) -> usize {
		self.timers.len()
	}

	pub fn next_timer_deadline(&self) -> Option<u64> {
		self.timers.iter().map(|&(_, deadline)| deadline).min()
	}

	fn next_id(&mut self) -> i32 {
		let id = self.next_id;
		self.next_id += 1;
		id
	}
}

impl FrameHost for FakeHost {
	type Surface = RecordingSurface;

	fn surface(&mut self) -> &mut RecordingSurface {
		&mut self.surface
	}

	fn viewport_size(&self) -> Option<(f64, f64)> {
		Some(self.viewport)
	}

	fn resize_surface(&mut self, width: f64, height: f64) {
		self.surface_size = (width, height);
		self.surface_resizes.push((self.now, width, height));
	}

	fn request_frame(&mut self) -> Option<FrameHandle> {
		if self.refuse_frames {
			return None;
		}
		assert!(self.pending_frame.is_none(), "frame requested while one is pending");
		let handle = FrameHandle(self.next_id());
		self.pending_frame = Some(handle);
		self.requested_frames += 1;
		Some(handle)
	}

	fn cancel_frame(&mut self, handle: FrameHandle) {
		if self.pending_frame == Some(handle) {
			self.pending_frame = None;
			self.cancelled_frames += 1;
		}
	}

	fn start_timer(&mut self, delay_ms: u32) -> Option<TimerHandle> {
		let handle = TimerHandle(self.next_id());
		self.timers.push((handle, self.now + delay_ms as u64));
		Some(handle)
	}

	fn clear_timer(&mut self, handle: TimerHandle) {
		let before = self.timers.len();
		self.timers.retain(|&(h, _)| h != handle);
		if self.timers.len() < before {
			self.cleared_timers += 1;
		}
	}

	fn listen_resize(&mut self) -> bool {
		self.listening = true;
		true
	}

	fn unlisten_resize(&mut self) {
		self.listening = false;
	}
}
