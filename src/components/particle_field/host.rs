//! Browser implementation of [`FrameHost`] on top of a 2D canvas.
//!
//! The host only hands out the JS callbacks; the component installs them,
//! since each callback needs a handle back to the engine that owns the host.

use std::cell::RefCell;
use std::rc::Rc;

use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use super::engine::{FrameHandle, FrameHost, TimerHandle};

type Callback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// JS closures registered with the browser, shared between the host and the
/// component so they can be released after unmount.
#[derive(Clone, Default)]
pub struct HostCallbacks {
	/// `requestAnimationFrame` target.
	pub frame: Callback,
	/// Window `resize` listener.
	pub resize: Callback,
	/// Debounce `setTimeout` target.
	pub settle: Callback,
}

impl HostCallbacks {
	/// Drops every closure. Only call once nothing is scheduled.
	pub fn release(&self) {
		self.frame.borrow_mut().take();
		self.resize.borrow_mut().take();
		self.settle.borrow_mut().take();
	}
}

/// Where the canvas takes its size from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SurfaceFit {
	/// The window's inner size.
	#[default]
	Viewport,
	/// The canvas's parent element client size.
	Parent,
}

pub struct CanvasHost {
	window: Window,
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
	fit: SurfaceFit,
	callbacks: HostCallbacks,
}

impl CanvasHost {
	pub fn new(
		window: Window,
		canvas: HtmlCanvasElement,
		ctx: CanvasRenderingContext2d,
		fit: SurfaceFit,
		callbacks: HostCallbacks,
	) -> Self {
		Self {
			window,
			canvas,
			ctx,
			fit,
			callbacks,
		}
	}
}

impl FrameHost for CanvasHost {
	type Surface = CanvasRenderingContext2d;

	fn surface(&mut self) -> &mut CanvasRenderingContext2d {
		&mut self.ctx
	}

	fn viewport_size(&self) -> Option<(f64, f64)> {
		match self.fit {
			SurfaceFit::Viewport => Some((
				self.window.inner_width().ok()?.as_f64()?,
				self.window.inner_height().ok()?.as_f64()?,
			)),
			SurfaceFit::Parent => {
				let parent = self.canvas.parent_element()?;
				Some((parent.client_width() as f64, parent.client_height() as f64))
			}
		}
	}

	fn resize_surface(&mut self, width: f64, height: f64) {
		self.canvas.set_width(width as u32);
		self.canvas.set_height(height as u32);
	}

	fn request_frame(&mut self) -> Option<FrameHandle> {
		let cb = self.callbacks.frame.borrow();
		let cb = cb.as_ref()?;
		self.window
			.request_animation_frame(cb.as_ref().unchecked_ref())
			.ok()
			.map(FrameHandle)
	}

	fn cancel_frame(&mut self, handle: FrameHandle) {
		if self.window.cancel_animation_frame(handle.0).is_err() {
			warn!("particle-field: cancelAnimationFrame failed for {}", handle.0);
		}
	}

	fn start_timer(&mut self, delay_ms: u32) -> Option<TimerHandle> {
		let cb = self.callbacks.settle.borrow();
		let cb = cb.as_ref()?;
		self.window
			.set_timeout_with_callback_and_timeout_and_arguments_0(
				cb.as_ref().unchecked_ref(),
				delay_ms as i32,
			)
			.ok()
			.map(TimerHandle)
	}

	fn clear_timer(&mut self, handle: TimerHandle) {
		self.window.clear_timeout_with_handle(handle.0);
	}

	fn listen_resize(&mut self) -> bool {
		let cb = self.callbacks.resize.borrow();
		let Some(cb) = cb.as_ref() else {
			return false;
		};
		self.window
			.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref())
			.is_ok()
	}

	fn unlisten_resize(&mut self) {
		let cb = self.callbacks.resize.borrow();
		if let Some(cb) = cb.as_ref() {
			let _ = self
				.window
				.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}
	}
}
