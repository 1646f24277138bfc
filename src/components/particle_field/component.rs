//! Leptos component wrapping the particle-field canvas.
//!
//! The component creates a canvas element, builds a [`ParticleEngine`] over a
//! [`CanvasHost`] once the canvas is in the DOM, and installs the browser
//! callbacks (`requestAnimationFrame`, the debounce `setTimeout` and the window
//! `resize` listener) that drive it. On cleanup the engine is unmounted and
//! the callbacks released.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::config::{EngineConfig, Profile};
use super::engine::ParticleEngine;
use super::host::{CanvasHost, HostCallbacks, SurfaceFit};

type SharedEngine = Rc<RefCell<Option<ParticleEngine<CanvasHost>>>>;

/// Builds a callback that borrows the engine and runs `f` on it.
fn engine_callback(
	engine: &SharedEngine,
	f: fn(&mut ParticleEngine<CanvasHost>),
) -> Closure<dyn FnMut()> {
	let engine = engine.clone();
	Closure::new(move || {
		if let Some(ref mut e) = *engine.borrow_mut() {
			f(e);
		}
	})
}

/// Renders an animated particle field on a canvas element.
///
/// Pass an explicit `config`, or pick a preset with `profile` (defaults to
/// ambient). With `fullscreen = true` (the default) the canvas is fixed behind
/// the page and sized to the window; otherwise it fills its parent element.
#[component]
pub fn ParticleFieldCanvas(
	#[prop(optional)] config: Option<EngineConfig>,
	#[prop(default = Profile::Ambient)] profile: Profile,
	#[prop(default = true)] fullscreen: bool,
) -> impl IntoView {
	let config = config.unwrap_or_else(|| EngineConfig::for_profile(profile));
	let style = if fullscreen {
		format!(
			"position: fixed; inset: 0; pointer-events: none; z-index: 0; opacity: {};",
			config.surface_opacity
		)
	} else {
		format!(
			"display: block; width: 100%; height: 100%; pointer-events: none; opacity: {};",
			config.surface_opacity
		)
	};
	let fit = if fullscreen {
		SurfaceFit::Viewport
	} else {
		SurfaceFit::Parent
	};

	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let engine: SharedEngine = Rc::new(RefCell::new(None));
	let callbacks = HostCallbacks::default();
	let (engine_init, callbacks_init) = (engine.clone(), callbacks.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if engine_init.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			warn!("particle-field: no window, not starting");
			return;
		};
		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			warn!("particle-field: 2d context unavailable, not starting");
			return;
		};

		let host = CanvasHost::new(window, canvas, ctx, fit, callbacks_init.clone());
		let seed = js_sys::Date::now().to_bits();
		*engine_init.borrow_mut() = Some(ParticleEngine::new(host, config.clone(), seed));

		*callbacks_init.frame.borrow_mut() = Some(engine_callback(&engine_init, |e| e.on_frame()));
		*callbacks_init.resize.borrow_mut() = Some(engine_callback(&engine_init, |e| e.on_resize()));
		*callbacks_init.settle.borrow_mut() =
			Some(engine_callback(&engine_init, |e| e.on_resize_settled()));

		if let Some(ref mut e) = *engine_init.borrow_mut() {
			e.on_mount();
		}
	});

	let teardown = StoredValue::new_local((engine, callbacks));
	on_cleanup(move || {
		let released = teardown.try_with_value(|(engine, callbacks)| {
			if let Some(mut e) = engine.borrow_mut().take() {
				e.on_unmount();
			}
			callbacks.release();
		});
		if released.is_none() {
			warn!("particle-field: engine already disposed at cleanup");
		}
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="particle-field-canvas"
			aria-hidden="true"
			style=style
		/>
	}
}
