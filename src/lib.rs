//! particle-field: ambient particle-field canvas background.
//!
//! This crate provides a WASM-based canvas component that animates a field of
//! drifting particles linked by proximity lines, sized to the viewport and
//! rebuilt when the window settles after a resize.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::particle_field::{
	EngineConfig, FieldSettings, ParticleEngine, ParticleFieldCanvas, Profile,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("particle-field: logging initialized");
}

/// Parses a settings document, logging and discarding anything invalid.
fn parse_settings(json_text: &str) -> Option<EngineConfig> {
	let settings = match serde_json::from_str::<FieldSettings>(json_text) {
		Ok(settings) => settings,
		Err(e) => {
			warn!("particle-field: failed to parse settings: {}", e);
			return None;
		}
	};
	match settings.resolve() {
		Ok(config) => {
			info!("particle-field: using {:?} profile", settings.profile);
			Some(config)
		}
		Err(e) => {
			warn!("particle-field: invalid config overrides: {}", e);
			None
		}
	}
}

/// Load engine settings from a script element with id="particle-config".
/// Expected format: JSON with { profile: "ambient" | "hero", config: {...} }
fn load_engine_config() -> Option<EngineConfig> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("particle-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;
	parse_settings(&json_text)
}

/// Main application component.
/// Loads settings from the DOM and renders the particle field behind the page.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_engine_config().unwrap_or_else(EngineConfig::ambient);

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Particle Field" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<ParticleFieldCanvas config=config />
	}
}
