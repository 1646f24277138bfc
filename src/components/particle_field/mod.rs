//! Ambient particle-field background.
//!
//! Simulates a swarm of drifting points on a 2D canvas and links every pair
//! closer than a configured distance with a line whose opacity fades with
//! distance:
//! - Particles move at constant velocity and wrap around the surface edges
//! - The field is rebuilt (density tier included) once a resize burst settles
//! - Unmount cancels the frame loop, the pending resize timer and the listener
//!
//! The engine itself ([`ParticleEngine`]) is host-agnostic; [`ParticleFieldCanvas`]
//! binds it to a browser canvas.
//!
//! # Example
//!
//! ```ignore
//! use particle_field::{EngineConfig, ParticleFieldCanvas, Profile};
//!
//! view! { <ParticleFieldCanvas profile=Profile::Hero /> }
//! view! { <ParticleFieldCanvas config=EngineConfig { link_distance: 150.0, ..EngineConfig::ambient() } /> }
//! ```

mod component;
pub mod config;
pub mod engine;
mod host;
mod particles;
pub mod render;
pub mod simulation;
#[cfg(test)]
mod test_host;
mod viewport;

pub use component::ParticleFieldCanvas;
pub use config::{Color, EngineConfig, FieldSettings, MAX_PARTICLES, Profile, SampleRange};
pub use engine::{EngineState, FrameHandle, FrameHost, ParticleEngine, TimerHandle};
pub use host::{CanvasHost, HostCallbacks, SurfaceFit};
pub use particles::{Particle, ParticleField};
pub use render::Surface;
