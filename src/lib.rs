//! voxel-f1
//!
//! An instanced voxel renderer for a procedurally authored Formula 1 car,
//! native and WASM. The car is built from a few hundred coloured cubes, drawn
//! with one instanced call per colour, while the camera spirals in from afar
//! and then hands over to orbit controls.
//!
//! High-level modules
//! - `resources`: the F1 voxel model and the shared cube mesh
//! - `config`: scene settings, lights, fog and the floor grid
//! - `data_structures`: voxels, colour batches, instances and GPU buffers
//! - `camera`: camera, projection, the flyover animator and orbit controls
//! - `stage`: a mounted scene with its lifecycle, independent of any window
//! - `renderer` / `context`: the wgpu backend of a stage
//! - `pipelines`: the voxel and grid pipelines and their bind groups
//! - `flow`: the winit event loop hosting a stage
//!

pub mod camera;
pub mod config;
pub mod context;
pub mod data_structures;
pub mod flow;
pub mod pipelines;
pub mod renderer;
pub mod resources;
pub mod stage;

pub use config::SceneConfig;
pub use flow::run;
pub use stage::{Frame, RenderBackend, Stage};

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath;
pub use winit::event::WindowEvent;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Entry point of the web build: renders into the `canvas` element.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    run(SceneConfig::default()).map_err(|e| JsValue::from_str(&format!("{:#}", e)))
}
