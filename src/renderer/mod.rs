//! WebGPU rendering module
//!
//! The scene is tessellated on the CPU into one flat-colored triangle list in
//! screen pixels and drawn with a single pass.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderInitError, RenderState};
pub use scene::build_scene;
pub use vertex::Vertex;
