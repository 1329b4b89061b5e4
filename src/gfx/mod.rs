//! # Graphics Module
//!
//! Mesh and scene state consumed by an external renderer.
//!
//! - **Scene Management** ([`scene`]) - Meshes, the scene context and request flags
//! - **Camera System** ([`camera`]) - Camera parameters and the mouse controller
//! - **Picking** ([`picking`]) - Pick colour allocation and ray/box tests
//! - **Geometry** ([`geometry`]) - Procedurally generated primitives
//!
//! [`Scene`]: scene::Scene

pub mod camera;
pub mod geometry;
pub mod picking;
pub mod scene;

// Re-export commonly used types
pub use camera::SceneCamera;
pub use scene::Scene;
