//! # Scene Management Module
//!
//! The in-memory mesh representation and the scene/camera state it lives in.
//!
//! ## Key Components
//!
//! - [`Scene`] - The explicit context owning objects, camera, window and input state
//! - [`Object3D`] - A single triangle mesh with its transform and render flags
//! - [`ObjectId`] - Non-owning handle to an object in the scene
//! - [`Vertex3D`] - Interleaved vertex format for renderer upload
//!
//! ## Usage
//!
//! ```
//! use cgmath::Vector3;
//! use mhcore::gfx::scene::Scene;
//!
//! let mut scene = Scene::new();
//! let id = scene.add_object(Vector3::new(0.0, 0.0, 0.0), 3, 1).unwrap();
//! let mesh = scene.object_mut(id).unwrap();
//! mesh.set_vertices(&[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]).unwrap();
//! mesh.set_triangles(&[0, 1, 2]).unwrap();
//!
//! // once per frame, the renderer consumes the coalesced redraw request
//! assert!(scene.take_pending_update());
//! ```

pub mod object;
pub mod scene;
pub mod state;
pub mod vertex;

// Re-export main types
pub use object::{FaceGroup, MeshLayout, Object3D, TextureId};
pub use scene::{ObjectId, Scene, SceneStatistics};
pub use state::{Coalesced, InputState, WindowState};
pub use vertex::Vertex3D;
