//! # Prelude
//!
//! ```
//! use mhcore::prelude::*;
//!
//! let mut scene = Scene::new();
//! let id = scene.add_geometry(Vector3::zero(), &generate_cube(1.0)).unwrap();
//! assert!(scene.object(id).unwrap().visible);
//! ```

pub use crate::config::{CameraDefaults, ControllerSettings, SceneConfig, WindowDefaults};
pub use crate::errors::{CoreError, Result};
pub use crate::gfx::camera::{CameraAction, CameraController, SceneCamera};
pub use crate::gfx::geometry::{generate_cube, generate_plane, generate_sphere, GeometryData};
pub use crate::gfx::picking::{Aabb, PickColor, Ray};
pub use crate::gfx::scene::{
    FaceGroup, MeshLayout, Object3D, ObjectId, Scene, SceneStatistics, TextureId,
};
pub use crate::input::{keys, InputEvent, Modifiers, MouseButton, MouseButtons};

// Re-export common external dependencies
pub use cgmath::{Vector3, Zero};
