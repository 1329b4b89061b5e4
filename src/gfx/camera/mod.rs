pub mod camera_controller;
pub mod scene_camera;

// Re-export main types
pub use camera_controller::{CameraAction, CameraController};
pub use scene_camera::SceneCamera;
