// src/lib.rs
//! mhcore
//!
//! In-memory mesh buffers and the scene/camera state of an interactive 3D
//! character-modeling application. Rendering, windowing and texture decoding
//! live outside this crate and talk to it through [`gfx::scene::Scene`].

pub mod config;
pub mod errors;
pub mod gfx;
pub mod input;
pub mod prelude;

// Re-export main types for convenience
pub use errors::{CoreError, Result};
pub use gfx::scene::{Object3D, ObjectId, Scene};

/// Installs an `env_logger` logger honouring `RUST_LOG`.
///
/// Safe to call more than once; later calls do nothing.
pub fn init_logging() {
    let _ = env_logger::Builder::from_default_env()
        .format_timestamp_millis()
        .try_init();
}
