//! Render lifecycle errors.

use thiserror::Error;

/// Errors surfaced while wiring a render together.
///
/// The numeric pipeline itself never fails; these cover construction and
/// lifecycle misuse only.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    /// The destination buffer does not match the configured image size.
    #[error("framebuffer holds {actual} pixels but settings describe {expected}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// `start()` while workers are still running.
    #[error("render pool is already running")]
    AlreadyRunning,

    /// `start()` before `init()` bound a scene.
    #[error("render pool has not been initialized")]
    NotInitialized,
}
