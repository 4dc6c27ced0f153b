//! Error types for scene construction and rendering.
//!
//! Geometric degeneracies and absorbed paths are not errors; they resolve
//! locally to "no hit" or black. Only caller mistakes and resource
//! failures surface here.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while assembling a [`crate::Scene`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    #[error("Unknown geometry handle: {0}")]
    UnknownGeometry(usize),

    #[error("Unknown material handle: {0}")]
    UnknownMaterial(usize),
}

/// Errors raised while rendering or writing an image.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Failed to write image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Pixel buffer of {width}x{height} does not match its data length {len}")]
    BufferSize { width: u32, height: u32, len: usize },
}

pub type RenderResult<T> = Result<T, RenderError>;
