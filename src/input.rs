//! Image acquisition helpers used in front of the classifier.
//!
//! Zero-byte and undecodable inputs are rejected here so they never reach
//! preprocessing.

use std::path::{Path, PathBuf};

use image::DynamicImage;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum InputError {
    #[error("image data is empty")]
    Empty,
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
}

/// Decodes PNG or JPEG bytes, e.g. an upload, camera frame or fetched body.
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage, InputError> {
    if bytes.is_empty() {
        return Err(InputError::Empty);
    }
    Ok(image::load_from_memory(bytes)?)
}

pub fn load_image(path: &Path) -> Result<DynamicImage, InputError> {
    debug!("Reading image {}", path.display());
    let bytes = std::fs::read(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    decode_image(&bytes)
}
