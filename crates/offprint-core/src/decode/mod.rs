//! Image decoding pipeline.
//!
//! This module provides functionality for:
//! - Decoding user-supplied image bytes (JPEG, PNG, WebP) to RGB8
//! - Image resizing for viewport previews and list thumbnails
//! - The aspect-preserving downscale behind the compression pixel cap
//!
//! # Architecture
//!
//! The decoding pipeline is designed to be used from Web Workers via WASM
//! bindings. All operations are synchronous and single-threaded within WASM.

mod image;
mod resize;
mod types;

pub use self::image::decode_image;
pub use resize::{generate_thumbnail, resize, resize_to_fit};
pub use types::{DecodeError, DecodedImage, FilterType};
