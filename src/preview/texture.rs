use std::path::Path;

use crate::error::DecodeError;

/// A decoded image preview living on the GPU
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TexturePreview {
    /// Pixel width of the decoded image
    pub width: u32,
    /// Pixel height of the decoded image
    pub height: u32,
    /// Opaque handle assigned by the uploader; valid until released
    pub texture_id: u64,
}

/// Raw pixels handed to the uploader after decoding
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    /// Tightly packed RGBA8 pixel data, row-major
    pub rgba: Vec<u8>,
}

/// The GPU upload collaborator.
///
/// The cache never talks to the graphics API itself; it hands decoded
/// pixels to this trait and gets back an opaque texture id that the
/// rendering side knows how to draw.
pub trait TextureUploader {
    /// Upload decoded pixels, returning the texture handle
    fn upload(&mut self, image: &DecodedImage) -> u64;
    /// Release a previously uploaded texture
    fn release(&mut self, texture_id: u64);
}

/// Decode an image file into RGBA pixels.
///
/// Decode failures are hard errors: the caller caches nothing for this
/// path, so selecting the file again retries the decode.
pub fn decode_image(path: &Path) -> Result<DecodedImage, DecodeError> {
    if !path.exists() {
        return Err(DecodeError::FileNotFound(path.to_path_buf()));
    }

    let img = image::open(path)?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(DecodedImage {
        width,
        height,
        rgba: rgba.into_raw(),
    })
}
