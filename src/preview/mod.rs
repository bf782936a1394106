/// Preview resource module
///
/// This module owns every decoded preview resource the browser holds:
/// - GPU texture previews and the upload seam (texture.rs)
/// - Audio previews and the playback state machine (audio.rs)
/// - The path-keyed cache that guarantees one live handle per file (cache.rs)

pub mod texture;
pub mod audio;
pub mod cache;

pub use audio::{AudioBackend, AudioDecoder, AudioDevice, AudioPreview, AudioSpec, PlaybackStatus, SampleFormat};
pub use cache::{PreviewCache, PreviewHandle};
pub use texture::{DecodedImage, TexturePreview, TextureUploader};
