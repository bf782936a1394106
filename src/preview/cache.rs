use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::Path;

use crate::error::DecodeError;
use crate::state::data::FileKind;

use super::audio::{AudioBackend, AudioPreview};
use super::texture::{self, TexturePreview, TextureUploader};

/// One cached preview resource, keyed by the file's path
#[derive(Debug)]
pub enum PreviewHandle {
    Texture(TexturePreview),
    Audio(AudioPreview),
}

impl PreviewHandle {
    pub fn as_texture(&self) -> Option<&TexturePreview> {
        match self {
            PreviewHandle::Texture(t) => Some(t),
            PreviewHandle::Audio(_) => None,
        }
    }

    pub fn as_audio_mut(&mut self) -> Option<&mut AudioPreview> {
        match self {
            PreviewHandle::Audio(a) => Some(a),
            PreviewHandle::Texture(_) => None,
        }
    }
}

/// Lazy cache of decoded preview resources.
///
/// Keyed strictly by the file's path (the catalog's natural key), never
/// by a position in the filtered list, so handles stay valid when the
/// visible list changes. The cache exclusively owns every handle: there
/// is exactly one live decode/device pair per path, and exactly one
/// disposal path for each, reached on eviction or teardown.
pub struct PreviewCache {
    uploader: Box<dyn TextureUploader>,
    backend: Box<dyn AudioBackend>,
    previews: HashMap<String, PreviewHandle>,
}

impl PreviewCache {
    pub fn new(uploader: Box<dyn TextureUploader>, backend: Box<dyn AudioBackend>) -> Self {
        PreviewCache {
            uploader,
            backend,
            previews: HashMap::new(),
        }
    }

    /// Return the cached handle for `path`, creating it on first access.
    ///
    /// A second call for the same path observes the first call's handle
    /// untouched. Texture decode failures cache nothing (selecting the
    /// file again retries); audio open failures come back as a cached
    /// handle already in the Failed state, so one bad file never blocks
    /// browsing the rest.
    pub fn get_or_create(
        &mut self,
        path: &str,
        kind: FileKind,
    ) -> Result<&mut PreviewHandle, DecodeError> {
        match self.previews.entry(path.to_string()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let handle = match kind {
                    FileKind::Texture => {
                        let decoded = texture::decode_image(Path::new(path))?;
                        let texture_id = self.uploader.upload(&decoded);
                        PreviewHandle::Texture(TexturePreview {
                            width: decoded.width,
                            height: decoded.height,
                            texture_id,
                        })
                    }
                    FileKind::Audio => {
                        PreviewHandle::Audio(AudioPreview::open(self.backend.as_mut(), Path::new(path)))
                    }
                };
                Ok(entry.insert(handle))
            }
        }
    }

    /// Look up a handle without creating one
    pub fn get_mut(&mut self, path: &str) -> Option<&mut PreviewHandle> {
        self.previews.get_mut(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.previews.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.previews.len()
    }

    pub fn is_empty(&self) -> bool {
        self.previews.is_empty()
    }

    /// Evict one entry, releasing its native resources
    pub fn remove(&mut self, path: &str) {
        if let Some(mut handle) = self.previews.remove(path) {
            dispose_handle(self.uploader.as_mut(), &mut handle);
        }
    }

    /// Release every cached handle. Called on teardown; safe to call
    /// more than once.
    pub fn dispose_all(&mut self) {
        for (_, mut handle) in self.previews.drain() {
            dispose_handle(self.uploader.as_mut(), &mut handle);
        }
    }
}

/// The single disposal path for a handle of either kind
fn dispose_handle(uploader: &mut dyn TextureUploader, handle: &mut PreviewHandle) {
    match handle {
        PreviewHandle::Texture(t) => uploader.release(t.texture_id),
        PreviewHandle::Audio(a) => a.dispose(),
    }
}

impl Drop for PreviewCache {
    fn drop(&mut self) {
        self.dispose_all();
    }
}

impl std::fmt::Debug for PreviewCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewCache")
            .field("entries", &self.previews.len())
            .finish()
    }
}
