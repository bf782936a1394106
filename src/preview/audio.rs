use std::path::Path;

use crate::error::DeviceError;

/// Sample format produced by a decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleFormat {
    F32,
    I16,
}

/// Stream parameters reported by a decoder when a file is opened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioSpec {
    pub sample_rate: u32,
    pub channels: u16,
    pub format: SampleFormat,
}

/// Pull-model frame source for one audio file.
///
/// Once its device is started, the audio callback thread reads frames
/// from the decoder; the control thread must therefore never reposition
/// it while the device is running.
pub trait AudioDecoder {
    fn spec(&self) -> AudioSpec;
    /// Move the read position to an absolute frame index
    fn seek_to_frame(&mut self, frame: u64) -> Result<(), DeviceError>;
}

/// Playback device bound to one decoder
pub trait AudioDevice {
    fn start(&mut self) -> Result<(), DeviceError>;
    fn stop(&mut self) -> Result<(), DeviceError>;
}

/// The decode-open collaborator: turns a file path into a decoder plus
/// a playback device wired to read from it.
pub trait AudioBackend {
    fn open(
        &mut self,
        path: &Path,
    ) -> Result<(Box<dyn AudioDecoder>, Box<dyn AudioDevice>), DeviceError>;
}

/// Playback status of one audio preview
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackStatus {
    /// No live decoder/device attached (pre-open or after dispose)
    Uninitialized,
    /// Opened successfully, never started
    Ready,
    Playing,
    Paused,
    Stopped,
    /// Terminal: the device reported an error, or the open failed
    Failed,
}

impl PlaybackStatus {
    fn as_str(&self) -> &'static str {
        match self {
            PlaybackStatus::Uninitialized => "uninitialized",
            PlaybackStatus::Ready => "ready",
            PlaybackStatus::Playing => "playing",
            PlaybackStatus::Paused => "paused",
            PlaybackStatus::Stopped => "stopped",
            PlaybackStatus::Failed => "failed",
        }
    }
}

/// An opened audio preview: decoder + playback device + transport state.
///
/// Owned exclusively by the preview cache. Open failures are recorded on
/// the handle (Failed status plus the error) instead of being thrown, so
/// callers check `status()` before driving the transport.
pub struct AudioPreview {
    decoder: Option<Box<dyn AudioDecoder>>,
    device: Option<Box<dyn AudioDevice>>,
    status: PlaybackStatus,
    failure: Option<DeviceError>,
}

impl AudioPreview {
    /// Open a file through the backend. Never fails outward: a bad file
    /// yields a handle already in the Failed state.
    pub(crate) fn open(backend: &mut dyn AudioBackend, path: &Path) -> Self {
        match backend.open(path) {
            Ok((decoder, device)) => AudioPreview {
                decoder: Some(decoder),
                device: Some(device),
                status: PlaybackStatus::Ready,
                failure: None,
            },
            Err(e) => {
                eprintln!("⚠️  Failed to open audio preview for {}: {}", path.display(), e);
                AudioPreview {
                    decoder: None,
                    device: None,
                    status: PlaybackStatus::Failed,
                    failure: Some(e),
                }
            }
        }
    }

    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    /// The error that put this handle into the Failed state, if any
    pub fn failure(&self) -> Option<&DeviceError> {
        self.failure.as_ref()
    }

    /// Stream parameters, when a decoder is attached
    pub fn spec(&self) -> Option<AudioSpec> {
        self.decoder.as_ref().map(|d| d.spec())
    }

    /// Start playback. Allowed from Ready, Stopped and Paused; anything
    /// else (already playing, failed, disposed) is a reported failure
    /// with no side effects.
    pub fn play(&mut self) -> Result<(), DeviceError> {
        match self.status {
            PlaybackStatus::Ready | PlaybackStatus::Stopped | PlaybackStatus::Paused => {}
            other => {
                return Err(DeviceError::InvalidTransition {
                    op: "play",
                    state: other.as_str(),
                })
            }
        }

        let device = self.device.as_mut().ok_or(DeviceError::Disposed)?;
        match device.start() {
            Ok(()) => {
                self.status = PlaybackStatus::Playing;
                Ok(())
            }
            Err(e) => {
                self.failure = Some(e.clone());
                self.status = PlaybackStatus::Failed;
                Err(e)
            }
        }
    }

    /// Halt the device without moving the read position, so a later play
    /// resumes where playback left off. A stop failure leaves the device
    /// in an unknown state, so the handle is disposed on the spot and
    /// marked Failed.
    pub fn pause(&mut self) -> Result<(), DeviceError> {
        if self.status != PlaybackStatus::Playing {
            return Err(DeviceError::InvalidTransition {
                op: "pause",
                state: self.status.as_str(),
            });
        }

        let device = self.device.as_mut().ok_or(DeviceError::Disposed)?;
        match device.stop() {
            Ok(()) => {
                self.status = PlaybackStatus::Paused;
                Ok(())
            }
            Err(e) => {
                self.failure = Some(e.clone());
                self.status = PlaybackStatus::Failed;
                self.dispose();
                Err(e)
            }
        }
    }

    /// Stop playback and rewind to the first frame.
    ///
    /// The device is halted before the decoder is repositioned: the audio
    /// callback thread keeps pulling frames until the stop completes, and
    /// it must never race a seek.
    pub fn stop(&mut self) -> Result<(), DeviceError> {
        match self.status {
            PlaybackStatus::Playing => {
                let device = self.device.as_mut().ok_or(DeviceError::Disposed)?;
                if let Err(e) = device.stop() {
                    self.failure = Some(e.clone());
                    self.status = PlaybackStatus::Failed;
                    return Err(e);
                }
                self.rewind()
            }
            // A paused device is already halted; only the position moves
            PlaybackStatus::Paused => self.rewind(),
            other => Err(DeviceError::InvalidTransition {
                op: "stop",
                state: other.as_str(),
            }),
        }
    }

    fn rewind(&mut self) -> Result<(), DeviceError> {
        let decoder = self.decoder.as_mut().ok_or(DeviceError::Disposed)?;
        match decoder.seek_to_frame(0) {
            Ok(()) => {
                self.status = PlaybackStatus::Stopped;
                Ok(())
            }
            Err(e) => {
                self.failure = Some(e.clone());
                self.status = PlaybackStatus::Failed;
                Err(e)
            }
        }
    }

    /// Release the device and decoder unconditionally. Idempotent: a
    /// disposed handle stays inert and every transport call on it reports
    /// a failure instead of touching freed resources.
    pub fn dispose(&mut self) {
        if let Some(device) = self.device.as_mut() {
            if self.status == PlaybackStatus::Playing {
                // Stop before close; ignore errors, the device goes away
                // either way
                let _ = device.stop();
            }
        }

        // The device reads from the decoder, so it is released first
        drop(self.device.take());
        drop(self.decoder.take());

        if self.status != PlaybackStatus::Failed {
            self.status = PlaybackStatus::Uninitialized;
        }
    }
}

impl std::fmt::Debug for AudioPreview {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioPreview")
            .field("status", &self.status)
            .field("failure", &self.failure)
            .finish()
    }
}
