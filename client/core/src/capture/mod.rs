//! Audio Capture
//!
//! Interface to whatever records the user's voice. The coordinator asks for
//! a clip with the configured length and format, base64-encodes it and sends
//! it to the router as a data URI.
//!
//! # Implementations
//!
//! - [`WavFileCapture`]: reads a pre-recorded WAV file (terminal surface)
//!
//! Device-backed recorders live with the surface that owns the device and
//! only need to implement [`AudioCapture`]. They must release the device
//! before returning, including on error.

mod wav_file;

use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::CaptureError;

pub use wav_file::WavFileCapture;

/// Default recording length in milliseconds
pub const DEFAULT_CAPTURE_MS: u64 = 3000;

/// Container format of a recorded clip
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    /// RIFF/WAVE
    #[default]
    Wav,
}

impl AudioFormat {
    /// MIME type used in the data URI
    #[must_use]
    pub fn mime(&self) -> &'static str {
        match self {
            Self::Wav => "audio/wav",
        }
    }

    /// Data URI prefix, up to and including the comma
    #[must_use]
    pub fn data_uri_prefix(&self) -> String {
        format!("data:{};base64,", self.mime())
    }
}

/// A recorded clip
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AudioClip {
    /// Raw container bytes
    pub bytes: Vec<u8>,
    /// Container format
    pub format: AudioFormat,
}

impl AudioClip {
    /// Create a clip in the given format
    pub fn new(bytes: Vec<u8>, format: AudioFormat) -> Self {
        Self { bytes, format }
    }

    /// Create a WAV clip
    pub fn wav(bytes: Vec<u8>) -> Self {
        Self::new(bytes, AudioFormat::Wav)
    }

    /// Build the data URI for an already-encoded clip body
    #[must_use]
    pub fn data_uri(&self, base64: &str) -> String {
        format!("{}{base64}", self.format.data_uri_prefix())
    }
}

/// Base64-encode a clip (standard alphabet, padded)
#[must_use]
pub fn encode_base64(clip: &AudioClip) -> String {
    BASE64.encode(&clip.bytes)
}

/// Capture settings
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Recording length in milliseconds
    pub duration_ms: u64,
    /// Requested container format
    #[serde(default)]
    pub format: AudioFormat,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_CAPTURE_MS,
            format: AudioFormat::Wav,
        }
    }
}

impl CaptureConfig {
    /// Recording length
    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

/// Audio capture trait
#[async_trait]
pub trait AudioCapture: Send {
    /// Record one clip with the requested length and container format
    ///
    /// Implementations that cannot produce `config.format` return
    /// [`CaptureError::Encoding`].
    async fn capture_clip(&mut self, config: &CaptureConfig) -> Result<AudioClip, CaptureError>;
}
