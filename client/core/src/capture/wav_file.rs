//! WAV file capture
//!
//! Stands in for a microphone on surfaces that have none: the "recording"
//! is the content of a WAV file on disk.

use std::path::PathBuf;

use async_trait::async_trait;

use super::{AudioCapture, AudioClip, AudioFormat, CaptureConfig};
use crate::error::CaptureError;

/// Minimum size of a RIFF/WAVE header
const WAV_HEADER_LEN: usize = 12;

/// Capture that reads a WAV file
#[derive(Clone, Debug)]
pub struct WavFileCapture {
    path: PathBuf,
}

impl WavFileCapture {
    /// Create a capture for the given file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl AudioCapture for WavFileCapture {
    async fn capture_clip(&mut self, config: &CaptureConfig) -> Result<AudioClip, CaptureError> {
        tracing::debug!(
            path = ?self.path,
            duration = ?config.duration(),
            format = ?config.format,
            "Reading clip from file"
        );

        let bytes = tokio::fs::read(&self.path).await?;
        match config.format {
            AudioFormat::Wav => check_wav_header(&bytes)?,
        }
        Ok(AudioClip::new(bytes, config.format))
    }
}

fn check_wav_header(bytes: &[u8]) -> Result<(), CaptureError> {
    if bytes.len() < WAV_HEADER_LEN || &bytes[0..4] != b"RIFF" || &bytes[8..12] != b"WAVE" {
        return Err(CaptureError::Encoding("not a RIFF/WAVE file".to_string()));
    }
    Ok(())
}
