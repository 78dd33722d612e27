//! Supported audio container formats.

use std::fmt;

use crate::errors::ConversionError;

/// An audio container format the transcoder can read or write.
///
/// `container()` values double as ffmpeg demuxer/muxer names, so both the
/// `-f` input and output flags take them directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioFormat {
    /// Ogg container (Vorbis/Opus voice notes).
    Ogg,
    /// MPEG audio layer III.
    Mp3,
    /// RIFF WAVE.
    Wav,
    /// Free Lossless Audio Codec.
    Flac,
    /// MPEG-4 audio (m4a/aac).
    M4a,
    /// WebM audio.
    Webm,
}

impl AudioFormat {
    /// ffmpeg container/muxer name.
    #[must_use]
    pub fn container(self) -> &'static str {
        match self {
            Self::Ogg => "ogg",
            Self::Mp3 => "mp3",
            Self::Wav => "wav",
            Self::Flac => "flac",
            Self::M4a => "mp4",
            Self::Webm => "webm",
        }
    }

    /// MIME type of the format.
    #[must_use]
    pub fn mime(self) -> &'static str {
        match self {
            Self::Ogg => "audio/ogg",
            Self::Mp3 => "audio/mpeg",
            Self::Wav => "audio/wav",
            Self::Flac => "audio/flac",
            Self::M4a => "audio/mp4",
            Self::Webm => "audio/webm",
        }
    }

    /// Parse a configured format name.
    ///
    /// Accepts the common aliases seen in settings files and MIME subtypes.
    pub fn from_name(name: &str) -> Result<Self, ConversionError> {
        match name.to_ascii_lowercase().as_str() {
            "ogg" | "oga" | "opus" | "vorbis" => Ok(Self::Ogg),
            "mp3" | "mpeg" => Ok(Self::Mp3),
            "wav" | "wave" => Ok(Self::Wav),
            "flac" => Ok(Self::Flac),
            "m4a" | "mp4" | "aac" => Ok(Self::M4a),
            "webm" => Ok(Self::Webm),
            other => Err(ConversionError::UnknownFormat(other.to_string())),
        }
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.container())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
