//! # vox-transcode
//!
//! Audio container/codec conversion through an external ffmpeg process.
//!
//! Voice notes arrive in a compressed container the recognition service
//! does not accept; [`Transcoder::convert`] streams the source buffer
//! through ffmpeg's stdin and collects the re-encoded bytes from stdout.
//! Output is returned only after the process exits successfully; a failed
//! conversion discards all partial output.
//!
//! Stateless: no caching, no temp files, one child process per call.

#![deny(unsafe_code)]

pub mod errors;
pub mod format;
pub mod transcoder;

pub use errors::ConversionError;
pub use format::AudioFormat;
pub use transcoder::Transcoder;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn re_exports_work() {
        let _transcoder = Transcoder::new("ffmpeg");
        assert_eq!(AudioFormat::Mp3.container(), "mp3");
    }
}
