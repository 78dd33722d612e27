//! Conversion error types.

/// Errors that can occur while converting audio.
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    /// Spawning or waiting on the transcoder process failed.
    #[error("transcoder I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The transcoder exited with a failure status.
    #[error("transcoder failed (exit {status}): {message}")]
    Transcoder {
        /// Process exit code (-1 when terminated by a signal).
        status: i32,
        /// Tail of the process stderr.
        message: String,
    },

    /// A pipe to or from the transcoder broke mid-stream.
    #[error("transcoder pipe error: {0}")]
    Pipe(String),

    /// A configured format name is not recognized.
    #[error("unknown audio format: {0}")]
    UnknownFormat(String),
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transcoder_error_display() {
        let err = ConversionError::Transcoder {
            status: 1,
            message: "Invalid data found when processing input".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "transcoder failed (exit 1): Invalid data found when processing input"
        );
    }

    #[test]
    fn io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "ffmpeg not found");
        let err = ConversionError::from(io_err);
        assert!(err.to_string().contains("ffmpeg not found"));
    }

    #[test]
    fn unknown_format_display() {
        let err = ConversionError::UnknownFormat("mid".to_string());
        assert_eq!(err.to_string(), "unknown audio format: mid");
    }
}
