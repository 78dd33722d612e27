//! The ffmpeg child-process wrapper.

use std::path::PathBuf;
use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use vox_settings::TranscodeSettings;

use crate::errors::ConversionError;
use crate::format::AudioFormat;

/// How much of the process stderr to keep in error messages.
const STDERR_TAIL_BYTES: usize = 2048;

/// Handle to the external transcoder binary.
#[derive(Clone, Debug)]
pub struct Transcoder {
    program: PathBuf,
}

impl Transcoder {
    /// Create a transcoder that spawns `program` (usually `ffmpeg`).
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Create a transcoder from loaded settings.
    #[must_use]
    pub fn from_settings(settings: &TranscodeSettings) -> Self {
        Self::new(&settings.ffmpeg_path)
    }

    /// Convert `source` from one container format to another.
    ///
    /// The source buffer streams through the child's stdin while stdout is
    /// collected concurrently, so buffers larger than the pipe capacity
    /// cannot deadlock. The converted bytes are returned only if the
    /// process exits successfully; on failure all partial output is
    /// discarded and the stderr tail becomes the error message.
    #[tracing::instrument(skip(self, source), fields(bytes = source.len(), %source_format, %target_format))]
    pub async fn convert(
        &self,
        source: &[u8],
        source_format: AudioFormat,
        target_format: AudioFormat,
        bitrate_kbps: u32,
    ) -> Result<Vec<u8>, ConversionError> {
        let args = build_args(source_format, target_format, bitrate_kbps);
        tracing::debug!(program = %self.program.display(), ?args, "spawning transcoder");

        let mut child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| ConversionError::Pipe("transcoder stdin not captured".to_string()))?;

        // Feed stdin from a separate task while wait_with_output drains
        // stdout/stderr; writing inline would deadlock once the pipe fills.
        let input = source.to_vec();
        let writer = tokio::spawn(async move {
            let result = stdin.write_all(&input).await;
            drop(stdin); // close the pipe so the child sees EOF
            result
        });

        let output = child.wait_with_output().await?;
        let write_result = writer
            .await
            .map_err(|e| ConversionError::Pipe(format!("stdin writer task failed: {e}")))?;

        if !output.status.success() {
            let status = output.status.code().unwrap_or(-1);
            let message = stderr_tail(&output.stderr);
            tracing::warn!(status, "transcoder failed: {message}");
            return Err(ConversionError::Transcoder { status, message });
        }

        // A broken pipe with a zero exit would mean the child ignored part
        // of the input; surface it rather than returning truncated audio.
        if let Err(e) = write_result {
            return Err(ConversionError::Pipe(format!(
                "writing source to transcoder: {e}"
            )));
        }

        tracing::debug!(converted_bytes = output.stdout.len(), "conversion complete");
        Ok(output.stdout)
    }
}

/// Build the ffmpeg argument list for one conversion.
fn build_args(source: AudioFormat, target: AudioFormat, bitrate_kbps: u32) -> Vec<String> {
    vec![
        "-hide_banner".to_string(),
        "-loglevel".to_string(),
        "error".to_string(),
        "-f".to_string(),
        source.container().to_string(),
        "-i".to_string(),
        "pipe:0".to_string(),
        "-f".to_string(),
        target.container().to_string(),
        "-b:a".to_string(),
        format!("{bitrate_kbps}k"),
        "pipe:1".to_string(),
    ]
}

/// Last [`STDERR_TAIL_BYTES`] of stderr as trimmed UTF-8.
fn stderr_tail(stderr: &[u8]) -> String {
    let start = stderr.len().saturating_sub(STDERR_TAIL_BYTES);
    String::from_utf8_lossy(&stderr[start..]).trim().to_string()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    /// Whether a runnable ffmpeg is on PATH; process tests skip without it.
    fn ffmpeg_available() -> bool {
        std::process::Command::new("ffmpeg")
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    /// Minimal valid mono 16-bit PCM WAV: 44-byte header plus silence.
    fn wav_fixture(samples: u16) -> Vec<u8> {
        let data_len = u32::from(samples) * 2;
        let mut wav = Vec::new();
        wav.extend_from_slice(b"RIFF");
        wav.extend_from_slice(&(36 + data_len).to_le_bytes());
        wav.extend_from_slice(b"WAVEfmt ");
        wav.extend_from_slice(&16u32.to_le_bytes()); // fmt chunk size
        wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
        wav.extend_from_slice(&1u16.to_le_bytes()); // mono
        wav.extend_from_slice(&8000u32.to_le_bytes()); // sample rate
        wav.extend_from_slice(&16000u32.to_le_bytes()); // byte rate
        wav.extend_from_slice(&2u16.to_le_bytes()); // block align
        wav.extend_from_slice(&16u16.to_le_bytes()); // bits per sample
        wav.extend_from_slice(b"data");
        wav.extend_from_slice(&data_len.to_le_bytes());
        wav.extend(std::iter::repeat_n(0u8, data_len as usize));
        wav
    }

    // ── argument construction ───────────────────────────────────────

    #[test]
    fn args_name_both_formats_and_bitrate() {
        let args = build_args(AudioFormat::Ogg, AudioFormat::Mp3, 128);
        assert_eq!(
            args,
            vec![
                "-hide_banner",
                "-loglevel",
                "error",
                "-f",
                "ogg",
                "-i",
                "pipe:0",
                "-f",
                "mp3",
                "-b:a",
                "128k",
                "pipe:1",
            ]
        );
    }

    #[test]
    fn stderr_tail_trims_and_bounds() {
        let long = vec![b'x'; STDERR_TAIL_BYTES * 2];
        assert_eq!(stderr_tail(&long).len(), STDERR_TAIL_BYTES);
        assert_eq!(stderr_tail(b"  boom \n"), "boom");
    }

    // ── process behavior ────────────────────────────────────────────

    #[tokio::test]
    async fn missing_binary_is_io_error() {
        let transcoder = Transcoder::new("/nonexistent/vox-test-transcoder");
        let err = transcoder
            .convert(b"bytes", AudioFormat::Ogg, AudioFormat::Mp3, 128)
            .await
            .unwrap_err();
        match err {
            ConversionError::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn converts_wav_passthrough() {
        if !ffmpeg_available() {
            return;
        }
        let transcoder = Transcoder::new("ffmpeg");
        let converted = transcoder
            .convert(&wav_fixture(8000), AudioFormat::Wav, AudioFormat::Wav, 128)
            .await
            .unwrap();
        assert!(!converted.is_empty());
        assert_eq!(&converted[..4], b"RIFF");
    }

    #[tokio::test]
    async fn invalid_input_rejects_without_partial_output() {
        if !ffmpeg_available() {
            return;
        }
        let transcoder = Transcoder::new("ffmpeg");
        let err = transcoder
            .convert(b"this is not ogg audio", AudioFormat::Ogg, AudioFormat::Wav, 128)
            .await
            .unwrap_err();
        // Error carries the transcoder's own message, not bytes.
        assert!(matches!(err, ConversionError::Transcoder { .. }));
    }
}
