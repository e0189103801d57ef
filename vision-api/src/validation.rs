//! Upload checks run before any network or database work.

use vision_common::{Error, Result};

/// Largest accepted upload: 25 MiB, the provider's free-tier ceiling.
pub const MAX_AUDIO_BYTES: usize = 25 * 1024 * 1024;

/// Extensions the provider documents as supported.
pub const SUPPORTED_FORMATS: &[&str] = &[
    "mp3", "wav", "m4a", "flac", "ogg", "webm", "mp4", "mpeg", "mpga",
];

/// MIME type used when the caller does not supply one.
pub const DEFAULT_MIME_TYPE: &str = "audio/mpeg";

/// Lowercased text after the last dot, or empty when there is no dot.
pub fn file_extension(filename: &str) -> String {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default()
}

pub fn is_supported_format(filename: &str) -> bool {
    SUPPORTED_FORMATS.contains(&file_extension(filename).as_str())
}

/// Reject empty and oversized uploads.
///
/// An unrecognized extension only logs a warning; the provider gets a
/// chance to handle the file anyway.
pub fn validate_audio(audio_bytes: &[u8], filename: &str) -> Result<()> {
    if audio_bytes.len() > MAX_AUDIO_BYTES {
        tracing::warn!(filename, bytes = audio_bytes.len(), "Rejected oversized upload");
        return Err(Error::InvalidInput(format!(
            "File size exceeds {}MB limit",
            MAX_AUDIO_BYTES / (1024 * 1024)
        )));
    }

    if audio_bytes.is_empty() {
        tracing::warn!(filename, "Rejected empty upload");
        return Err(Error::InvalidInput("Audio file is empty".into()));
    }

    if !is_supported_format(filename) {
        tracing::warn!(
            filename,
            extension = %file_extension(filename),
            "Unsupported file format, attempting transcription anyway"
        );
    }

    Ok(())
}

/// Best-guess MIME type from a filename's extension.
#[allow(clippy::match_same_arms)]
pub fn mime_for_filename(filename: &str) -> &'static str {
    match file_extension(filename).as_str() {
        "mp3" | "mpeg" | "mpga" => "audio/mpeg",
        "wav" => "audio/wav",
        "m4a" => "audio/m4a",
        "flac" => "audio/flac",
        "ogg" | "oga" => "audio/ogg",
        "webm" => "audio/webm",
        "mp4" => "audio/mp4",
        _ => DEFAULT_MIME_TYPE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_rejected() {
        let err = validate_audio(&[], "empty.mp3").unwrap_err();
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn oversized_file_is_rejected() {
        let audio = vec![b'x'; 26 * 1024 * 1024];
        let err = validate_audio(&audio, "large.mp3").unwrap_err();
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("25MB"));
    }

    #[test]
    fn exactly_at_limit_is_accepted() {
        let audio = vec![0u8; MAX_AUDIO_BYTES];
        assert!(validate_audio(&audio, "edge.wav").is_ok());
    }

    #[test]
    fn unknown_extension_is_only_a_warning() {
        assert!(validate_audio(b"data", "notes.txt").is_ok());
        assert!(validate_audio(b"data", "no_extension").is_ok());
    }

    #[test]
    fn extension_parsing() {
        assert_eq!(file_extension("Talk.M4A"), "m4a");
        assert_eq!(file_extension("archive.tar.ogg"), "ogg");
        assert_eq!(file_extension("README"), "");
        assert!(is_supported_format("song.MP3"));
        assert!(is_supported_format("voice.mpga"));
        assert!(!is_supported_format("video.mkv"));
    }

    #[test]
    fn mime_mapping() {
        assert_eq!(mime_for_filename("a.mp3"), "audio/mpeg");
        assert_eq!(mime_for_filename("a.WAV"), "audio/wav");
        assert_eq!(mime_for_filename("a.m4a"), "audio/m4a");
        assert_eq!(mime_for_filename("a.flac"), "audio/flac");
        assert_eq!(mime_for_filename("a.ogg"), "audio/ogg");
        assert_eq!(mime_for_filename("a.webm"), "audio/webm");
        assert_eq!(mime_for_filename("a.mp4"), "audio/mp4");
        assert_eq!(mime_for_filename("a.xyz"), DEFAULT_MIME_TYPE);
        assert_eq!(mime_for_filename("noext"), DEFAULT_MIME_TYPE);
    }
}
