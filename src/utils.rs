use float_timer::config::MAX_INTERVAL_SECONDS;
use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;
use web_sys::{File, Url};

static AUDIO_FILE_NAME_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\.(mp3|wav)$").unwrap());

const AUDIO_MIME_TYPES: &[&str] = &[
    "audio/mpeg",
    "audio/mp3",
    "audio/wav",
    "audio/x-wav",
    "audio/wave",
];

/// Current wall-clock time in whole seconds since the Unix epoch.
pub fn now_unix_seconds() -> u64 {
    (js_sys::Date::now() / 1000.0).floor() as u64
}

/// Whether an uploaded file looks like mp3/wav. The file name is only
/// consulted when the browser reports no MIME type.
pub fn is_supported_audio(name: &str, mime: &str) -> bool {
    if mime.is_empty() {
        AUDIO_FILE_NAME_REGEX.is_match(name)
    } else {
        AUDIO_MIME_TYPES.contains(&mime.to_ascii_lowercase().as_str())
    }
}

/// Create an object URL for an accepted audio file.
pub fn object_url_for(file: &File) -> Option<String> {
    if !is_supported_audio(&file.name(), &file.type_()) {
        warn!(
            "Rejected custom sound '{}' (type '{}'): only mp3/wav are supported",
            file.name(),
            file.type_()
        );
        return None;
    }
    match Url::create_object_url_with_blob(file) {
        Ok(url) => Some(url),
        Err(e) => {
            warn!("Could not create object URL for '{}': {:?}", file.name(), e);
            None
        }
    }
}

pub fn revoke_object_url(url: &str) {
    if let Err(e) = Url::revoke_object_url(url) {
        warn!("Could not revoke object URL {}: {:?}", url, e);
    }
}

/// Parse a volume slider value into `[0, 1]`.
pub fn parse_volume(input: &str) -> Option<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| v.clamp(0.0, 1.0))
}

/// Parse a `<select>` value into a preset index.
pub fn parse_index(input: &str) -> Option<usize> {
    input.trim().parse::<usize>().ok()
}

/// Parse the periodic interval input (whole seconds, 1..=MAX_INTERVAL_SECONDS).
pub fn parse_interval(input: &str) -> Option<u32> {
    input
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|s| (1..=MAX_INTERVAL_SECONDS).contains(s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_mp3_and_wav_by_mime() {
        assert!(is_supported_audio("x.bin", "audio/mpeg"));
        assert!(is_supported_audio("x", "audio/WAV"));
        assert!(!is_supported_audio("song.mp3", "audio/ogg"));
    }

    #[test]
    fn falls_back_to_file_name_without_mime() {
        assert!(is_supported_audio("Bell.MP3", ""));
        assert!(is_supported_audio("beep.wav", ""));
        assert!(!is_supported_audio("notes.txt", ""));
        assert!(!is_supported_audio("mp3", ""));
    }

    #[test]
    fn parses_inputs() {
        assert_eq!(parse_volume("0.3"), Some(0.3));
        assert_eq!(parse_volume("7"), Some(1.0));
        assert_eq!(parse_volume("NaN"), None);
        assert_eq!(parse_volume("loud"), None);

        assert_eq!(parse_index(" 2 "), Some(2));
        assert_eq!(parse_index("-1"), None);

        assert_eq!(parse_interval("5"), Some(5));
        assert_eq!(parse_interval("0"), None);
        assert_eq!(parse_interval("3601"), None);
    }
}
