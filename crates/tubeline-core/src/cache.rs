use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

/// True for strings usable verbatim as a single path component
/// (video ids, language codes).
pub fn is_safe_component(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Get the cache directory for a given video id.
///
/// Plain ids are used as-is; anything else (an unrecognized URL passed
/// through as an id) is keyed by its SHA-256.
pub fn get_cache_dir(root: &Path, video_id: &str) -> PathBuf {
    if is_safe_component(video_id) {
        root.join(video_id)
    } else {
        root.join(hex::encode(Sha256::digest(video_id.as_bytes())))
    }
}

pub fn get_root_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join("tubeline")
}

/// Get the path for a cached transcript file (language aware).
/// Returns `None` when `lang` is not a plain language code.
pub fn get_transcript_path(cache_dir: &Path, lang: &str) -> Option<PathBuf> {
    is_safe_component(lang).then(|| cache_dir.join(format!("transcript_{}.json", lang)))
}
