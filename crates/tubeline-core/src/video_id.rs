use std::sync::LazyLock;

use regex::Regex;

static VIDEO_ID_PATTERNS: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        Regex::new(r"(?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/)([^&\n?#]+)")
            .unwrap(),
        Regex::new(r"youtube\.com/watch\?.*v=([^&\n?#]+)").unwrap(),
    ]
});

/// Extract the video id from a YouTube URL.
///
/// Recognizes `watch?v=`, `youtu.be/` and `embed/` links, including `watch`
/// links where `v` is not the first query parameter. Anything else is assumed
/// to already be a bare id and is returned unchanged.
pub fn extract_video_id(reference: &str) -> String {
    VIDEO_ID_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(reference))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| reference.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watch_url() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=5zFUBD2rRis"),
            "5zFUBD2rRis"
        );
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&list=PLrAXtmRdnEQy"),
            "dQw4w9WgXcQ"
        );
    }

    #[test]
    fn test_short_url() {
        assert_eq!(extract_video_id("https://youtu.be/dQw4w9WgXcQ?t=30"), "dQw4w9WgXcQ");
        assert_eq!(extract_video_id("youtu.be/a_b-C123"), "a_b-C123");
    }

    #[test]
    fn test_embed_url() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/embed/dQw4w9WgXcQ#t=5"),
            "dQw4w9WgXcQ"
        );
    }

    #[test]
    fn test_v_param_not_first() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?feature=shared&v=wXVvfFMTyzY"),
            "wXVvfFMTyzY"
        );
    }

    #[test]
    fn test_bare_id_passes_through() {
        assert_eq!(extract_video_id("5_EJwYeQusM"), "5_EJwYeQusM");
        assert_eq!(extract_video_id("https://vimeo.com/123456789"), "https://vimeo.com/123456789");
        assert_eq!(extract_video_id(""), "");
    }
}
