use thiserror::Error;

use crate::types::Transcript;

#[derive(Error, Debug)]
pub enum CaptionError {
    #[error("No {language} captions for video {video_id}")]
    PreferredLanguageUnavailable { video_id: String, language: String },

    #[error("No captions available for video {video_id}")]
    NoCaptionsAvailable { video_id: String },

    #[error("Video {video_id} is unavailable: {reason}")]
    VideoUnavailable { video_id: String, reason: String },

    #[error("Unexpected response from caption service: {reason}")]
    MalformedResponse { reason: String },

    #[error("Caption request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Anything that can produce a caption track for a video id.
///
/// `language` of `None` means "any track will do".
pub trait CaptionSource {
    async fn fetch(
        &self,
        video_id: &str,
        language: Option<&str>,
    ) -> Result<Transcript, CaptionError>;
}

/// Fetch captions in `language`, falling back once to any available track.
pub async fn fetch_with_fallback<S: CaptionSource>(
    source: &S,
    video_id: &str,
    language: &str,
) -> Result<Transcript, CaptionError> {
    match source.fetch(video_id, Some(language)).await {
        Ok(transcript) => Ok(transcript),
        Err(preferred_err) => {
            tracing::warn!(
                video_id,
                language,
                error = %preferred_err,
                "preferred captions unavailable, trying any language"
            );

            source.fetch(video_id, None).await.map_err(|fallback_err| {
                tracing::warn!(video_id, error = %fallback_err, "fallback caption fetch failed");
                CaptionError::NoCaptionsAvailable {
                    video_id: video_id.to_string(),
                }
            })
        }
    }
}


#[cfg(test)]
mod tests {
    use super::{testing::StaticCaptions, *};

    #[tokio::test]
    async fn test_preferred_language_used_first() {
        let source = StaticCaptions::default()
            .with_track(Some("en"), &["hello"])
            .with_track(None, &["hallo"]);

        let transcript = fetch_with_fallback(&source, "vid", "en").await.unwrap();
        assert_eq!(transcript.text(), "hello");
        assert_eq!(*source.calls.borrow(), vec![Some("en".to_string())]);
    }

    #[tokio::test]
    async fn test_falls_back_to_any_language() {
        let source = StaticCaptions::default().with_track(None, &["hallo", "welt"]);

        let transcript = fetch_with_fallback(&source, "vid", "en").await.unwrap();
        assert_eq!(transcript.text(), "hallo welt");
        assert_eq!(transcript.language_code, "de");
        assert_eq!(
            *source.calls.borrow(),
            vec![Some("en".to_string()), None]
        );
    }

    #[tokio::test]
    async fn test_both_attempts_fail() {
        let source = StaticCaptions::default();

        let err = fetch_with_fallback(&source, "vid", "en").await.unwrap_err();
        assert!(matches!(
            err,
            CaptionError::NoCaptionsAvailable { ref video_id } if video_id == "vid"
        ));
        assert_eq!(source.calls.borrow().len(), 2);
    }
}
