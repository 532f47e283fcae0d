use std::path::{Path, PathBuf};

use tokio::fs;

use crate::{
    cache::{get_cache_dir, get_transcript_path, is_safe_component},
    captions::{CaptionError, CaptionSource, fetch_with_fallback},
    config::{OutputFormat, PipelineConfig},
    error::{Result, TubelineError},
    format::format_outline_markdown,
    normalize::normalize,
    outline::build_outline,
    types::{Outline, Transcript},
    video_id::extract_video_id,
};

pub const NO_CAPTIONS_MESSAGE: &str =
    "Could not retrieve transcript. The video may not have captions available.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptOrigin {
    Cache,
    Source,
}

/// Progress notifications emitted by [`run`], in this order.
#[derive(Debug)]
pub enum PipelineEvent<'a> {
    VideoResolved {
        video_id: &'a str,
    },
    FetchStarted,
    TranscriptReady {
        transcript: &'a Transcript,
        origin: TranscriptOrigin,
    },
    TranscriptCleaned {
        chars: usize,
    },
    OutlineStarted,
    OutlineSaved {
        outline: &'a Outline,
        path: &'a Path,
    },
}

/// What a completed run produced.
#[derive(Debug)]
pub struct PipelineOutput {
    pub video_id: String,
    pub origin: TranscriptOrigin,
    pub transcript: Transcript,
    /// Length of the normalized transcript in characters
    pub transcript_chars: usize,
    pub document: String,
    pub output_path: PathBuf,
}

#[derive(Debug)]
pub enum RunOutcome {
    Completed(PipelineOutput),
    /// Neither the preferred nor any other caption track could be fetched.
    /// Nothing was written.
    NoCaptions {
        video_id: String,
        error: CaptionError,
    },
}

/// Load a transcript from a cached file
pub async fn load_transcript(path: &Path) -> Result<Transcript> {
    let json_content = fs::read_to_string(path).await?;
    let transcript: Transcript = serde_json::from_str(&json_content)?;
    Ok(transcript)
}

/// Save a transcript to a file
pub async fn save_transcript(transcript: &Transcript, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    let pretty_json = serde_json::to_string_pretty(transcript)?;
    fs::write(path, &pretty_json).await?;
    Ok(())
}

/// Get captions for a video, from the cache when allowed, otherwise from `source`.
///
/// Tracks are cached under their own language code, so a track obtained through
/// the any-language fallback never answers a later request for the preferred
/// language. A cache that cannot be read or written is logged and otherwise
/// ignored.
pub async fn obtain_transcript<S: CaptionSource>(
    source: &S,
    video_id: &str,
    config: &PipelineConfig,
) -> Result<(Transcript, TranscriptOrigin)> {
    let language = config.preferred_language.as_str();
    if !is_safe_component(language) {
        return Err(TubelineError::InvalidLanguage(language.to_string()));
    }

    let cache_dir = get_cache_dir(&config.cache_root, video_id);

    if !config.force
        && let Some(path) = get_transcript_path(&cache_dir, language)
        && path.exists()
    {
        match load_transcript(&path).await {
            Ok(transcript) if transcript.language_code == language => {
                tracing::debug!(path = %path.display(), "using cached transcript");
                return Ok((transcript, TranscriptOrigin::Cache));
            }
            Ok(transcript) => {
                tracing::debug!(
                    path = %path.display(),
                    cached = %transcript.language_code,
                    "cached transcript is in another language"
                );
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "ignoring unreadable cached transcript"
                );
            }
        }
    }

    let transcript = fetch_with_fallback(source, video_id, language).await?;

    match get_transcript_path(&cache_dir, &transcript.language_code) {
        Some(path) => {
            if let Err(e) = save_transcript(&transcript, &path).await {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "failed to cache transcript"
                );
            }
        }
        None => {
            tracing::warn!(
                language = %transcript.language_code,
                "not caching transcript with unusable language code"
            );
        }
    }

    Ok((transcript, TranscriptOrigin::Source))
}

/// Render an outline in the requested output format
pub fn render_outline(outline: &Outline, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Markdown => Ok(format_outline_markdown(outline)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(outline)?),
    }
}

/// Write the rendered document, replacing whatever was there
pub async fn save_outline(document: &str, path: &Path) -> Result<()> {
    fs::write(path, document)
        .await
        .map_err(|source| TubelineError::WriteFailed {
            path: path.to_path_buf(),
            source,
        })
}

/// Run the whole pipeline: resolve the id, fetch captions, clean them,
/// build the outline and write it to `config.output_path`.
///
/// Missing captions are an outcome, not an error: `RunOutcome::NoCaptions`
/// is returned and nothing is written.
pub async fn run<S, F>(
    config: &PipelineConfig,
    source: &S,
    mut on_event: F,
) -> Result<RunOutcome>
where
    S: CaptionSource,
    F: FnMut(PipelineEvent<'_>),
{
    let video_id = extract_video_id(&config.video_reference);
    tracing::info!(video_id = %video_id, "extracting transcript");
    on_event(PipelineEvent::VideoResolved {
        video_id: &video_id,
    });

    on_event(PipelineEvent::FetchStarted);
    let (transcript, origin) = match obtain_transcript(source, &video_id, config).await {
        Ok(fetched) => fetched,
        Err(TubelineError::Captions(error)) => {
            return Ok(RunOutcome::NoCaptions { video_id, error });
        }
        Err(e) => return Err(e),
    };
    on_event(PipelineEvent::TranscriptReady {
        transcript: &transcript,
        origin,
    });

    let cleaned = normalize(&transcript.text());
    let transcript_chars = cleaned.chars().count();
    on_event(PipelineEvent::TranscriptCleaned {
        chars: transcript_chars,
    });

    on_event(PipelineEvent::OutlineStarted);
    let outline = build_outline(&cleaned, &config.video_reference);
    let document = render_outline(&outline, config.format)?;
    save_outline(&document, &config.output_path).await?;
    on_event(PipelineEvent::OutlineSaved {
        outline: &outline,
        path: &config.output_path,
    });

    tracing::info!(path = %config.output_path.display(), "outline saved");

    Ok(RunOutcome::Completed(PipelineOutput {
        video_id,
        origin,
        transcript,
        transcript_chars,
        document,
        output_path: config.output_path.clone(),
    }))
}
