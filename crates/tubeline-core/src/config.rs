use std::path::PathBuf;

use crate::cache::get_root_cache_dir;

pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_OUTPUT_STEM: &str = "youtube_transcript_outline";
/// Characters of the rendered document echoed after a run.
pub const PREVIEW_CHARS: usize = 1000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Markdown,
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Markdown => "md",
            OutputFormat::Json => "json",
        }
    }

    pub fn default_output_path(&self) -> PathBuf {
        PathBuf::from(format!("{}.{}", DEFAULT_OUTPUT_STEM, self.extension()))
    }
}

/// Everything a single run needs to know.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Video URL or bare id
    pub video_reference: String,
    pub output_path: PathBuf,
    pub preferred_language: String,
    pub format: OutputFormat,
    /// Ignore cached caption tracks
    pub force: bool,
    pub cache_root: PathBuf,
}

impl PipelineConfig {
    pub fn new(video_reference: impl Into<String>) -> Self {
        let format = OutputFormat::default();
        Self {
            video_reference: video_reference.into(),
            output_path: format.default_output_path(),
            preferred_language: DEFAULT_LANGUAGE.to_string(),
            format,
            force: false,
            cache_root: get_root_cache_dir(),
        }
    }
}
