//! Tubeline Core Library
//!
//! Fetches YouTube caption tracks, cleans the text and turns it into a
//! blog-style Markdown outline with naive word-frequency takeaways.

pub mod cache;
pub mod captions;
pub mod config;
pub mod error;
pub mod format;
pub mod normalize;
pub mod outline;
pub mod pipeline;
pub mod types;
pub mod video_id;
pub mod youtube;

// Re-export commonly used items at crate root
pub use cache::{get_cache_dir, get_root_cache_dir, get_transcript_path, is_safe_component};
pub use captions::{CaptionError, CaptionSource, fetch_with_fallback};
pub use config::{OutputFormat, PREVIEW_CHARS, PipelineConfig};
pub use error::{Result, TubelineError};
pub use format::{format_outline, format_outline_markdown, format_timestamp, preview};
pub use normalize::{normalize, normalize_opt};
pub use outline::{
    build_outline, group_paragraphs, key_takeaways, split_sentences, word_frequencies,
};
pub use pipeline::{
    NO_CAPTIONS_MESSAGE, PipelineEvent, PipelineOutput, RunOutcome, TranscriptOrigin,
    load_transcript, obtain_transcript, render_outline, run, save_outline, save_transcript,
};
pub use types::{KeyTakeaway, Outline, Segment, Transcript};
pub use video_id::extract_video_id;
pub use youtube::YoutubeCaptions;
