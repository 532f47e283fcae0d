use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use anyhow::Result;
use clap::{Parser, ValueEnum};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use tubeline_core::{
    NO_CAPTIONS_MESSAGE, OutputFormat, PREVIEW_CHARS, PipelineConfig, PipelineEvent, RunOutcome,
    TranscriptOrigin, YoutubeCaptions, config::DEFAULT_LANGUAGE, format_timestamp, preview, run,
};

fn format_duration(d: Duration) -> String {
    if d.as_secs() < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else {
        let secs = d.as_secs();
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

/// CLI wrapper for OutputFormat (needed for clap ValueEnum)
#[derive(Clone, Default, ValueEnum)]
enum CliFormat {
    #[default]
    Markdown,
    Json,
}

impl From<CliFormat> for OutputFormat {
    fn from(cli: CliFormat) -> Self {
        match cli {
            CliFormat::Markdown => OutputFormat::Markdown,
            CliFormat::Json => OutputFormat::Json,
        }
    }
}

#[derive(Parser)]
#[command(name = "tubeline", version)]
#[command(about = "Fetch YouTube captions and turn them into a blog-style Markdown outline")]
struct Cli {
    /// Video URL or bare video id
    url: String,

    /// Output file. Defaults to youtube_transcript_outline.md (.json with --format json)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Preferred caption language (e.g., "en", "de"). Falls back to any available track.
    #[arg(short, long, default_value = DEFAULT_LANGUAGE)]
    lang: String,

    /// Output format
    #[arg(long, value_enum, default_value = "markdown")]
    format: CliFormat,

    /// Ignore cached captions and fetch them again
    #[arg(short, long)]
    force: bool,

    /// Show debug logs on stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_config(self) -> PipelineConfig {
        let format: OutputFormat = self.format.into();
        let mut config = PipelineConfig::new(self.url);
        config.output_path = self
            .output
            .unwrap_or_else(|| format.default_output_path());
        config.preferred_language = self.lang;
        config.format = format;
        config.force = self.force;
        config
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Turns pipeline events into spinners and status lines
struct Progress {
    spinner: Option<ProgressBar>,
    step_start: Instant,
}

impl Progress {
    fn new() -> Self {
        Self {
            spinner: None,
            step_start: Instant::now(),
        }
    }

    fn start(&mut self, msg: &str) {
        self.step_start = Instant::now();
        self.spinner = Some(create_spinner(msg));
    }

    fn finish(&mut self, msg: String) {
        match self.spinner.take() {
            Some(spinner) => spinner.finish_with_message(msg),
            None => println!("{}", msg),
        }
    }

    fn abandon(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.abandon();
        }
    }

    fn elapsed(&self) -> String {
        format!("[{}]", format_duration(self.step_start.elapsed()))
    }

    fn handle(&mut self, event: PipelineEvent<'_>) {
        match event {
            PipelineEvent::VideoResolved { video_id } => {
                println!("{} {}", style("Video ID:").dim(), style(video_id).yellow());
                println!("{}", style("─".repeat(60)).dim());
            }
            PipelineEvent::FetchStarted => self.start("Fetching transcript..."),
            PipelineEvent::TranscriptReady { transcript, origin } => {
                let note = match origin {
                    TranscriptOrigin::Cache => "(cached)".to_string(),
                    TranscriptOrigin::Source => self.elapsed(),
                };
                self.finish(format!(
                    "{} Transcript fetched: {} segments, {}, {} {}",
                    style("✓").green().bold(),
                    transcript.segments.len(),
                    format_timestamp(transcript.duration_seconds()),
                    style(&transcript.language_code).yellow(),
                    style(note).dim()
                ));
            }
            PipelineEvent::TranscriptCleaned { chars } => {
                println!(
                    "{} Transcript length: {} characters",
                    style("✓").green().bold(),
                    chars
                );
            }
            PipelineEvent::OutlineStarted => self.start("Creating blog-style outline..."),
            PipelineEvent::OutlineSaved { outline, .. } => {
                let note = self.elapsed();
                self.finish(format!(
                    "{} Outline created: {} sections, {} takeaways {}",
                    style("✓").green().bold(),
                    outline.sections.len(),
                    outline.key_takeaways.len(),
                    style(note).dim()
                ));
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = cli.into_config();

    // Fail on a broken HTTP client before doing anything else
    let captions = YoutubeCaptions::new()?;

    println!(
        "\n{}  {}\n",
        style("tubeline").cyan().bold(),
        style("Transcript Outliner").dim()
    );
    println!(
        "{} {}",
        style("Extracting transcript from:").dim(),
        style(&config.video_reference).cyan()
    );

    let total_start = Instant::now();
    let mut progress = Progress::new();

    let result = run(&config, &captions, |event| progress.handle(event)).await;
    let outcome = match result {
        Ok(outcome) => outcome,
        Err(e) => {
            progress.abandon();
            return Err(e.into());
        }
    };

    let output = match outcome {
        RunOutcome::Completed(output) => output,
        RunOutcome::NoCaptions { error, .. } => {
            progress.finish(format!("{} {}", style("✗").red().bold(), style(error).dim()));
            println!("\n{} {}", style("Error:").red().bold(), NO_CAPTIONS_MESSAGE);
            return Ok(());
        }
    };

    println!(
        "\n{} {}",
        style("Total time:").dim(),
        style(format_duration(total_start.elapsed())).cyan().bold()
    );
    println!(
        "{} {}\n",
        style("Saved:").dim(),
        style(output.output_path.display()).cyan()
    );
    println!("{}", style("─".repeat(60)).dim());
    println!("{}", style("OUTLINE PREVIEW").bold());
    println!("{}", style("─".repeat(60)).dim());

    println!("{}", preview(&output.document, PREVIEW_CHARS));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration_under_a_minute() {
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.5s");
        assert_eq!(format_duration(Duration::from_millis(59_940)), "59.9s");
    }

    #[test]
    fn test_format_duration_minutes() {
        assert_eq!(format_duration(Duration::from_secs(60)), "1m 0s");
        assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
        assert_eq!(format_duration(Duration::from_millis(119_700)), "1m 59s");
        assert_eq!(format_duration(Duration::from_secs(3725)), "62m 5s");
    }

    #[test]
    fn test_cli_into_config() {
        let cli = Cli::parse_from([
            "tubeline",
            "https://youtu.be/abc",
            "--lang",
            "de",
            "--format",
            "json",
            "--force",
        ]);
        let config = cli.into_config();
        assert_eq!(config.video_reference, "https://youtu.be/abc");
        assert_eq!(config.preferred_language, "de");
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.output_path, PathBuf::from("youtube_transcript_outline.json"));
        assert!(config.force);
    }
}
