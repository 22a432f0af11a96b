//! Command-line interface for recap.
//!
//! Provides commands for analyzing pre-produced transcription and
//! diarization results, processing an audio file end-to-end through the
//! collaborator adapters, and inspecting resolved configuration.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::adapters::{
    Annotator, CollaboratorError, DiarizationClient, HttpAnnotator, HttpSummarizer, Summarizer,
    WhisperTranscriber,
};
use crate::config::{config, ResolvedConfig};
use crate::core::MeetingAnalyzer;
use crate::domain::{DiarizationInterval, MeetingReport, TranscriptionOutput};

/// recap - Meeting transcript intelligence pipeline
#[derive(Parser, Debug)]
#[command(name = "recap")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze pre-produced transcription (and optional diarization) JSON
    Analyze {
        /// Transcription result JSON ({text, segments, language})
        #[arg(short, long)]
        transcription: PathBuf,

        /// Diarization intervals JSON ([{start, end, speaker}])
        #[arg(short, long)]
        diarization: Option<PathBuf>,

        /// Participant name for mention tracking and personal insights
        #[arg(short, long)]
        user: Option<String>,

        /// Write the report to a file (stdout if not provided)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Transcribe, diarize, and analyze an audio file
    Process {
        /// Audio file to process
        audio: PathBuf,

        /// Participant name for mention tracking and personal insights
        #[arg(short, long)]
        user: Option<String>,

        /// Write the report to a file (stdout if not provided)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    /// Execute the parsed command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Analyze {
                transcription,
                diarization,
                user,
                output,
            } => cmd_analyze(&transcription, diarization.as_deref(), user.as_deref(), output.as_deref()).await,

            Commands::Process {
                audio,
                user,
                output,
            } => cmd_process(&audio, user.as_deref(), output.as_deref()).await,

            Commands::Config => cmd_config(),
        }
    }
}

/// Build the analyzer from resolved configuration.
///
/// The annotation sidecar is required (action item extraction depends on
/// it); the summarizer is optional.
fn build_analyzer(config: &ResolvedConfig) -> Result<MeetingAnalyzer> {
    let annotator_url = config
        .annotator_url
        .as_ref()
        .ok_or(CollaboratorError::NotConfigured("annotator"))
        .context(
            "Set RECAP_ANNOTATOR_URL or add collaborators.annotator_url to .recap/config.yaml \
             (action item extraction requires the annotation sidecar)",
        )?;

    let annotator: Arc<dyn Annotator> = Arc::new(HttpAnnotator::new(annotator_url));
    let summarizer: Option<Arc<dyn Summarizer>> = config
        .summarizer_url
        .as_ref()
        .map(|url| Arc::new(HttpSummarizer::new(url)) as Arc<dyn Summarizer>);

    Ok(MeetingAnalyzer::new(annotator, summarizer, &config.tunables))
}

async fn cmd_analyze(
    transcription_path: &Path,
    diarization_path: Option<&Path>,
    user: Option<&str>,
    output: Option<&Path>,
) -> Result<()> {
    let config = config()?;
    let analyzer = build_analyzer(config)?;

    let transcription: TranscriptionOutput = read_json(transcription_path)
        .with_context(|| format!("Failed to read transcription: {}", transcription_path.display()))?;

    let diarization: Vec<DiarizationInterval> = match diarization_path {
        Some(path) => read_json(path)
            .with_context(|| format!("Failed to read diarization: {}", path.display()))?,
        None => Vec::new(),
    };

    let report = analyzer.analyze(transcription, diarization, user).await?;
    write_report(&report, output)
}

async fn cmd_process(audio: &Path, user: Option<&str>, output: Option<&Path>) -> Result<()> {
    let config = config()?;
    let analyzer = build_analyzer(config)?;

    let transcriber = WhisperTranscriber::new(&config.whisper_model);
    let transcription = transcriber
        .transcribe(audio)
        .await
        .with_context(|| format!("Transcription failed: {}", audio.display()))?;

    let diarization = DiarizationClient::new(config.diarization_url.clone())
        .diarize(audio)
        .await;

    let report = analyzer.analyze(transcription, diarization, user).await?;
    write_report(&report, output)
}

fn cmd_config() -> Result<()> {
    let config = config()?;

    println!("Resolved configuration:");
    match &config.config_file {
        Some(path) => println!("  config file:     {}", path.display()),
        None => println!("  config file:     (none found)"),
    }
    println!("  whisper model:   {}", config.whisper_model);
    println!(
        "  diarization url: {}",
        config.diarization_url.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  annotator url:   {}",
        config.annotator_url.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  summarizer url:  {}",
        config.summarizer_url.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  mention gap:     {} bytes",
        config.tunables.mention_gap_bytes
    );
    println!(
        "  engagement:      high>={} medium>={} moderate>={}",
        config.tunables.engagement.high,
        config.tunables.engagement.medium,
        config.tunables.engagement.moderate
    );

    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON: {}", path.display()))
}

fn write_report(report: &MeetingReport, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;

    match output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write report: {}", path.display()))?;
            println!("Report written to {}", path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}
