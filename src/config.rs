//! Configuration for recap.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (RECAP_WHISPER_MODEL, RECAP_ANNOTATOR_URL, ...)
//! 2. Config file (.recap/config.yaml)
//! 3. Defaults
//!
//! Config file discovery:
//! - Searches current directory and parents for .recap/config.yaml,
//!   then falls back to ~/.recap/config.yaml
//!
//! Analysis tunables (mention dedup gap, engagement thresholds) live here
//! so they resolve once and are shared read-only across requests. Their
//! defaults match the shipped heuristics; they are tuning knobs, not
//! invariants.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<std::result::Result<ResolvedConfig, String>> = OnceLock::new();

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub collaborators: CollaboratorsConfig,
    #[serde(default)]
    pub tunables: Tunables,
}

/// Collaborator endpoints and the whisper model selection
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CollaboratorsConfig {
    /// Whisper model name (default "base")
    pub whisper_model: Option<String>,

    /// Diarization sidecar base URL (e.g., http://localhost:7001)
    pub diarization_url: Option<String>,

    /// Sentence/NER annotation sidecar base URL
    pub annotator_url: Option<String>,

    /// Summarization sidecar base URL
    pub summarizer_url: Option<String>,
}

/// Mention-count thresholds for the engagement tiers
#[derive(Debug, Clone, Deserialize)]
pub struct EngagementThresholds {
    #[serde(default = "default_engagement_high")]
    pub high: usize,

    #[serde(default = "default_engagement_medium")]
    pub medium: usize,

    #[serde(default = "default_engagement_moderate")]
    pub moderate: usize,
}

fn default_engagement_high() -> usize {
    20
}
fn default_engagement_medium() -> usize {
    10
}
fn default_engagement_moderate() -> usize {
    5
}

impl Default for EngagementThresholds {
    fn default() -> Self {
        Self {
            high: default_engagement_high(),
            medium: default_engagement_medium(),
            moderate: default_engagement_moderate(),
        }
    }
}

/// Heuristic tuning knobs shared read-only across requests
#[derive(Debug, Clone, Deserialize)]
pub struct Tunables {
    /// Minimum byte gap between retained mentions (default: 5)
    #[serde(default = "default_mention_gap")]
    pub mention_gap_bytes: usize,

    /// Context window on each side of a mention, in bytes (default: 50)
    #[serde(default = "default_context_window")]
    pub context_window_bytes: usize,

    /// Minimum captured task text length (default: 5)
    #[serde(default = "default_min_task_length")]
    pub min_task_length: usize,

    /// Engagement tier thresholds
    #[serde(default)]
    pub engagement: EngagementThresholds,

    /// Personal summary target length in tokens (default: 150)
    #[serde(default = "default_personal_summary_max")]
    pub personal_summary_max_tokens: usize,

    /// Personal summary minimum length in tokens (default: 30)
    #[serde(default = "default_personal_summary_min")]
    pub personal_summary_min_tokens: usize,

    /// Below this many chars the personal summary is skipped (default: 10)
    #[serde(default = "default_min_personal_transcript")]
    pub min_personal_transcript_chars: usize,
}

fn default_mention_gap() -> usize {
    5
}
fn default_context_window() -> usize {
    50
}
fn default_min_task_length() -> usize {
    5
}
fn default_personal_summary_max() -> usize {
    150
}
fn default_personal_summary_min() -> usize {
    30
}
fn default_min_personal_transcript() -> usize {
    10
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            mention_gap_bytes: default_mention_gap(),
            context_window_bytes: default_context_window(),
            min_task_length: default_min_task_length(),
            engagement: EngagementThresholds::default(),
            personal_summary_max_tokens: default_personal_summary_max(),
            personal_summary_min_tokens: default_personal_summary_min(),
            min_personal_transcript_chars: default_min_personal_transcript(),
        }
    }
}

/// Resolved configuration
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Whisper model name
    pub whisper_model: String,

    /// Diarization sidecar base URL, if configured
    pub diarization_url: Option<String>,

    /// Annotation sidecar base URL, if configured
    pub annotator_url: Option<String>,

    /// Summarization sidecar base URL, if configured
    pub summarizer_url: Option<String>,

    /// Analysis tunables
    pub tunables: Tunables,

    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

/// Find config file by searching current directory and parents,
/// falling back to the home directory
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".recap").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    let home_config = dirs::home_dir()?.join(".recap").join("config.yaml");
    if home_config.exists() {
        return Some(home_config);
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Env var override, falling back to a config-file value
fn env_or(name: &str, file_value: Option<String>) -> Option<String> {
    std::env::var(name).ok().or(file_value)
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let config_file = find_config_file();

    let (collaborators, tunables) = if let Some(ref config_path) = config_file {
        let config = load_config_file(config_path)?;
        (config.collaborators, config.tunables)
    } else {
        (CollaboratorsConfig::default(), Tunables::default())
    };

    Ok(ResolvedConfig {
        whisper_model: env_or("RECAP_WHISPER_MODEL", collaborators.whisper_model)
            .unwrap_or_else(|| "base".to_string()),
        diarization_url: env_or("RECAP_DIARIZATION_URL", collaborators.diarization_url),
        annotator_url: env_or("RECAP_ANNOTATOR_URL", collaborators.annotator_url),
        summarizer_url: env_or("RECAP_SUMMARIZER_URL", collaborators.summarizer_url),
        tunables,
        config_file,
    })
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| e.to_string()));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Force reload configuration (useful for testing)
pub fn reload_config() -> Result<ResolvedConfig> {
    load_config()
}
