use std::path::PathBuf;

use clap::Parser;

/// Voxclone speech generator
#[derive(Debug, Parser)]
#[command(name = "voxclone", about = "Generate speech with a hosted XTTS v2 voice-cloning space")]
pub struct Args {
    /// Text to synthesize; falls back to the configured default prompt
    pub text: Option<String>,

    /// Path to configuration file
    #[arg(short, long, default_value = "voxclone.toml", env = "VOXCLONE_CONFIG")]
    pub config: PathBuf,

    /// Prosody randomness (0.1 to 1.0)
    #[arg(long)]
    pub temperature: Option<f64>,

    /// Nucleus sampling threshold (0.1 to 1.0)
    #[arg(long)]
    pub top_p: Option<f64>,

    /// Vocabulary selection limit (1 to 100)
    #[arg(long)]
    pub top_k: Option<u32>,

    /// Random seed for reproducible output
    #[arg(long)]
    pub seed: Option<i64>,

    /// Use one of the canned example prompts instead of free text
    #[arg(long, value_name = "INDEX", conflicts_with = "text")]
    pub example: Option<usize>,

    /// Try to wake the space when it appears to be asleep
    #[arg(long)]
    pub wake: bool,

    /// Download the generated audio to this path
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Log filter (tracing `EnvFilter` syntax)
    #[arg(long, default_value = "info", env = "VOXCLONE_LOG")]
    pub log: String,
}
