use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::processor::recorded_data::{FULL_SNAPSHOT_INTERVAL_MS, ProcessorConfig};

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "wireframe-replay",
    version,
    about = "Turn captured UI trees into replayable mutation records"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: wireframe-replay.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Process a JSONL file of captured frames into record bundles
    Record {
        /// Input file, one capture frame per line
        #[arg(long)]
        input: String,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// Override the full snapshot interval
        #[arg(long)]
        full_snapshot_interval_ms: Option<i64>,
    },

    /// Compute the mutations between two flat snapshots
    Diff {
        /// JSON array of wireframes (before)
        #[arg(long)]
        old: String,

        /// JSON array of wireframes (after)
        #[arg(long)]
        new: String,
    },

    /// Flatten a single captured tree
    Flatten {
        /// JSON node tree
        #[arg(long)]
        input: String,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `wireframe-replay.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub recorder: RecorderConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecorderConfig {
    #[serde(default = "default_interval")]
    pub full_snapshot_interval_ms: i64,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            full_snapshot_interval_ms: FULL_SNAPSHOT_INTERVAL_MS,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub pretty: bool,
}

// Serde default helpers
fn default_interval() -> i64 { FULL_SNAPSHOT_INTERVAL_MS }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("wireframe-replay.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => match serde_yaml::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = config_path, error = %e, "ignoring malformed config file");
                AppConfig::default()
            }
        },
        Err(_) => AppConfig::default(),
    }
}

// ============================================================================
// Config Builders (merge CLI args with config file)
// ============================================================================

/// Build the processor configuration: CLI value first, then config file.
pub fn build_processor_config(
    config: &AppConfig,
    full_snapshot_interval_ms: Option<i64>,
) -> ProcessorConfig {
    ProcessorConfig {
        full_snapshot_interval_ms: full_snapshot_interval_ms
            .unwrap_or(config.recorder.full_snapshot_interval_ms),
    }
}
