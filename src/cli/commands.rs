use std::io::{BufRead, BufReader};

use tracing::{debug, info};

use crate::cli::config::{AppConfig, build_processor_config};
use crate::error::{ReplayError, Result};
use crate::model::{capture::CaptureFrame, wireframe::Wireframe};
use crate::processor::{
    flattener::{Node, flatten},
    mutation_resolver::resolve_mutations,
    recorded_data::RecordedDataProcessor,
};
use crate::writer::jsonl::JsonlRecordWriter;

// ============================================================================
// record subcommand
// ============================================================================

/// Run every frame of `input` through the processor. Returns the number of
/// bundles written.
pub fn cmd_record(
    input: &str,
    output: Option<&str>,
    full_snapshot_interval_ms: Option<i64>,
    config: &AppConfig,
) -> Result<usize> {
    let frames = read_frames(input)?;
    let writer = match output {
        Some(path) => JsonlRecordWriter::create(path)?,
        None => JsonlRecordWriter::stdout(),
    }
    .pretty(config.output.pretty);

    let processor_config = build_processor_config(config, full_snapshot_interval_ms);
    let mut processor = RecordedDataProcessor::with_config(writer, processor_config);

    info!(frames = frames.len(), input, "processing capture frames");

    for frame in frames {
        processor.process_snapshot(&frame.root, &frame.system, frame.context, frame.timestamp);
    }

    let mut writer = processor.into_writer();
    writer.flush();
    Ok(writer.written())
}

/// Parse a JSONL capture file. Blank lines are skipped.
pub fn read_frames(path: &str) -> Result<Vec<CaptureFrame>> {
    let file = std::fs::File::open(path)?;
    let mut frames = Vec::new();

    for (idx, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let frame: CaptureFrame = serde_json::from_str(&line)
            .map_err(|e| ReplayError::json(format!("{}:{}", path, idx + 1), e))?;
        frames.push(frame);
    }

    debug!(count = frames.len(), path, "read capture frames");
    Ok(frames)
}

// ============================================================================
// diff subcommand
// ============================================================================

/// Diff two flat snapshots. Returns the mutations as JSON, or `None` when
/// the snapshots are identical.
pub fn cmd_diff(old_path: &str, new_path: &str, pretty: bool) -> Result<Option<String>> {
    let old = read_snapshot(old_path)?;
    let new = read_snapshot(new_path)?;

    let mutations = match resolve_mutations(&old, &new) {
        Some(m) => m,
        None => return Ok(None),
    };

    to_json(&mutations, pretty, "mutations").map(Some)
}

fn read_snapshot(path: &str) -> Result<Vec<Wireframe>> {
    let content = std::fs::read_to_string(path)?;
    let snapshot: Vec<Wireframe> =
        serde_json::from_str(&content).map_err(|e| ReplayError::json(path, e))?;

    let mut seen = std::collections::HashSet::new();
    if let Some(dup) = snapshot.iter().find(|w| !seen.insert(w.id)) {
        return Err(ReplayError::InvalidInput(format!(
            "{}: wireframe id {} appears more than once",
            path, dup.id
        )));
    }

    Ok(snapshot)
}

// ============================================================================
// flatten subcommand
// ============================================================================

pub fn cmd_flatten(input: &str, pretty: bool) -> Result<String> {
    let content = std::fs::read_to_string(input)?;
    let root: Node = serde_json::from_str(&content).map_err(|e| ReplayError::json(input, e))?;

    let snapshot = flatten(&root);
    to_json(&snapshot, pretty, "snapshot")
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool, context: &str) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    json.map_err(|e| ReplayError::json(context, e))
}
