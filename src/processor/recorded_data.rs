use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::model::{
    context::{Orientation, SystemInformation, ViewContext},
    record::{IncrementalData, MobileRecord, RecordBundle},
    wireframe::Wireframe,
};
use crate::processor::{flattener::flatten, flattener::Node, mutation_resolver::resolve_mutations};

/// Default cadence of forced full snapshots, in milliseconds.
pub const FULL_SNAPSHOT_INTERVAL_MS: i64 = 3_000;

// ============================================================================
// Collaborators
// ============================================================================

/// Destination of processed bundles. Serialization and transport belong to
/// the implementation; from the processor's side the call is synchronous.
pub trait RecordWriter {
    fn write(&mut self, bundle: RecordBundle);
}

impl RecordWriter for Vec<RecordBundle> {
    fn write(&mut self, bundle: RecordBundle) {
        self.push(bundle);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessorConfig {
    /// Maximum time between two full snapshots of the same view
    pub full_snapshot_interval_ms: i64,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            full_snapshot_interval_ms: FULL_SNAPSHOT_INTERVAL_MS,
        }
    }
}

// ============================================================================
// Processor
// ============================================================================

/// Why a pass emitted a full snapshot instead of a diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullSnapshotReason {
    NewView,
    OrientationChanged,
    IntervalElapsed,
}

/// Turns a stream of captured trees into replay records.
///
/// Not meant to be shared across threads: callers serialize calls. The
/// retained state (previous snapshot, context, orientation and last full
/// snapshot time) is replaced wholesale at the end of every pass.
#[derive(Debug)]
pub struct RecordedDataProcessor<W: RecordWriter> {
    writer: W,
    config: ProcessorConfig,

    prev_snapshot: Vec<Wireframe>,
    prev_context: ViewContext,
    prev_orientation: Option<Orientation>,
    last_full_snapshot_at: Option<i64>,
}

impl<W: RecordWriter> RecordedDataProcessor<W> {
    pub fn new(writer: W) -> Self {
        Self::with_config(writer, ProcessorConfig::default())
    }

    pub fn with_config(writer: W, config: ProcessorConfig) -> Self {
        Self {
            writer,
            config,
            prev_snapshot: vec![],
            prev_context: ViewContext::invalid(),
            prev_orientation: None,
            last_full_snapshot_at: None,
        }
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    pub fn prev_context(&self) -> &ViewContext {
        &self.prev_context
    }

    pub fn prev_snapshot(&self) -> &[Wireframe] {
        &self.prev_snapshot
    }

    /// Flatten `root` and emit whatever records this capture calls for.
    pub fn process_snapshot(
        &mut self,
        root: &Node,
        system: &SystemInformation,
        context: ViewContext,
        timestamp: i64,
    ) {
        let snapshot = flatten(root);
        self.process_flat_snapshot(snapshot, system, context, timestamp);
    }

    /// Same as [`process_snapshot`](Self::process_snapshot) for a tree that
    /// was already flattened.
    pub fn process_flat_snapshot(
        &mut self,
        snapshot: Vec<Wireframe>,
        system: &SystemInformation,
        context: ViewContext,
        timestamp: i64,
    ) {
        if !context.is_valid() {
            debug!(?context, "no active view, skipping snapshot");
            return;
        }

        let is_new_view = context != self.prev_context;
        let orientation = system.screen_orientation;
        let orientation_changed = self
            .prev_orientation
            .is_some_and(|prev| prev != orientation);

        let mut records = Vec::new();

        if is_new_view {
            self.end_previous_view(timestamp);

            let bounds = system.screen_bounds;
            records.push(MobileRecord::Meta {
                timestamp,
                width: bounds.width,
                height: bounds.height,
            });
            records.push(MobileRecord::Focus {
                timestamp,
                has_focus: true,
            });
        }

        if orientation_changed {
            records.push(MobileRecord::IncrementalSnapshot {
                timestamp,
                data: IncrementalData::ViewportResize {
                    width: system.screen_bounds.width,
                    height: system.screen_bounds.height,
                },
            });
        }

        let reason = if is_new_view {
            Some(FullSnapshotReason::NewView)
        } else if orientation_changed {
            Some(FullSnapshotReason::OrientationChanged)
        } else if self.full_snapshot_due(timestamp) {
            Some(FullSnapshotReason::IntervalElapsed)
        } else {
            None
        };

        match reason {
            Some(reason) => {
                debug!(?reason, count = snapshot.len(), "emitting full snapshot");
                records.push(MobileRecord::FullSnapshot {
                    timestamp,
                    wireframes: snapshot.clone(),
                });
                self.last_full_snapshot_at = Some(timestamp);
            }
            None => {
                // an unchanged UI produces nothing at all
                match resolve_mutations(&self.prev_snapshot, &snapshot) {
                    Some(mutations) => {
                        trace!(
                            adds = mutations.adds.len(),
                            removes = mutations.removes.len(),
                            updates = mutations.updates.len(),
                            "emitting incremental snapshot"
                        );
                        records.push(MobileRecord::IncrementalSnapshot {
                            timestamp,
                            data: IncrementalData::Mutation(mutations),
                        });
                    }
                    None => trace!(timestamp, "snapshot unchanged"),
                }
            }
        }

        if !records.is_empty() {
            self.writer.write(RecordBundle::new(&context, records));
        }

        self.prev_snapshot = snapshot;
        self.prev_context = context;
        self.prev_orientation = Some(orientation);
    }

    /// Forward pointer records captured outside the snapshot pipeline.
    pub fn process_touch_records(&mut self, records: Vec<MobileRecord>, context: &ViewContext) {
        if !context.is_valid() {
            debug!(?context, "no active view, dropping touch records");
            return;
        }
        if records.is_empty() {
            return;
        }

        self.writer.write(RecordBundle::new(context, records));
    }

    fn end_previous_view(&mut self, timestamp: i64) {
        if !self.prev_context.is_valid() {
            return;
        }

        debug!(view_id = %self.prev_context.view_id, "view ended");
        let bundle = RecordBundle::new(&self.prev_context, vec![MobileRecord::ViewEnd { timestamp }]);
        self.writer.write(bundle);
    }

    fn full_snapshot_due(&self, timestamp: i64) -> bool {
        match self.last_full_snapshot_at {
            Some(last) => timestamp - last >= self.config.full_snapshot_interval_ms,
            None => true,
        }
    }
}
