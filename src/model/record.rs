use serde::{Deserialize, Serialize};

use crate::model::{context::ViewContext, mutation::MutationData, wireframe::Wireframe};

// ============================================================================
// Records handed to the writer
// ============================================================================

/// One replay record. Timestamps are milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MobileRecord {
    /// Viewport size of a newly started view
    Meta {
        timestamp: i64,
        width: i64,
        height: i64,
    },
    Focus {
        timestamp: i64,
        has_focus: bool,
    },
    ViewEnd {
        timestamp: i64,
    },
    FullSnapshot {
        timestamp: i64,
        wireframes: Vec<Wireframe>,
    },
    IncrementalSnapshot {
        timestamp: i64,
        data: IncrementalData,
    },
}

impl MobileRecord {
    pub fn timestamp(&self) -> i64 {
        match self {
            MobileRecord::Meta { timestamp, .. }
            | MobileRecord::Focus { timestamp, .. }
            | MobileRecord::ViewEnd { timestamp }
            | MobileRecord::FullSnapshot { timestamp, .. }
            | MobileRecord::IncrementalSnapshot { timestamp, .. } => *timestamp,
        }
    }

    pub fn is_full_snapshot(&self) -> bool {
        matches!(self, MobileRecord::FullSnapshot { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum IncrementalData {
    Mutation(MutationData),
    ViewportResize {
        width: i64,
        height: i64,
    },
    PointerInteraction {
        pointer_event_type: PointerEventType,
        pointer_type: PointerType,
        pointer_id: i64,
        x: i64,
        y: i64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerEventType {
    Down,
    Up,
    Move,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerType {
    Mouse,
    Touch,
    Pen,
}

// ============================================================================
// Bundles
// ============================================================================

/// Records of one processing pass, scoped to a single view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordBundle {
    pub application_id: String,
    pub session_id: String,
    pub view_id: String,
    pub records: Vec<MobileRecord>,
}

impl RecordBundle {
    pub fn new(context: &ViewContext, records: Vec<MobileRecord>) -> Self {
        Self {
            application_id: context.application_id.clone(),
            session_id: context.session_id.clone(),
            view_id: context.view_id.clone(),
            records,
        }
    }

    pub fn context(&self) -> ViewContext {
        ViewContext::new(&self.application_id, &self.session_id, &self.view_id)
    }
}
