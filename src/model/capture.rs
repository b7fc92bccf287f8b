use serde::{Deserialize, Serialize};

use crate::model::context::{SystemInformation, ViewContext};
use crate::processor::flattener::Node;

/// One capture tick as produced by the capture layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureFrame {
    pub timestamp: i64,
    #[serde(default)]
    pub context: ViewContext,
    pub system: SystemInformation,
    pub root: Node,
}
