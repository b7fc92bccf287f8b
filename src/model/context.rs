use serde::{Deserialize, Serialize};

/// Id reported by the context provider before any view is active.
pub const INVALID_ID: &str = "00000000-0000-0000-0000-000000000000";

/// Identifies the logical view being recorded.
///
/// A new value supersedes the previous one whenever any of the three ids
/// changes; contexts are never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ViewContext {
    pub application_id: String,
    pub session_id: String,
    pub view_id: String,
}

impl ViewContext {
    pub fn new(application_id: &str, session_id: &str, view_id: &str) -> Self {
        Self {
            application_id: application_id.to_string(),
            session_id: session_id.to_string(),
            view_id: view_id.to_string(),
        }
    }

    pub fn invalid() -> Self {
        Self::new(INVALID_ID, INVALID_ID, INVALID_ID)
    }

    pub fn is_valid(&self) -> bool {
        [&self.application_id, &self.session_id, &self.view_id]
            .iter()
            .all(|id| !id.is_empty() && id.as_str() != INVALID_ID)
    }
}

impl Default for ViewContext {
    fn default() -> Self {
        Self::invalid()
    }
}

// ============================================================================
// Device state
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Portrait,
    Landscape,
    #[default]
    Undefined,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalBounds {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

/// Screen state captured alongside each snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemInformation {
    pub screen_bounds: GlobalBounds,
    #[serde(default)]
    pub screen_orientation: Orientation,
    #[serde(default = "default_density")]
    pub screen_density: f32,
}

impl SystemInformation {
    pub fn new(width: i64, height: i64, orientation: Orientation) -> Self {
        Self {
            screen_bounds: GlobalBounds {
                x: 0,
                y: 0,
                width,
                height,
            },
            screen_orientation: orientation,
            screen_density: default_density(),
        }
    }
}

fn default_density() -> f32 {
    1.0
}
