use serde::{Deserialize, Serialize};

use crate::model::wireframe::{
    ShapeBorder, ShapeStyle, TextPosition, TextStyle, Wireframe, WireframeClip, WireframeKind,
};

// ============================================================================
// Edit script
// ============================================================================

/// The minimal transform from one flat snapshot to the next.
///
/// An id appears in at most one of `adds`/`removes` unless the element moved,
/// in which case it is removed and re-added at its new anchor. Updates only
/// reference ids present, in a stable position, in both snapshots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MutationData {
    pub adds: Vec<Add>,
    pub removes: Vec<Remove>,
    pub updates: Vec<WireframeUpdate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Add {
    /// `None` inserts at the very front of paint order
    pub previous_id: Option<i64>,
    pub wireframe: Wireframe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Remove {
    pub id: i64,
}

impl MutationData {
    pub fn is_empty(&self) -> bool {
        self.adds.is_empty() && self.removes.is_empty() && self.updates.is_empty()
    }

    /// Replay this script on top of `snapshot`.
    ///
    /// Removes are applied first, then adds in order (each after its anchor),
    /// then updates. Adds whose anchor is missing are appended at the end.
    pub fn apply(&self, snapshot: &[Wireframe]) -> Vec<Wireframe> {
        let mut result: Vec<Wireframe> = snapshot
            .iter()
            .filter(|w| !self.removes.iter().any(|r| r.id == w.id))
            .cloned()
            .collect();

        for add in &self.adds {
            let position = match add.previous_id {
                None => 0,
                Some(previous) => result
                    .iter()
                    .position(|w| w.id == previous)
                    .map(|idx| idx + 1)
                    .unwrap_or(result.len()),
            };
            result.insert(position, add.wireframe.clone());
        }

        for update in &self.updates {
            if let Some(target) = result.iter_mut().find(|w| w.id == update.id()) {
                update.apply_to(target);
            }
        }

        result
    }
}

// ============================================================================
// Partial updates
// ============================================================================

/// Changed fields of a wireframe that kept its id and position.
///
/// Only fields that differ from the previous snapshot are `Some`. A clip that
/// was removed is sent as an all-zero clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WireframeUpdate {
    Shape(ShapeUpdate),
    Text(TextUpdate),
    Image(ImageUpdate),
    Placeholder(PlaceholderUpdate),
}

/// Geometry shared by every update kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameUpdate {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clip: Option<WireframeClip>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShapeUpdate {
    #[serde(flatten)]
    pub frame: FrameUpdate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape_style: Option<ShapeStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border: Option<ShapeBorder>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextUpdate {
    #[serde(flatten)]
    pub frame: FrameUpdate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape_style: Option<ShapeStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border: Option<ShapeBorder>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_style: Option<TextStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_position: Option<TextPosition>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageUpdate {
    #[serde(flatten)]
    pub frame: FrameUpdate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape_style: Option<ShapeStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border: Option<ShapeBorder>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_empty: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaceholderUpdate {
    #[serde(flatten)]
    pub frame: FrameUpdate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl WireframeUpdate {
    pub fn id(&self) -> i64 {
        self.frame().id
    }

    pub fn frame(&self) -> &FrameUpdate {
        match self {
            WireframeUpdate::Shape(u) => &u.frame,
            WireframeUpdate::Text(u) => &u.frame,
            WireframeUpdate::Image(u) => &u.frame,
            WireframeUpdate::Placeholder(u) => &u.frame,
        }
    }

    /// Write the changed fields into `target`. Fields of a different kind are
    /// ignored.
    pub fn apply_to(&self, target: &mut Wireframe) {
        let frame = self.frame();
        if let Some(x) = frame.x {
            target.x = x;
        }
        if let Some(y) = frame.y {
            target.y = y;
        }
        if let Some(width) = frame.width {
            target.width = width;
        }
        if let Some(height) = frame.height {
            target.height = height;
        }
        if let Some(clip) = frame.clip {
            target.clip = if clip.is_zero() { None } else { Some(clip) };
        }

        match (self, &mut target.kind) {
            (
                WireframeUpdate::Shape(u),
                WireframeKind::Shape {
                    shape_style,
                    border,
                },
            ) => {
                merge(shape_style, &u.shape_style);
                merge(border, &u.border);
            }
            (
                WireframeUpdate::Text(u),
                WireframeKind::Text {
                    shape_style,
                    border,
                    text,
                    text_style,
                    text_position,
                },
            ) => {
                merge(shape_style, &u.shape_style);
                merge(border, &u.border);
                merge(text_position, &u.text_position);
                if let Some(value) = &u.text {
                    *text = value.clone();
                }
                if let Some(value) = &u.text_style {
                    *text_style = value.clone();
                }
            }
            (
                WireframeUpdate::Image(u),
                WireframeKind::Image {
                    shape_style,
                    border,
                    resource_id,
                    mime_type,
                    is_empty,
                },
            ) => {
                merge(shape_style, &u.shape_style);
                merge(border, &u.border);
                merge(resource_id, &u.resource_id);
                merge(mime_type, &u.mime_type);
                merge(is_empty, &u.is_empty);
            }
            (WireframeUpdate::Placeholder(u), WireframeKind::Placeholder { label }) => {
                merge(label, &u.label);
            }
            _ => {}
        }
    }
}

fn merge<T: Clone>(slot: &mut Option<T>, value: &Option<T>) {
    if let Some(v) = value {
        *slot = Some(v.clone());
    }
}
