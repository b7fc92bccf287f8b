use serde::{Deserialize, Serialize};

// ============================================================================
// Wireframe: one renderable unit of a snapshot
// ============================================================================

/// One renderable element of a captured UI tree.
///
/// Every wireframe shares an id, a frame and an optional clip; the rest of
/// its content depends on the kind. Equality is structural: two wireframes
/// with the same id and identical fields are considered unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wireframe {
    /// Unique within a single snapshot
    pub id: i64,
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clip: Option<WireframeClip>,

    #[serde(flatten)]
    pub kind: WireframeKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WireframeKind {
    Shape {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        shape_style: Option<ShapeStyle>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        border: Option<ShapeBorder>,
    },
    Text {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        shape_style: Option<ShapeStyle>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        border: Option<ShapeBorder>,
        text: String,
        text_style: TextStyle,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text_position: Option<TextPosition>,
    },
    Image {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        shape_style: Option<ShapeStyle>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        border: Option<ShapeBorder>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        resource_id: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        mime_type: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        is_empty: Option<bool>,
    },
    Placeholder {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
}

impl WireframeKind {
    pub fn name(&self) -> &'static str {
        match self {
            WireframeKind::Shape { .. } => "shape",
            WireframeKind::Text { .. } => "text",
            WireframeKind::Image { .. } => "image",
            WireframeKind::Placeholder { .. } => "placeholder",
        }
    }

    /// Placeholders carry no shape style.
    pub fn shape_style(&self) -> Option<&ShapeStyle> {
        match self {
            WireframeKind::Shape { shape_style, .. }
            | WireframeKind::Text { shape_style, .. }
            | WireframeKind::Image { shape_style, .. } => shape_style.as_ref(),
            WireframeKind::Placeholder { .. } => None,
        }
    }

    pub fn border(&self) -> Option<&ShapeBorder> {
        match self {
            WireframeKind::Shape { border, .. }
            | WireframeKind::Text { border, .. }
            | WireframeKind::Image { border, .. } => border.as_ref(),
            WireframeKind::Placeholder { .. } => None,
        }
    }

    /// True when both values are the same variant, regardless of content.
    pub fn same_kind(&self, other: &WireframeKind) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl Wireframe {
    pub fn shape(id: i64, x: i64, y: i64, width: i64, height: i64) -> Self {
        Self {
            id,
            x,
            y,
            width,
            height,
            clip: None,
            kind: WireframeKind::Shape {
                shape_style: None,
                border: None,
            },
        }
    }

    pub fn text(id: i64, x: i64, y: i64, width: i64, height: i64, text: &str) -> Self {
        Self {
            id,
            x,
            y,
            width,
            height,
            clip: None,
            kind: WireframeKind::Text {
                shape_style: None,
                border: None,
                text: text.to_string(),
                text_style: TextStyle::default(),
                text_position: None,
            },
        }
    }

    /// Build an image wireframe whose resource id is derived from the raw
    /// image bytes, so identical bitmaps resolve to the same resource.
    pub fn image(
        id: i64,
        x: i64,
        y: i64,
        width: i64,
        height: i64,
        mime_type: &str,
        data: &[u8],
    ) -> Self {
        Self {
            id,
            x,
            y,
            width,
            height,
            clip: None,
            kind: WireframeKind::Image {
                shape_style: None,
                border: None,
                resource_id: Some(resource_fingerprint(data)),
                mime_type: Some(mime_type.to_string()),
                is_empty: Some(data.is_empty()),
            },
        }
    }

    pub fn placeholder(id: i64, x: i64, y: i64, width: i64, height: i64, label: &str) -> Self {
        Self {
            id,
            x,
            y,
            width,
            height,
            clip: None,
            kind: WireframeKind::Placeholder {
                label: Some(label.to_string()),
            },
        }
    }

    /// Replace the shape style. No-op for placeholders.
    pub fn with_shape_style(mut self, style: ShapeStyle) -> Self {
        match &mut self.kind {
            WireframeKind::Shape { shape_style, .. }
            | WireframeKind::Text { shape_style, .. }
            | WireframeKind::Image { shape_style, .. } => *shape_style = Some(style),
            WireframeKind::Placeholder { .. } => {}
        }
        self
    }

    /// Replace the border. No-op for placeholders.
    pub fn with_border(mut self, value: ShapeBorder) -> Self {
        match &mut self.kind {
            WireframeKind::Shape { border, .. }
            | WireframeKind::Text { border, .. }
            | WireframeKind::Image { border, .. } => *border = Some(value),
            WireframeKind::Placeholder { .. } => {}
        }
        self
    }

    pub fn with_clip(mut self, clip: Option<WireframeClip>) -> Self {
        self.clip = clip;
        self
    }

    /// True if the background paints every pixel of the wireframe.
    pub fn has_opaque_background(&self) -> bool {
        self.kind.shape_style().is_some_and(ShapeStyle::is_opaque)
    }
}

// ============================================================================
// Styles
// ============================================================================

/// Insets applied on each side of a wireframe frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireframeClip {
    #[serde(default)]
    pub top: i64,
    #[serde(default)]
    pub bottom: i64,
    #[serde(default)]
    pub left: i64,
    #[serde(default)]
    pub right: i64,
}

impl WireframeClip {
    pub fn is_zero(&self) -> bool {
        self.top == 0 && self.bottom == 0 && self.left == 0 && self.right == 0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// `#RRGGBBAA`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<f32>,
}

impl ShapeStyle {
    pub fn solid(color: &str) -> Self {
        Self {
            background_color: Some(color.to_string()),
            opacity: None,
            corner_radius: None,
        }
    }

    pub fn is_opaque(&self) -> bool {
        let color_opaque = self
            .background_color
            .as_deref()
            .and_then(color_alpha)
            .is_some_and(|alpha| alpha == 0xFF);

        color_opaque && self.opacity.is_none_or(|o| o >= 1.0)
    }

    /// True if anything at all gets painted by this style.
    pub fn is_visible(&self) -> bool {
        let color_visible = self
            .background_color
            .as_deref()
            .and_then(color_alpha)
            .is_some_and(|alpha| alpha > 0);

        color_visible && self.opacity.is_none_or(|o| o > 0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeBorder {
    pub color: String,
    pub width: i64,
}

impl ShapeBorder {
    pub fn is_visible(&self) -> bool {
        self.width > 0 && color_alpha(&self.color).is_none_or(|alpha| alpha > 0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStyle {
    pub family: String,
    pub size: i64,
    pub color: String,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            family: "sans-serif".to_string(),
            size: 14,
            color: "#000000FF".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextPosition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<Padding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Padding {
    #[serde(default)]
    pub top: i64,
    #[serde(default)]
    pub bottom: i64,
    #[serde(default)]
    pub left: i64,
    #[serde(default)]
    pub right: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alignment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horizontal: Option<Horizontal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertical: Option<Vertical>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Horizontal {
    Left,
    Right,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Vertical {
    Top,
    Bottom,
    Center,
}

// ============================================================================
// Helpers
// ============================================================================

/// Alpha channel of a `#RRGGBBAA` colour. `#RRGGBB` is treated as opaque.
pub fn color_alpha(color: &str) -> Option<u8> {
    let hex = color.strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }

    match hex.len() {
        6 => u32::from_str_radix(hex, 16).ok().map(|_| 0xFF),
        8 => u32::from_str_radix(hex, 16).ok().map(|rgba| (rgba & 0xFF) as u8),
        _ => None,
    }
}

/// Stable resource id for raw image bytes (SHA-1, lowercase hex).
pub fn resource_fingerprint(data: &[u8]) -> String {
    use sha1::{Digest, Sha1};

    let mut hasher = Sha1::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}
