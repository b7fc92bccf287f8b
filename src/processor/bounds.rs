use crate::model::wireframe::Wireframe;

/// Axis-aligned visible area of a wireframe, after its own clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub left: i64,
    pub top: i64,
    pub right: i64,
    pub bottom: i64,
    pub width: i64,
    pub height: i64,
}

impl Bounds {
    /// True if `other` lies entirely inside these bounds.
    pub fn covers(&self, other: &Bounds) -> bool {
        self.left <= other.left
            && self.top <= other.top
            && self.right >= other.right
            && self.bottom >= other.bottom
    }
}

/// Resolve the visible bounds of `wireframe`. An absent clip means no inset.
///
/// Geometry comes straight from captured input, so every edge saturates at
/// the `i64` range instead of overflowing.
pub fn resolve_bounds(wireframe: &Wireframe) -> Bounds {
    let clip = wireframe.clip.unwrap_or_default();

    let left = wireframe.x.saturating_add(clip.left);
    let top = wireframe.y.saturating_add(clip.top);
    let right = wireframe
        .x
        .saturating_add(wireframe.width)
        .saturating_sub(clip.right);
    let bottom = wireframe
        .y
        .saturating_add(wireframe.height)
        .saturating_sub(clip.bottom);

    Bounds {
        left,
        top,
        right,
        bottom,
        width: right.saturating_sub(left),
        height: bottom.saturating_sub(top),
    }
}
