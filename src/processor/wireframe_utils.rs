use crate::model::wireframe::{Wireframe, WireframeClip, WireframeKind};
use crate::processor::bounds::resolve_bounds;

/// Clip to apply to `wireframe` given its ancestors (outermost first).
///
/// Starts from the wireframe's own clip and, for every ancestor, measures how
/// far the wireframe's frame sticks out of the ancestor's visible bounds on
/// each side. The largest inset per side wins; clips never shrink going down
/// the chain. Returns `None` when every side ends up at zero.
pub fn resolve_clip(wireframe: &Wireframe, parents: &[Wireframe]) -> Option<WireframeClip> {
    let mut clip = wireframe.clip.unwrap_or_default();

    let left = wireframe.x;
    let top = wireframe.y;
    let right = wireframe.x.saturating_add(wireframe.width);
    let bottom = wireframe.y.saturating_add(wireframe.height);

    for parent in parents {
        let parent_bounds = resolve_bounds(parent);

        clip.left = clip.left.max(parent_bounds.left.saturating_sub(left));
        clip.top = clip.top.max(parent_bounds.top.saturating_sub(top));
        clip.right = clip.right.max(right.saturating_sub(parent_bounds.right));
        clip.bottom = clip.bottom.max(bottom.saturating_sub(parent_bounds.bottom));
    }

    if clip.is_zero() { None } else { Some(clip) }
}

/// A wireframe is worth keeping when its visible area is non-empty and,
/// for shapes, when it paints something (a fill or a border).
pub fn is_valid(wireframe: &Wireframe) -> bool {
    let bounds = resolve_bounds(wireframe);
    if bounds.width <= 0 || bounds.height <= 0 {
        return false;
    }

    match &wireframe.kind {
        WireframeKind::Shape {
            shape_style,
            border,
        } => {
            let has_fill = shape_style.as_ref().is_some_and(|s| s.is_visible());
            let has_border = border.as_ref().is_some_and(|b| b.is_visible());
            has_fill || has_border
        }
        _ => true,
    }
}

/// True if any wireframe painted above `wireframe` hides it completely.
///
/// `above` is ordered nearest first; the search stops at the first opaque
/// wireframe whose visible bounds contain the target's.
pub fn is_covered(wireframe: &Wireframe, above: &[Wireframe]) -> bool {
    let bounds = resolve_bounds(wireframe);

    above
        .iter()
        .any(|top| top.has_opaque_background() && resolve_bounds(top).covers(&bounds))
}
