use wireframe_replay::model::context::{Orientation, SystemInformation, ViewContext};
use wireframe_replay::model::wireframe::{ShapeBorder, ShapeStyle, Wireframe};
use wireframe_replay::processor::flattener::Node;

pub const OPAQUE_WHITE: &str = "#FFFFFFFF";
pub const TRANSLUCENT_BLACK: &str = "#00000080";

pub fn opaque_shape(id: i64, x: i64, y: i64, width: i64, height: i64) -> Wireframe {
    Wireframe::shape(id, x, y, width, height).with_shape_style(ShapeStyle::solid(OPAQUE_WHITE))
}

pub fn bordered_shape(id: i64, x: i64, y: i64, width: i64, height: i64) -> Wireframe {
    Wireframe::shape(id, x, y, width, height).with_border(ShapeBorder {
        color: "#FF0000FF".into(),
        width: 1,
    })
}

pub fn translucent_shape(id: i64, x: i64, y: i64, width: i64, height: i64) -> Wireframe {
    Wireframe::shape(id, x, y, width, height)
        .with_shape_style(ShapeStyle::solid(TRANSLUCENT_BLACK))
}

pub fn context(view: &str) -> ViewContext {
    ViewContext::new("app-1", "session-1", view)
}

pub fn portrait() -> SystemInformation {
    SystemInformation::new(1080, 1920, Orientation::Portrait)
}

pub fn landscape() -> SystemInformation {
    SystemInformation::new(1920, 1080, Orientation::Landscape)
}

/// A root node holding `wireframes` side by side, no children.
pub fn flat_tree(wireframes: Vec<Wireframe>) -> Node {
    Node::new(wireframes)
}

/// Snapshot of `count` non-overlapping opaque shapes with ids `1..=count`.
pub fn row_of_shapes(count: i64) -> Vec<Wireframe> {
    (1..=count)
        .map(|id| opaque_shape(id, id * 100, 0, 50, 50))
        .collect()
}
