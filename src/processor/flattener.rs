use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::model::wireframe::Wireframe;
use crate::processor::wireframe_utils::{is_covered, is_valid, resolve_clip};

/// One level of a captured UI hierarchy.
///
/// `parents` is the ancestor chain (outermost first) used to clip this
/// node's wireframes; the capture layer resolves it up front.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(default)]
    pub wireframes: Vec<Wireframe>,
    #[serde(default)]
    pub children: Vec<Node>,
    #[serde(default)]
    pub parents: Vec<Wireframe>,
}

impl Node {
    pub fn new(wireframes: Vec<Wireframe>) -> Self {
        Self {
            wireframes,
            children: vec![],
            parents: vec![],
        }
    }

    pub fn leaf(wireframe: Wireframe) -> Self {
        Self::new(vec![wireframe])
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    pub fn with_parents(mut self, parents: Vec<Wireframe>) -> Self {
        self.parents = parents;
        self
    }
}

/// Linearize a node tree into paint order (back to front).
///
/// Pre-order walk with an explicit stack, so deep hierarchies cannot blow
/// the call stack. Every wireframe is clipped against its node's ancestors,
/// then anything invalid or fully hidden by a later opaque wireframe is
/// dropped. Survivors keep their relative order. Ids must be unique in a
/// snapshot: only the first occurrence of an id is kept.
pub fn flatten(root: &Node) -> Vec<Wireframe> {
    let mut stack: Vec<&Node> = vec![root];
    let mut wireframes = Vec::new();
    let mut seen = HashSet::new();

    while let Some(node) = stack.pop() {
        for wireframe in &node.wireframes {
            if !seen.insert(wireframe.id) {
                warn!(id = wireframe.id, "duplicate wireframe id in capture, dropping it");
                continue;
            }
            let clip = resolve_clip(wireframe, &node.parents);
            wireframes.push(wireframe.clone().with_clip(clip));
        }

        // reversed so the first child is visited first
        stack.extend(node.children.iter().rev());
    }

    filter_out_invalid(wireframes)
}

fn filter_out_invalid(wireframes: Vec<Wireframe>) -> Vec<Wireframe> {
    let keep: Vec<bool> = wireframes
        .iter()
        .enumerate()
        .map(|(idx, w)| is_valid(w) && !is_covered(w, &wireframes[idx + 1..]))
        .collect();

    wireframes
        .into_iter()
        .zip(keep)
        .filter_map(|(w, keep)| keep.then_some(w))
        .collect()
}
