use std::collections::HashMap;

use tracing::error;

use crate::model::mutation::{
    Add, FrameUpdate, ImageUpdate, MutationData, PlaceholderUpdate, Remove, ShapeUpdate,
    TextUpdate, WireframeUpdate,
};
use crate::model::wireframe::{Wireframe, WireframeKind};

// ============================================================================
// Heckel symbol-table diff
// ============================================================================

/// Where an id was seen. Ids are unique within a snapshot, so plain flags
/// replace the occurrence counters of the textbook algorithm.
#[derive(Debug, Clone, Copy)]
struct Symbol {
    in_old: bool,
    in_new: bool,
    index_in_old: Option<usize>,
}

/// Slot of the `oa` / `na` arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Entry {
    /// Not linked yet; holds the wireframe id
    Reference(i64),
    /// Linked to this index in the other array
    Index(usize),
}

/// Compute the edit script turning `old` into `new`.
///
/// Linear-time variant of Heckel's diff for sequences of unique ids. Returns
/// `None` when nothing changed.
///
/// An element that is present in both snapshots but out of order relative to
/// the running offset is reported as a remove followed by an add at its new
/// anchor; it is never turned into an in-place update. Moved elements count
/// towards the running offset just like plain additions, so a single element
/// jumping ahead does not drag every element it skipped along with it.
pub fn resolve_mutations(old: &[Wireframe], new: &[Wireframe]) -> Option<MutationData> {
    let mut table: HashMap<i64, Symbol> = HashMap::with_capacity(old.len() + new.len());
    let mut oa: Vec<Entry> = Vec::with_capacity(old.len());
    let mut na: Vec<Entry> = Vec::with_capacity(new.len());

    // ---- Pass 1: record everything in `new` ----
    for wireframe in new {
        table.insert(
            wireframe.id,
            Symbol {
                in_old: false,
                in_new: true,
                index_in_old: None,
            },
        );
        na.push(Entry::Reference(wireframe.id));
    }

    // ---- Pass 2: record everything in `old` ----
    for (idx, wireframe) in old.iter().enumerate() {
        let symbol = table.entry(wireframe.id).or_insert(Symbol {
            in_old: false,
            in_new: false,
            index_in_old: None,
        });
        symbol.in_old = true;
        symbol.index_in_old = Some(idx);
        oa.push(Entry::Reference(wireframe.id));
    }

    // ---- Pass 3: ids present in both are the same element ----
    for (idx, entry) in na.iter_mut().enumerate() {
        let Entry::Reference(id) = *entry else {
            continue;
        };
        if let Some(Symbol {
            in_old: true,
            in_new: true,
            index_in_old: Some(old_idx),
        }) = table.get(&id).copied()
        {
            *entry = Entry::Index(old_idx);
            oa[old_idx] = Entry::Index(idx);
        }
    }

    // ---- Pass 4: grow linked runs forward ----
    for idx in 0..na.len().saturating_sub(1) {
        let Entry::Index(old_idx) = na[idx] else {
            continue;
        };
        if old_idx + 1 >= oa.len() {
            continue;
        }
        if let (Entry::Reference(next_new), Entry::Reference(next_old)) =
            (na[idx + 1], oa[old_idx + 1])
        {
            if next_new == next_old {
                na[idx + 1] = Entry::Index(old_idx + 1);
                oa[old_idx + 1] = Entry::Index(idx + 1);
            }
        }
    }

    // ---- Pass 5: grow linked runs backward ----
    for idx in (1..na.len()).rev() {
        let Entry::Index(old_idx) = na[idx] else {
            continue;
        };
        if old_idx == 0 {
            continue;
        }
        if let (Entry::Reference(prev_new), Entry::Reference(prev_old)) =
            (na[idx - 1], oa[old_idx - 1])
        {
            if prev_new == prev_old {
                na[idx - 1] = Entry::Index(old_idx - 1);
                oa[old_idx - 1] = Entry::Index(idx - 1);
            }
        }
    }

    // ---- Final pass: build the script ----
    let mut adds = Vec::new();
    let mut removes = Vec::new();
    let mut updates = Vec::new();

    let mut removal_offsets = vec![0usize; old.len()];
    let mut running_offset = 0usize;

    for (idx, entry) in oa.iter().enumerate() {
        removal_offsets[idx] = running_offset;
        if let Entry::Reference(_) = entry {
            removes.push(Remove { id: old[idx].id });
            running_offset += 1;
        }
    }

    running_offset = 0;

    for (idx, entry) in na.iter().enumerate() {
        let current = &new[idx];
        let previous_id = idx.checked_sub(1).map(|prev| new[prev].id);

        match *entry {
            Entry::Index(old_idx) => {
                let expected_idx = old_idx - removal_offsets[old_idx] + running_offset;

                if expected_idx != idx {
                    // moved
                    removes.push(Remove { id: current.id });
                    adds.push(Add {
                        previous_id,
                        wireframe: current.clone(),
                    });
                    running_offset += 1;
                    continue;
                }

                match resolve_update(&old[old_idx], current) {
                    UpdateOutcome::Unchanged | UpdateOutcome::KindMismatch => {}
                    UpdateOutcome::Update(update) => updates.push(update),
                    UpdateOutcome::Replace => {
                        removes.push(Remove { id: current.id });
                        adds.push(Add {
                            previous_id,
                            wireframe: current.clone(),
                        });
                    }
                }
            }
            Entry::Reference(_) => {
                adds.push(Add {
                    previous_id,
                    wireframe: current.clone(),
                });
                running_offset += 1;
            }
        }
    }

    let mutations = MutationData {
        adds,
        removes,
        updates,
    };

    if mutations.is_empty() { None } else { Some(mutations) }
}

// ============================================================================
// Partial updates
// ============================================================================

#[derive(Debug)]
enum UpdateOutcome {
    Unchanged,
    Update(WireframeUpdate),
    /// A field went from set to unset; partial updates cannot express that,
    /// so the element is sent again in full at the same position.
    Replace,
    KindMismatch,
}

fn resolve_update(prev: &Wireframe, current: &Wireframe) -> UpdateOutcome {
    if prev == current {
        return UpdateOutcome::Unchanged;
    }

    if !prev.kind.same_kind(&current.kind) {
        error!(
            id = current.id,
            previous_kind = prev.kind.name(),
            current_kind = current.kind.name(),
            "wireframe kind changed between snapshots, skipping update"
        );
        return UpdateOutcome::KindMismatch;
    }

    let mut cleared = false;
    let frame = frame_update(prev, current);

    let update = match (&prev.kind, &current.kind) {
        (
            WireframeKind::Shape {
                shape_style: prev_style,
                border: prev_border,
            },
            WireframeKind::Shape {
                shape_style,
                border,
            },
        ) => WireframeUpdate::Shape(ShapeUpdate {
            frame,
            shape_style: changed_opt(prev_style, shape_style, &mut cleared),
            border: changed_opt(prev_border, border, &mut cleared),
        }),
        (
            WireframeKind::Text {
                shape_style: prev_style,
                border: prev_border,
                text: prev_text,
                text_style: prev_text_style,
                text_position: prev_position,
            },
            WireframeKind::Text {
                shape_style,
                border,
                text,
                text_style,
                text_position,
            },
        ) => WireframeUpdate::Text(TextUpdate {
            frame,
            shape_style: changed_opt(prev_style, shape_style, &mut cleared),
            border: changed_opt(prev_border, border, &mut cleared),
            text: changed(prev_text, text),
            text_style: changed(prev_text_style, text_style),
            text_position: changed_opt(prev_position, text_position, &mut cleared),
        }),
        (
            WireframeKind::Image {
                shape_style: prev_style,
                border: prev_border,
                resource_id: prev_resource,
                mime_type: prev_mime,
                is_empty: prev_empty,
            },
            WireframeKind::Image {
                shape_style,
                border,
                resource_id,
                mime_type,
                is_empty,
            },
        ) => WireframeUpdate::Image(ImageUpdate {
            frame,
            shape_style: changed_opt(prev_style, shape_style, &mut cleared),
            border: changed_opt(prev_border, border, &mut cleared),
            resource_id: changed_opt(prev_resource, resource_id, &mut cleared),
            mime_type: changed_opt(prev_mime, mime_type, &mut cleared),
            is_empty: changed_opt(prev_empty, is_empty, &mut cleared),
        }),
        (
            WireframeKind::Placeholder { label: prev_label },
            WireframeKind::Placeholder { label },
        ) => WireframeUpdate::Placeholder(PlaceholderUpdate {
            frame,
            label: changed_opt(prev_label, label, &mut cleared),
        }),
        _ => return UpdateOutcome::KindMismatch,
    };

    if cleared {
        UpdateOutcome::Replace
    } else {
        UpdateOutcome::Update(update)
    }
}

fn frame_update(prev: &Wireframe, current: &Wireframe) -> FrameUpdate {
    FrameUpdate {
        id: current.id,
        x: changed(&prev.x, &current.x),
        y: changed(&prev.y, &current.y),
        width: changed(&prev.width, &current.width),
        height: changed(&prev.height, &current.height),
        // a removed clip is sent as an all-zero one
        clip: (prev.clip != current.clip).then(|| current.clip.unwrap_or_default()),
    }
}

fn changed<T: PartialEq + Clone>(prev: &T, current: &T) -> Option<T> {
    (prev != current).then(|| current.clone())
}

fn changed_opt<T: PartialEq + Clone>(
    prev: &Option<T>,
    current: &Option<T>,
    cleared: &mut bool,
) -> Option<T> {
    match (prev, current) {
        (Some(_), None) => {
            *cleared = true;
            None
        }
        _ if prev != current => current.clone(),
        _ => None,
    }
}
