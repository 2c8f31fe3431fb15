use std::cell::Cell;

use crate::{
    element::visual::VisualElement,
    foundation::core::{ElementId, Rect, Vec2},
    foundation::error::{WavyteError, WavyteResult},
};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Translate/scale mapping the current layout box back onto its snapshot.
///
/// An animation engine starts from this delta and tweens toward identity.
pub struct LayoutDelta {
    /// Center offset from the current box to the snapshot box.
    pub translate: Vec2,
    /// Per-axis size ratio snapshot / current. Axes with a zero-size current box use `1.0`.
    pub scale: Vec2,
}

impl LayoutDelta {
    /// Delta that maps `after` onto `before`.
    pub fn between(before: Rect, after: Rect) -> Self {
        fn ratio(before: f64, after: f64) -> f64 {
            if after == 0.0 { 1.0 } else { before / after }
        }

        Self {
            translate: before.center() - after.center(),
            scale: Vec2::new(
                ratio(before.width(), after.width()),
                ratio(before.height(), after.height()),
            ),
        }
    }

    /// `true` when the layout did not move or resize.
    pub fn is_identity(&self) -> bool {
        self.translate == Vec2::ZERO && self.scale == Vec2::new(1.0, 1.0)
    }
}

/// Reference [`VisualElement`] backed by a single layout box.
///
/// The host writes the box with [`LayoutNode::set_layout`] during commit; `snapshot()` keeps a
/// copy of whatever box is current at the pre-commit point.
#[derive(Debug)]
pub struct LayoutNode {
    id: ElementId,
    layout: Cell<Rect>,
    snapshot: Cell<Option<Rect>>,
    snapshot_count: Cell<u64>,
}

impl LayoutNode {
    /// Create a node with an initial layout box and no snapshot.
    pub fn new(id: ElementId, layout: Rect) -> Self {
        Self {
            id,
            layout: Cell::new(layout),
            snapshot: Cell::new(None),
            snapshot_count: Cell::new(0),
        }
    }

    /// Current layout box.
    pub fn layout(&self) -> Rect {
        self.layout.get()
    }

    /// Replace the current layout box (host commit).
    pub fn set_layout(&self, layout: Rect) {
        self.layout.set(layout);
    }

    /// Box recorded by the most recent `snapshot()`.
    pub fn snapshot_rect(&self) -> Option<Rect> {
        self.snapshot.get()
    }

    /// Number of snapshots taken over the node's lifetime.
    pub fn snapshot_count(&self) -> u64 {
        self.snapshot_count.get()
    }

    /// Delta from the current box to the last snapshot, if one was taken.
    pub fn layout_delta(&self) -> Option<LayoutDelta> {
        self.snapshot
            .get()
            .map(|before| LayoutDelta::between(before, self.layout.get()))
    }
}

impl VisualElement for LayoutNode {
    fn id(&self) -> ElementId {
        self.id
    }

    fn snapshot(&self) -> WavyteResult<()> {
        let rect = self.layout.get();
        if !rect.is_finite() {
            return Err(WavyteError::layout(format!(
                "element {} has a non-finite layout box",
                self.id
            )));
        }
        self.snapshot.set(Some(rect));
        self.snapshot_count.set(self.snapshot_count.get() + 1);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/element/node.rs"]
mod tests;
