//! Layout measurement scheduling for Wavyte layout animations.
//!
//! Layout-triggered animations (shared-element transitions, drag-to-reorder, auto-layout) need
//! consistent "before" and "after" geometry even though elements render and update
//! independently. This crate owns the scheduling protocol that makes that work:
//!
//! 1. **Activate**: [`should_measure`] decides whether an element's [`MotionProps`] need a
//!    measurement unit at all ([`MEASURE_LAYOUT`] wraps it as a feature descriptor).
//! 2. **Bind**: a [`MeasureLayout`] unit picks its [`SyncLayout`] target once at construction:
//!    an ambient [`SharedLayoutSync`] coordinator, or the root [`SyncLayoutBatcher`].
//! 3. **Snapshot**: at the pre-commit point the unit either signals the coordinator or snapshots
//!    its element and queues it in the batcher.
//! 4. **Flush**: after the update, stand-alone units flush the batcher; the first flush of a pass
//!    drains every queued sibling, so a pass costs one flush.
//!
//! The host render loop drives units through the [`LayoutLifecycle`] trait.
//! [`run_update_pass`] is a minimal driver that enforces the required ordering.
//!
//! Everything here is single-threaded: handles are `Rc`-based and `!Send`.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod element;
mod feature;
mod foundation;
mod measure;
mod sync;

pub use crate::element::node::{LayoutDelta, LayoutNode};
pub use crate::element::visual::{ElementRef, LayoutCommit, VisualElement};
pub use crate::feature::descriptor::{MEASURE_LAYOUT, MotionFeature};
pub use crate::feature::props::{DragAxis, MotionProps, should_measure};
pub use crate::foundation::core::{ElementId, Phase, Point, Rect, Size, Vec2};
pub use crate::foundation::error::{WavyteError, WavyteResult};
pub use crate::measure::lifecycle::{LayoutLifecycle, mount_all, run_update_pass, unmount_all};
pub use crate::measure::scheduler::MeasureLayout;
pub use crate::sync::batcher::{SyncLayoutBatcher, WeakSyncLayoutBatcher};
pub use crate::sync::shared::{SharedLayoutGroup, SharedLayoutRef, SharedLayoutSync, Unregister};
pub use crate::sync::target::{SyncLayout, SyncMode};
