use std::rc::Rc;

use crate::foundation::{core::ElementId, error::WavyteResult};

/// The animated node whose geometry is measured.
///
/// Implemented by the host's visual tree. The scheduler only needs identity and a way to
/// record the current geometry; what "geometry" means is the implementor's concern.
pub trait VisualElement {
    /// Identity used for batching and shared-layout registration.
    fn id(&self) -> ElementId;

    /// Record the current geometry so it can later be diffed against the post-update layout.
    fn snapshot(&self) -> WavyteResult<()>;
}

/// Shared, single-threaded handle to a visual element.
pub type ElementRef = Rc<dyn VisualElement>;

/// Animation-engine side of a flush: processes one snapshotted element after commit.
///
/// Implemented for any `FnMut(&ElementRef) -> WavyteResult<()>` closure.
///
/// A `flush()` issued from inside `commit` on the same batcher or group does not run: it returns
/// `Ok(0)` exactly like a flush of an empty queue, and anything queued meanwhile waits for the
/// next flush. Check `is_flushing()` on the batcher or group to tell the two apart.
pub trait LayoutCommit {
    /// Run snapshot-commit processing for `element`.
    fn commit(&mut self, element: &ElementRef) -> WavyteResult<()>;
}

impl<F> LayoutCommit for F
where
    F: FnMut(&ElementRef) -> WavyteResult<()>,
{
    fn commit(&mut self, element: &ElementRef) -> WavyteResult<()> {
        self(element)
    }
}
