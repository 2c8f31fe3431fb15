use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use indexmap::IndexMap;

use crate::{
    element::visual::{ElementRef, LayoutCommit},
    foundation::core::ElementId,
    foundation::error::WavyteResult,
};

/// Per-root queue of elements awaiting snapshot-commit processing in the current pass.
///
/// Cloning yields another handle to the same queue. Stand-alone measurement units `add` their
/// element at the pre-commit point and each call [`SyncLayoutBatcher::flush`] after update; the
/// first flush of a pass drains the queue, the rest find it empty.
///
/// Reentrancy rule: `flush` moves the pending set out and clears it *before* running any commit,
/// so an `add` issued from inside a commit lands in the next pass.
#[derive(Clone)]
pub struct SyncLayoutBatcher {
    inner: Rc<BatcherInner>,
}

/// Non-owning handle to a [`SyncLayoutBatcher`].
#[derive(Clone, Debug)]
pub struct WeakSyncLayoutBatcher {
    inner: Weak<BatcherInner>,
}

struct BatcherInner {
    pending: RefCell<IndexMap<ElementId, ElementRef>>,
    commit: RefCell<Box<dyn LayoutCommit>>,
    flushing: Cell<bool>,
}

impl SyncLayoutBatcher {
    /// Create an empty batcher that hands flushed elements to `commit`.
    pub fn new(commit: impl LayoutCommit + 'static) -> Self {
        Self {
            inner: Rc::new(BatcherInner {
                pending: RefCell::new(IndexMap::new()),
                commit: RefCell::new(Box::new(commit)),
                flushing: Cell::new(false),
            }),
        }
    }

    /// Queue `element` for the current pass. No-op if an element with the same id is queued.
    pub fn add(&self, element: ElementRef) {
        let id = element.id();
        let mut pending = self.inner.pending.borrow_mut();
        if pending.contains_key(&id) {
            return;
        }
        tracing::trace!(element = %id, "batcher add");
        pending.insert(id, element);
    }

    /// Commit every queued element in insertion order and empty the queue.
    ///
    /// Returns the number of elements committed. Calling `flush` while a flush is processing
    /// (e.g. from a commit) does nothing and returns `0`; whatever is queued at that point waits
    /// for the next flush. A commit error is returned as-is and the rest of the batch is dropped.
    #[tracing::instrument(skip(self))]
    pub fn flush(&self) -> WavyteResult<usize> {
        if self.inner.flushing.get() {
            tracing::trace!("flush already in progress, deferring");
            return Ok(0);
        }

        let batch = std::mem::take(&mut *self.inner.pending.borrow_mut());
        if batch.is_empty() {
            return Ok(0);
        }

        let _flushing = FlushingGuard::enter(&self.inner.flushing);
        tracing::debug!(count = batch.len(), "flushing layout batch");
        let mut commit = self.inner.commit.borrow_mut();
        for element in batch.values() {
            commit.commit(element)?;
        }
        Ok(batch.len())
    }

    /// Number of elements queued for the next flush.
    pub fn len(&self) -> usize {
        self.inner.pending.borrow().len()
    }

    /// `true` when nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.inner.pending.borrow().is_empty()
    }

    /// `true` if an element with `id` is queued.
    pub fn contains(&self, id: ElementId) -> bool {
        self.inner.pending.borrow().contains_key(&id)
    }

    /// `true` while a flush is running commits.
    pub fn is_flushing(&self) -> bool {
        self.inner.flushing.get()
    }

    /// `true` if both handles refer to the same queue.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Weak handle, for collaborators that must not keep the batcher alive.
    pub fn downgrade(&self) -> WeakSyncLayoutBatcher {
        WeakSyncLayoutBatcher {
            inner: Rc::downgrade(&self.inner),
        }
    }
}

impl WeakSyncLayoutBatcher {
    /// Recover a strong handle if the batcher is still alive.
    pub fn upgrade(&self) -> Option<SyncLayoutBatcher> {
        self.inner.upgrade().map(|inner| SyncLayoutBatcher { inner })
    }
}

impl std::fmt::Debug for SyncLayoutBatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncLayoutBatcher")
            .field("pending", &self.inner.pending.borrow().keys().collect::<Vec<_>>())
            .field("flushing", &self.inner.flushing.get())
            .finish()
    }
}

/// Holds a "flush in progress" flag for its lifetime, including on early error return.
pub(crate) struct FlushingGuard<'a> {
    flag: &'a Cell<bool>,
}

impl<'a> FlushingGuard<'a> {
    pub(crate) fn enter(flag: &'a Cell<bool>) -> Self {
        flag.set(true);
        Self { flag }
    }
}

impl Drop for FlushingGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sync/batcher.rs"]
mod tests;
