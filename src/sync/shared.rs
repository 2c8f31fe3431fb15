use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use indexmap::IndexMap;

use crate::{
    element::visual::{ElementRef, LayoutCommit},
    foundation::core::ElementId,
    foundation::error::WavyteResult,
    sync::batcher::FlushingGuard,
};

/// Capability set of an ambient shared-layout coordinator.
///
/// When present it supersedes the batcher: measurement units register their element on mount
/// and only signal [`SharedLayoutSync::sync_update`] at the pre-commit point. When and how the
/// group snapshots its members is the coordinator's own policy.
pub trait SharedLayoutSync {
    /// Add `element` to the coordinated group.
    ///
    /// The returned capability removes exactly this registration.
    fn register(&self, element: ElementRef) -> WavyteResult<Unregister>;

    /// Signal that one member reached its pre-update measurement point.
    fn sync_update(&self) -> WavyteResult<()>;
}

/// Shared, single-threaded handle to a shared-layout coordinator.
pub type SharedLayoutRef = Rc<dyn SharedLayoutSync>;

/// One-shot capability that removes a shared-layout registration.
///
/// [`Unregister::release`] may be called any number of times; only the first call has an
/// effect. Dropping an unreleased capability releases it.
#[must_use = "dropping an Unregister releases the registration immediately"]
pub struct Unregister {
    release: Option<Box<dyn FnOnce()>>,
}

impl Unregister {
    /// Wrap a removal action.
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Capability with nothing to remove.
    pub fn noop() -> Self {
        Self { release: None }
    }

    /// Run the removal action if it has not run yet.
    pub fn release(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }

    /// `true` once the removal action has run (or there never was one).
    pub fn is_released(&self) -> bool {
        self.release.is_none()
    }
}

impl Drop for Unregister {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for Unregister {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Unregister")
            .field("released", &self.is_released())
            .finish()
    }
}

/// Reference shared-layout coordinator.
///
/// Coordination policy: the first `sync_update()` of a pass snapshots every registered member
/// in registration order and captures that set; further signals in the same pass are only
/// counted. [`SharedLayoutGroup::flush`] (the group's post-update step) commits the captured
/// members once and closes the pass.
#[derive(Clone)]
pub struct SharedLayoutGroup {
    inner: Rc<GroupInner>,
}

struct GroupInner {
    members: RefCell<IndexMap<ElementId, Member>>,
    captured: RefCell<Option<Vec<ElementRef>>>,
    signals: Cell<u32>,
    next_token: Cell<u64>,
    commit: RefCell<Box<dyn LayoutCommit>>,
    flushing: Cell<bool>,
}

struct Member {
    token: u64,
    element: ElementRef,
}

impl SharedLayoutGroup {
    /// Create an empty group that hands committed members to `commit`.
    pub fn new(commit: impl LayoutCommit + 'static) -> Self {
        Self {
            inner: Rc::new(GroupInner {
                members: RefCell::new(IndexMap::new()),
                captured: RefCell::new(None),
                signals: Cell::new(0),
                next_token: Cell::new(0),
                commit: RefCell::new(Box::new(commit)),
                flushing: Cell::new(false),
            }),
        }
    }

    /// Ids of registered members, in registration order.
    pub fn members(&self) -> Vec<ElementId> {
        self.inner.members.borrow().keys().copied().collect()
    }

    /// Number of registered members.
    pub fn len(&self) -> usize {
        self.inner.members.borrow().len()
    }

    /// `true` when no element is registered.
    pub fn is_empty(&self) -> bool {
        self.inner.members.borrow().is_empty()
    }

    /// `true` if an element with `id` is registered.
    pub fn is_registered(&self, id: ElementId) -> bool {
        self.inner.members.borrow().contains_key(&id)
    }

    /// `true` between the first `sync_update()` of a pass and the closing `flush()`.
    pub fn is_pass_open(&self) -> bool {
        self.inner.captured.borrow().is_some()
    }

    /// Signals received in the currently open pass.
    pub fn pass_signals(&self) -> u32 {
        self.inner.signals.get()
    }

    /// `true` while a flush is running commits.
    pub fn is_flushing(&self) -> bool {
        self.inner.flushing.get()
    }

    fn bump_signals(&self) {
        self.inner.signals.set(self.inner.signals.get().saturating_add(1));
    }

    /// Commit the members captured by this pass and close it.
    ///
    /// Returns the number of committed members; `0` when no pass is open or a flush is already
    /// running.
    #[tracing::instrument(skip(self))]
    pub fn flush(&self) -> WavyteResult<usize> {
        if self.inner.flushing.get() {
            tracing::trace!("group flush already in progress, deferring");
            return Ok(0);
        }
        let Some(batch) = self.inner.captured.borrow_mut().take() else {
            return Ok(0);
        };
        let signals = self.inner.signals.replace(0);

        let _flushing = FlushingGuard::enter(&self.inner.flushing);
        tracing::debug!(count = batch.len(), signals, "flushing shared layout pass");
        let mut commit = self.inner.commit.borrow_mut();
        for element in &batch {
            commit.commit(element)?;
        }
        Ok(batch.len())
    }
}

impl SharedLayoutSync for SharedLayoutGroup {
    fn register(&self, element: ElementRef) -> WavyteResult<Unregister> {
        let id = element.id();
        let token = self.inner.next_token.get();
        self.inner.next_token.set(token.wrapping_add(1));
        self.inner
            .members
            .borrow_mut()
            .insert(id, Member { token, element });
        tracing::trace!(element = %id, token, "shared layout register");

        let group: Weak<GroupInner> = Rc::downgrade(&self.inner);
        Ok(Unregister::new(move || {
            let Some(group) = group.upgrade() else {
                return;
            };
            let mut members = group.members.borrow_mut();
            if members.get(&id).is_some_and(|m| m.token == token) {
                members.shift_remove(&id);
                tracing::trace!(element = %id, token, "shared layout unregister");
            }
        }))
    }

    #[tracing::instrument(skip(self))]
    fn sync_update(&self) -> WavyteResult<()> {
        if self.is_pass_open() {
            self.bump_signals();
            return Ok(());
        }

        let members: Vec<ElementRef> = self
            .inner
            .members
            .borrow()
            .values()
            .map(|m| Rc::clone(&m.element))
            .collect();
        for element in &members {
            element.snapshot()?;
        }
        tracing::debug!(count = members.len(), "shared layout pass opened");
        *self.inner.captured.borrow_mut() = Some(members);
        self.bump_signals();
        Ok(())
    }
}

impl std::fmt::Debug for SharedLayoutGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedLayoutGroup")
            .field("members", &self.members())
            .field("pass_open", &self.is_pass_open())
            .field("signals", &self.pass_signals())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sync/shared.rs"]
mod tests;
