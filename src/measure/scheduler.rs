use std::rc::Rc;

use crate::{
    element::visual::ElementRef,
    foundation::core::Phase,
    foundation::error::{WavyteError, WavyteResult},
    measure::lifecycle::LayoutLifecycle,
    sync::shared::Unregister,
    sync::target::{SyncLayout, SyncMode},
};

/// Schedules layout measurement for one animated element.
///
/// Under a shared-layout context the unit registers its element on mount and only signals
/// `sync_update()` before each update; the context decides when to snapshot. Stand-alone, it
/// snapshots its element, queues it in the batcher, and flushes the batcher after the update.
/// Sibling units sharing the batcher coalesce into one flush per pass.
///
/// Renders nothing.
pub struct MeasureLayout {
    element: ElementRef,
    sync: SyncLayout,
    // Present iff mounted under a shared context. Taken exactly once on unmount.
    remove_child: Option<Unregister>,
    phase: Phase,
}

impl MeasureLayout {
    /// Bind `element` to the ambient `sync` target. The target is fixed for the unit's lifetime.
    pub fn new(element: ElementRef, sync: SyncLayout) -> Self {
        Self {
            element,
            sync,
            remove_child: None,
            phase: Phase::Unbound,
        }
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Shared or stand-alone, as decided at construction.
    pub fn mode(&self) -> SyncMode {
        self.sync.mode()
    }

    /// The measured element.
    pub fn element(&self) -> &ElementRef {
        &self.element
    }

    /// `true` while a shared-layout registration is held.
    pub fn is_registered(&self) -> bool {
        self.remove_child.is_some()
    }

    fn ensure_mounted(&self, hook: &str) -> WavyteResult<()> {
        match self.phase {
            Phase::Mounted => Ok(()),
            Phase::Unbound => Err(WavyteError::lifecycle(format!(
                "{hook} on element {} before mount",
                self.element.id()
            ))),
            Phase::Unmounted => Err(WavyteError::lifecycle(format!(
                "{hook} on element {} after unmount",
                self.element.id()
            ))),
        }
    }
}

impl LayoutLifecycle for MeasureLayout {
    fn did_mount(&mut self) -> WavyteResult<()> {
        if self.phase != Phase::Unbound {
            return Err(WavyteError::lifecycle(format!(
                "did_mount on element {} in phase {:?}",
                self.element.id(),
                self.phase
            )));
        }
        if let SyncLayout::Shared(ctx) = &self.sync {
            self.remove_child = Some(ctx.register(Rc::clone(&self.element))?);
        }
        self.phase = Phase::Mounted;
        Ok(())
    }

    fn snapshot_before_update(&mut self) -> WavyteResult<()> {
        self.ensure_mounted("snapshot_before_update")?;
        match &self.sync {
            SyncLayout::Shared(ctx) => ctx.sync_update(),
            SyncLayout::Batcher(batcher) => {
                self.element.snapshot()?;
                batcher.add(Rc::clone(&self.element));
                Ok(())
            }
        }
    }

    fn did_update(&mut self) -> WavyteResult<()> {
        self.ensure_mounted("did_update")?;
        match &self.sync {
            SyncLayout::Shared(_) => Ok(()),
            SyncLayout::Batcher(batcher) => batcher.flush().map(|_| ()),
        }
    }

    fn will_unmount(&mut self) -> WavyteResult<()> {
        if self.phase.is_terminal() {
            return Err(WavyteError::lifecycle(format!(
                "will_unmount on element {} after unmount",
                self.element.id()
            )));
        }
        if let Some(mut remove_child) = self.remove_child.take() {
            remove_child.release();
        }
        self.phase = Phase::Unmounted;
        Ok(())
    }
}

impl std::fmt::Debug for MeasureLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MeasureLayout")
            .field("element", &self.element.id())
            .field("mode", &self.mode())
            .field("phase", &self.phase)
            .field("registered", &self.is_registered())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/measure/scheduler.rs"]
mod tests;
