use std::rc::Rc;

use crate::sync::{
    batcher::SyncLayoutBatcher,
    shared::{SharedLayoutGroup, SharedLayoutRef, SharedLayoutSync},
};

/// Ambient synchronization target seen by a measurement unit at construction.
///
/// Resolved once and never re-evaluated: a unit built under a shared context stays in shared
/// mode for its whole life, even if the ambient context later changes.
#[derive(Clone)]
pub enum SyncLayout {
    /// A shared-layout coordinator owns snapshot and flush timing.
    Shared(SharedLayoutRef),
    /// Stand-alone: snapshot directly, queue in the batcher, flush after update.
    Batcher(SyncLayoutBatcher),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Which variant of [`SyncLayout`] is active.
pub enum SyncMode {
    /// Registered with a shared-layout coordinator.
    Shared,
    /// Stand-alone batch member.
    Batcher,
}

impl SyncLayout {
    /// Ambient lookup: the shared context when one is present, the root batcher otherwise.
    pub fn resolve(shared: Option<&SharedLayoutRef>, fallback: &SyncLayoutBatcher) -> Self {
        match shared {
            Some(ctx) => Self::Shared(Rc::clone(ctx)),
            None => Self::Batcher(fallback.clone()),
        }
    }

    /// Wrap any coordinator as a shared target.
    pub fn shared(ctx: impl SharedLayoutSync + 'static) -> Self {
        Self::Shared(Rc::new(ctx))
    }

    /// Active variant.
    pub fn mode(&self) -> SyncMode {
        match self {
            Self::Shared(_) => SyncMode::Shared,
            Self::Batcher(_) => SyncMode::Batcher,
        }
    }

    /// `true` for [`SyncLayout::Shared`].
    pub fn is_shared(&self) -> bool {
        matches!(self, Self::Shared(_))
    }
}

impl From<SyncLayoutBatcher> for SyncLayout {
    fn from(value: SyncLayoutBatcher) -> Self {
        Self::Batcher(value)
    }
}

impl From<SharedLayoutGroup> for SyncLayout {
    fn from(value: SharedLayoutGroup) -> Self {
        Self::shared(value)
    }
}

impl std::fmt::Debug for SyncLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Shared(_) => f.write_str("SyncLayout::Shared(..)"),
            Self::Batcher(b) => f.debug_tuple("SyncLayout::Batcher").field(b).finish(),
        }
    }
}
