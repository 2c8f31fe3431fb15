pub use kurbo::{Point, Rect, Size, Vec2};

/// Stable identity of a visual element within one animation root.
///
/// Batching and shared-layout registration are keyed by this id, so two handles
/// that report the same id are treated as the same element.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ElementId(pub u64);

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lifecycle position of a measurement unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Constructed, not yet mounted into the render tree.
    Unbound,
    /// Mounted and receiving update hooks.
    Mounted,
    /// Unmounted. Terminal.
    Unmounted,
}

impl Phase {
    /// `true` once no further hooks are accepted.
    pub fn is_terminal(self) -> bool {
        self == Self::Unmounted
    }
}
