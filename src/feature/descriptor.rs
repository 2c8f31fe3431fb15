use crate::{
    element::visual::ElementRef,
    feature::props::{MotionProps, should_measure},
    measure::{lifecycle::LayoutLifecycle, scheduler::MeasureLayout},
    sync::target::SyncLayout,
};

/// Declarative motion feature a host tree attaches to qualifying elements.
#[derive(Clone, Copy, Debug)]
pub struct MotionFeature {
    /// Stable feature key.
    pub key: &'static str,
    /// Whether an element with these props gets the feature at all.
    pub should_render: fn(&MotionProps) -> bool,
    /// Build the feature unit for one element under the ambient sync target.
    pub create: fn(ElementRef, &SyncLayout) -> Box<dyn LayoutLifecycle>,
}

impl MotionFeature {
    /// Build the unit if `props` qualify, `None` otherwise.
    pub fn instantiate(
        &self,
        props: &MotionProps,
        element: ElementRef,
        ambient: &SyncLayout,
    ) -> Option<Box<dyn LayoutLifecycle>> {
        if !(self.should_render)(props) {
            tracing::trace!(feature = self.key, element = %element.id(), "feature inactive");
            return None;
        }
        Some((self.create)(element, ambient))
    }
}

/// Layout measurement scheduling for drag, layout and shared-layout elements.
pub const MEASURE_LAYOUT: MotionFeature = MotionFeature {
    key: "measure-layout",
    should_render: should_measure,
    create: create_measure_layout,
};

fn create_measure_layout(element: ElementRef, ambient: &SyncLayout) -> Box<dyn LayoutLifecycle> {
    Box::new(MeasureLayout::new(element, ambient.clone()))
}

#[cfg(test)]
#[path = "../../tests/unit/feature/descriptor.rs"]
mod tests;
