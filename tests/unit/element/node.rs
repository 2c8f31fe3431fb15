use super::*;

#[test]
fn snapshot_records_current_box() {
    let node = LayoutNode::new(ElementId(1), Rect::new(0.0, 0.0, 10.0, 10.0));
    assert!(node.snapshot_rect().is_none());
    assert!(node.layout_delta().is_none());

    node.snapshot().unwrap();
    assert_eq!(node.snapshot_rect(), Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
    assert_eq!(node.snapshot_count(), 1);
    assert!(node.layout_delta().unwrap().is_identity());
}

#[test]
fn delta_maps_new_box_onto_snapshot() {
    let node = LayoutNode::new(ElementId(1), Rect::new(0.0, 0.0, 10.0, 10.0));
    node.snapshot().unwrap();
    node.set_layout(Rect::new(20.0, 0.0, 40.0, 20.0));

    let d = node.layout_delta().unwrap();
    assert_eq!(d.translate, Vec2::new(-25.0, -5.0));
    assert_eq!(d.scale, Vec2::new(0.5, 0.5));
    assert!(!d.is_identity());
}

#[test]
fn zero_sized_current_box_keeps_unit_scale() {
    let d = LayoutDelta::between(
        Rect::new(0.0, 0.0, 10.0, 10.0),
        Rect::new(0.0, 0.0, 0.0, 0.0),
    );
    assert_eq!(d.scale, Vec2::new(1.0, 1.0));
}

#[test]
fn non_finite_layout_is_a_layout_error() {
    let node = LayoutNode::new(ElementId(7), Rect::new(0.0, 0.0, f64::NAN, 1.0));
    let err = node.snapshot().unwrap_err();
    assert!(matches!(err, WavyteError::Layout(_)));
    assert_eq!(node.snapshot_count(), 0);
}
