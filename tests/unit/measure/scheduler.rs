use super::*;
use crate::element::visual::VisualElement;
use crate::foundation::core::ElementId;
use crate::sync::batcher::SyncLayoutBatcher;
use crate::sync::shared::SharedLayoutSync;
use std::cell::RefCell;

type Log = Rc<RefCell<Vec<String>>>;

struct SpyElement {
    id: ElementId,
    log: Log,
}

impl VisualElement for SpyElement {
    fn id(&self) -> ElementId {
        self.id
    }

    fn snapshot(&self) -> WavyteResult<()> {
        self.log.borrow_mut().push(format!("snapshot {}", self.id.0));
        Ok(())
    }
}

struct SpyContext {
    log: Log,
    refuse: bool,
}

impl SharedLayoutSync for SpyContext {
    fn register(&self, element: ElementRef) -> WavyteResult<Unregister> {
        if self.refuse {
            return Err(WavyteError::layout("context refused registration"));
        }
        let id = element.id().0;
        self.log.borrow_mut().push(format!("register {id}"));
        let log = Rc::clone(&self.log);
        Ok(Unregister::new(move || {
            log.borrow_mut().push(format!("unregister {id}"))
        }))
    }

    fn sync_update(&self) -> WavyteResult<()> {
        self.log.borrow_mut().push("sync_update".to_string());
        Ok(())
    }
}

fn spy(id: u64, log: &Log) -> ElementRef {
    Rc::new(SpyElement {
        id: ElementId(id),
        log: Rc::clone(log),
    })
}

fn logging_batcher(log: &Log) -> SyncLayoutBatcher {
    let log = Rc::clone(log);
    SyncLayoutBatcher::new(move |el: &ElementRef| -> WavyteResult<()> {
        log.borrow_mut().push(format!("commit {}", el.id().0));
        Ok(())
    })
}

fn shared_ctx(log: &Log) -> SyncLayout {
    SyncLayout::shared(SpyContext {
        log: Rc::clone(log),
        refuse: false,
    })
}

#[test]
fn stand_alone_snapshots_before_commit() {
    let log: Log = Rc::default();
    let batcher = logging_batcher(&log);
    let mut unit = MeasureLayout::new(spy(1, &log), batcher.clone().into());
    assert_eq!(unit.mode(), SyncMode::Batcher);

    unit.did_mount().unwrap();
    assert!(!unit.is_registered());
    unit.snapshot_before_update().unwrap();
    assert!(batcher.contains(ElementId(1)));
    unit.did_update().unwrap();

    assert_eq!(*log.borrow(), vec!["snapshot 1", "commit 1"]);
    assert!(batcher.is_empty());
}

#[test]
fn shared_mode_only_signals_the_context() {
    let log: Log = Rc::default();
    let mut unit = MeasureLayout::new(spy(4, &log), shared_ctx(&log));
    assert_eq!(unit.mode(), SyncMode::Shared);

    unit.did_mount().unwrap();
    assert!(unit.is_registered());
    unit.snapshot_before_update().unwrap();
    unit.did_update().unwrap();
    unit.will_unmount().unwrap();

    assert_eq!(
        *log.borrow(),
        vec!["register 4", "sync_update", "unregister 4"]
    );
    assert!(!unit.is_registered());
    assert_eq!(unit.phase(), Phase::Unmounted);
}

#[test]
fn dropping_a_mounted_shared_unit_releases_registration() {
    let log: Log = Rc::default();
    let mut unit = MeasureLayout::new(spy(2, &log), shared_ctx(&log));
    unit.did_mount().unwrap();
    drop(unit);
    assert_eq!(*log.borrow(), vec!["register 2", "unregister 2"]);
}

#[test]
fn hooks_outside_mounted_phase_are_rejected() {
    let log: Log = Rc::default();
    let mut unit = MeasureLayout::new(spy(1, &log), logging_batcher(&log).into());

    assert!(matches!(
        unit.snapshot_before_update(),
        Err(WavyteError::Lifecycle(_))
    ));
    unit.did_mount().unwrap();
    assert!(matches!(unit.did_mount(), Err(WavyteError::Lifecycle(_))));

    unit.will_unmount().unwrap();
    assert!(matches!(unit.did_update(), Err(WavyteError::Lifecycle(_))));
    assert!(matches!(unit.will_unmount(), Err(WavyteError::Lifecycle(_))));
    assert!(log.borrow().is_empty());
}

#[test]
fn unmount_before_mount_is_terminal() {
    let log: Log = Rc::default();
    let mut unit = MeasureLayout::new(spy(1, &log), shared_ctx(&log));
    unit.will_unmount().unwrap();
    assert_eq!(unit.phase(), Phase::Unmounted);
    assert!(matches!(unit.did_mount(), Err(WavyteError::Lifecycle(_))));
    assert!(log.borrow().is_empty());
}

#[test]
fn failed_registration_leaves_unit_unbound() {
    let log: Log = Rc::default();
    let ctx = SyncLayout::shared(SpyContext {
        log: Rc::clone(&log),
        refuse: true,
    });
    let mut unit = MeasureLayout::new(spy(1, &log), ctx);
    assert!(matches!(unit.did_mount(), Err(WavyteError::Layout(_))));
    assert_eq!(unit.phase(), Phase::Unbound);
    assert!(!unit.is_registered());
}

#[test]
fn mode_is_fixed_at_construction() {
    let log: Log = Rc::default();
    let fallback = logging_batcher(&log);
    let mut ambient = shared_ctx(&log);
    let mut unit = MeasureLayout::new(spy(9, &log), ambient.clone());

    ambient = SyncLayout::from(fallback.clone());
    assert_eq!(ambient.mode(), SyncMode::Batcher);

    unit.did_mount().unwrap();
    unit.snapshot_before_update().unwrap();
    unit.did_update().unwrap();
    assert_eq!(unit.mode(), SyncMode::Shared);
    assert!(fallback.is_empty());
    assert_eq!(*log.borrow(), vec!["register 9", "sync_update"]);
}
