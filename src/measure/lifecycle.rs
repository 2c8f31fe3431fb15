use crate::{foundation::error::WavyteResult, sync::shared::SharedLayoutGroup};

/// The four callback points a host render loop drives for each measurement unit.
///
/// Per update pass the host must run `snapshot_before_update` for every updating unit before
/// it runs any `did_update`.
pub trait LayoutLifecycle {
    /// The owning element was inserted into the render tree.
    fn did_mount(&mut self) -> WavyteResult<()>;

    /// Last point at which pre-update geometry is observable (between render and commit).
    fn snapshot_before_update(&mut self) -> WavyteResult<()>;

    /// The update was committed.
    fn did_update(&mut self) -> WavyteResult<()>;

    /// The owning element is leaving the render tree.
    fn will_unmount(&mut self) -> WavyteResult<()>;
}

impl<T: LayoutLifecycle + ?Sized> LayoutLifecycle for Box<T> {
    fn did_mount(&mut self) -> WavyteResult<()> {
        (**self).did_mount()
    }

    fn snapshot_before_update(&mut self) -> WavyteResult<()> {
        (**self).snapshot_before_update()
    }

    fn did_update(&mut self) -> WavyteResult<()> {
        (**self).did_update()
    }

    fn will_unmount(&mut self) -> WavyteResult<()> {
        (**self).will_unmount()
    }
}

/// A shared-layout group sits in the tree as an ancestor of its members: its post-update step
/// closes the pass its members opened.
impl LayoutLifecycle for SharedLayoutGroup {
    fn did_mount(&mut self) -> WavyteResult<()> {
        Ok(())
    }

    fn snapshot_before_update(&mut self) -> WavyteResult<()> {
        Ok(())
    }

    fn did_update(&mut self) -> WavyteResult<()> {
        self.flush().map(|_| ())
    }

    fn will_unmount(&mut self) -> WavyteResult<()> {
        Ok(())
    }
}

/// Mount every unit in order.
pub fn mount_all<U: LayoutLifecycle>(units: &mut [U]) -> WavyteResult<()> {
    for unit in units.iter_mut() {
        unit.did_mount()?;
    }
    Ok(())
}

/// Drive one update pass: every pre-commit point, then `commit`, then every post-update hook.
///
/// `commit` stands in for the host's commit phase (typically writing the new layout). Units are
/// visited in slice order, so ancestors that must run after their descendants (such as a
/// [`SharedLayoutGroup`]) go last.
#[tracing::instrument(skip(units, commit), fields(count = units.len()))]
pub fn run_update_pass<U, F>(units: &mut [U], commit: F) -> WavyteResult<()>
where
    U: LayoutLifecycle,
    F: FnOnce() -> WavyteResult<()>,
{
    for unit in units.iter_mut() {
        unit.snapshot_before_update()?;
    }
    commit()?;
    for unit in units.iter_mut() {
        unit.did_update()?;
    }
    Ok(())
}

/// Unmount every unit in order.
pub fn unmount_all<U: LayoutLifecycle>(units: &mut [U]) -> WavyteResult<()> {
    for unit in units.iter_mut() {
        unit.will_unmount()?;
    }
    Ok(())
}
