//! Scoped snapshot/restore around a search

use super::error::{Result, ScaleError};
use super::field::BatchSizeField;
use super::trainable::Trainable;
use tracing::debug;

/// Holds a trainable for the duration of a search
///
/// The snapshot is taken on construction and put back when the guard is
/// dropped, whichever way the search exits (error, early return, panic).
/// [`commit`](RestoreGuard::commit) restores and then writes the chosen size.
pub(crate) struct RestoreGuard<'a, T: Trainable> {
    target: &'a mut T,
    snapshot: Option<T::Snapshot>,
}

impl<'a, T: Trainable> RestoreGuard<'a, T> {
    pub(crate) fn new(target: &'a mut T) -> Self {
        debug!("snapshotting trainable state before batch size search");
        let snapshot = target.snapshot();
        Self { target, snapshot: Some(snapshot) }
    }

    pub(crate) fn target(&mut self) -> &mut T {
        &mut *self.target
    }

    /// Restore the snapshot, then set the field to `batch_size` and rebuild
    /// the data loader once
    ///
    /// If the rebuild fails the field goes back to `original`.
    pub(crate) fn commit(
        mut self,
        field: &BatchSizeField,
        batch_size: usize,
        original: usize,
    ) -> Result<()> {
        self.restore();
        field.set(&mut *self.target, batch_size)?;
        if let Err(source) = self.target.rebuild_data_loader() {
            field.set(&mut *self.target, original)?;
            return Err(ScaleError::Loader { batch_size, source });
        }
        Ok(())
    }

    fn restore(&mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            debug!("restoring trainable state after batch size search");
            self.target.restore(snapshot);
        }
    }
}

impl<T: Trainable> Drop for RestoreGuard<'_, T> {
    fn drop(&mut self) {
        self.restore();
    }
}
