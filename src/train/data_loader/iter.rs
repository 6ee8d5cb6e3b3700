//! Iterator over one epoch of batches.

use super::loader::DataLoader;
use crate::train::Batch;

/// Iterator over one epoch of batches.
pub struct DataLoaderIter<'a> {
    loader: &'a DataLoader,
    order: Vec<usize>,
    position: usize,
}

impl<'a> DataLoaderIter<'a> {
    pub(crate) fn new(loader: &'a DataLoader, order: Vec<usize>) -> Self {
        Self { loader, order, position: 0 }
    }
}

impl Iterator for DataLoaderIter<'_> {
    type Item = Batch;

    fn next(&mut self) -> Option<Self::Item> {
        let batch = self.loader.batch_at(&self.order, self.position)?;
        self.position += 1;
        Some(batch)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.loader.num_batches().saturating_sub(self.position);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for DataLoaderIter<'_> {}
