//! Ordered entity storage with deferred batched removal
//!
//! Indices are positional and only valid within one frame. All removals
//! for a frame are gathered into a `RemovalSet` and applied in one pass,
//! so scans over the same collection never see shifted indices.

use std::collections::BTreeSet;

/// Deduplicated set of indices to drop at the end of a frame
pub type RemovalSet = BTreeSet<usize>;

/// Owned, ordered collection of live entities of one category
#[derive(Debug, Clone)]
pub struct Registry<T> {
    items: Vec<T>,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> Registry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn get_all(&self) -> &[T] {
        &self.items
    }

    pub fn get_all_mut(&mut self) -> &mut [T] {
        &mut self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drop every listed index in one pass, keeping survivors in order
    pub fn remove(&mut self, indices: &RemovalSet) {
        if indices.is_empty() {
            return;
        }
        debug_assert!(
            indices.last().is_none_or(|&i| i < self.items.len()),
            "removal index out of range"
        );

        let mut index = 0;
        self.items.retain(|_| {
            let keep = !indices.contains(&index);
            index += 1;
            keep
        });
    }

    /// Keep only items for which `keep` returns true (immediate expiry)
    pub fn retain_mut(&mut self, keep: impl FnMut(&mut T) -> bool) {
        self.items.retain_mut(keep);
    }
}
