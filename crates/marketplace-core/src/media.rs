// crates/marketplace-core/src/media.rs

//! Ordering of asynchronously read images.
//!
//! File reads complete in arbitrary order. [`ImageBatch`] hands out a slot
//! per file at submission time, so the final image list follows submission
//! order no matter when each read finishes.

use serde::{Deserialize, Serialize};

/// Handle for one submitted file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotId(pub usize);

#[derive(Debug, Clone, PartialEq, Eq)]
enum Slot {
    Pending,
    Ready(String),
    Failed,
    Removed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageBatch {
    slots: Vec<Slot>,
}

impl ImageBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from images already attached to the ad being edited.
    pub fn with_existing(images: impl IntoIterator<Item = String>) -> Self {
        Self {
            slots: images.into_iter().map(Slot::Ready).collect(),
        }
    }

    /// Reserves the next position. Call once per file, in submission order.
    pub fn reserve(&mut self) -> SlotId {
        self.slots.push(Slot::Pending);
        SlotId(self.slots.len() - 1)
    }

    /// Records a finished read. Returns `false` for unknown or already
    /// settled slots.
    pub fn complete(&mut self, slot: SlotId, data_uri: impl Into<String>) -> bool {
        self.settle(slot, Slot::Ready(data_uri.into()))
    }

    /// Records a failed read; the slot is skipped in the output.
    pub fn fail(&mut self, slot: SlotId) -> bool {
        self.settle(slot, Slot::Failed)
    }

    fn settle(&mut self, slot: SlotId, value: Slot) -> bool {
        match self.slots.get_mut(slot.0) {
            Some(s @ Slot::Pending) => {
                *s = value;
                true
            }
            _ => false,
        }
    }

    /// Removes the `index`-th visible image.
    pub fn remove(&mut self, index: usize) -> bool {
        let target = self
            .slots
            .iter()
            .enumerate()
            .filter(|(_, s)| matches!(s, Slot::Ready(_)))
            .nth(index)
            .map(|(i, _)| i);
        match target {
            Some(i) => {
                self.slots[i] = Slot::Removed;
                true
            }
            None => false,
        }
    }

    pub fn pending(&self) -> usize {
        self.slots.iter().filter(|s| **s == Slot::Pending).count()
    }

    pub fn is_settled(&self) -> bool {
        self.pending() == 0
    }

    /// Finished images in submission order.
    pub fn images(&self) -> Vec<&str> {
        self.slots
            .iter()
            .filter_map(|s| match s {
                Slot::Ready(uri) => Some(uri.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn into_images(self) -> Vec<String> {
        self.slots
            .into_iter()
            .filter_map(|s| match s {
                Slot::Ready(uri) => Some(uri),
                _ => None,
            })
            .collect()
    }
}
