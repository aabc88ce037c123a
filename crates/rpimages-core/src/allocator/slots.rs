//! Lowest-free slot allocation.

use std::collections::HashSet;

/// Hands out the smallest positive slot value not yet in use.
///
/// Slots are never released, so the lowest free value only moves upwards.
/// `next` is kept at or below it: every value below `next` is in use.
#[derive(Debug, Clone)]
pub struct SlotAllocator {
    used: HashSet<u32>,
    next: u32,
}

impl Default for SlotAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl SlotAllocator {
    pub fn new() -> Self {
        Self {
            used: HashSet::new(),
            next: 1,
        }
    }

    /// Allocator seeded with slots that are already taken.
    pub fn with_used(slots: impl IntoIterator<Item = u32>) -> Self {
        let mut allocator = Self::new();
        for slot in slots {
            allocator.mark_used(slot);
        }
        allocator
    }

    /// Record `slot` as taken. Returns `false` if it already was.
    pub fn mark_used(&mut self, slot: u32) -> bool {
        self.used.insert(slot)
    }

    pub fn is_used(&self, slot: u32) -> bool {
        self.used.contains(&slot)
    }

    /// Take the smallest free positive slot.
    pub fn allocate(&mut self) -> u32 {
        while self.used.contains(&self.next) {
            self.next += 1;
        }
        let slot = self.next;
        self.used.insert(slot);
        self.next += 1;
        slot
    }

    pub fn len(&self) -> usize {
        self.used.len()
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }
}
