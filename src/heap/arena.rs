use crate::heap::{HeapError, HeapResult, Object, ObjectRef};

/// A heap slot: either a live object or a link in the free list
#[derive(Debug)]
enum Slot {
    Occupied(Object),
    Free { next_free: Option<u32> },
}

/// The object heap: a slab of slots addressed by stable indices
///
/// Freed slots are threaded onto an intrusive free list and reused by later
/// allocations, so an `ObjectRef` stays valid exactly as long as its object
/// is live. Dropping the heap releases every remaining object.
#[derive(Debug)]
pub struct Heap {
    slots: Vec<Slot>,
    free_head: Option<u32>,
    live: usize,
    threshold: usize,
}

impl Heap {
    /// Create an empty heap that first collects at `initial_threshold` objects
    pub fn new(initial_threshold: usize) -> Self {
        Self {
            slots: Vec::new(),
            free_head: None,
            live: 0,
            threshold: initial_threshold,
        }
    }

    /// Allocate an object, reusing a free slot when one is available
    pub fn allocate(&mut self, object: Object) -> HeapResult<ObjectRef> {
        if let Some(index) = self.free_head {
            if let Slot::Free { next_free } = self.slots[index as usize] {
                self.free_head = next_free;
                self.slots[index as usize] = Slot::Occupied(object);
                self.live += 1;
                return Ok(ObjectRef::new(index));
            }
        }

        self.slots
            .try_reserve(1)
            .map_err(|e| HeapError::AllocationFailed(e.to_string()))?;
        let index = self.slots.len() as u32;
        self.slots.push(Slot::Occupied(object));
        self.live += 1;
        Ok(ObjectRef::new(index))
    }

    /// Get the object behind a reference
    pub fn get(&self, reference: ObjectRef) -> HeapResult<&Object> {
        match self.slots.get(reference.index()) {
            Some(Slot::Occupied(object)) => Ok(object),
            _ => Err(HeapError::InvalidReference(reference)),
        }
    }

    /// Mutable access for the collector (and cycle-building tests)
    pub(crate) fn get_mut(&mut self, reference: ObjectRef) -> Option<&mut Object> {
        match self.slots.get_mut(reference.index()) {
            Some(Slot::Occupied(object)) => Some(object),
            _ => None,
        }
    }

    /// Return a slot to the free list; a no-op if the slot is already free
    pub(crate) fn release(&mut self, index: usize) {
        let next_free = self.free_head;
        if let Some(slot) = self.slots.get_mut(index) {
            if matches!(slot, Slot::Occupied(_)) {
                *slot = Slot::Free { next_free };
                self.free_head = Some(index as u32);
                self.live -= 1;
            }
        }
    }

    /// Number of slots the arena has ever grown to, free ones included
    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Iterate over all live objects and their references
    pub fn iter(&self) -> impl Iterator<Item = (ObjectRef, &Object)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| match slot {
                Slot::Occupied(object) => Some((ObjectRef::new(index as u32), object)),
                Slot::Free { .. } => None,
            })
    }

    /// Get the current number of live objects
    pub fn live_count(&self) -> usize {
        self.live
    }

    /// Get the live-object count at which the next allocation collects
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub(crate) fn set_threshold(&mut self, threshold: usize) {
        self.threshold = threshold;
    }

    /// Check if the live-object count has reached the collection threshold
    pub fn should_collect(&self) -> bool {
        self.live >= self.threshold
    }
}
