use crate::heap::ObjectRef;
use crate::vm::{VmError, VmResult};

/// The machine's bounded root stack
///
/// Everything on the stack is a GC root: the collector treats the stack's
/// contents, bottom to top, as the root set. Capacity is fixed at
/// construction; exceeding it is a recoverable `StackOverflow`, not a
/// process exit.
#[derive(Debug)]
pub struct OperandStack {
    slots: Vec<ObjectRef>,
    capacity: usize,
}

impl OperandStack {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a reference onto the stack
    pub fn push(&mut self, reference: ObjectRef) -> VmResult<()> {
        if self.slots.len() == self.capacity {
            return Err(VmError::StackOverflow);
        }
        self.slots.push(reference);
        Ok(())
    }

    /// Pop the most recently pushed reference
    pub fn pop(&mut self) -> VmResult<ObjectRef> {
        self.slots.pop().ok_or(VmError::StackUnderflow)
    }

    /// Get the current stack depth
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Get the configured capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Enumerate the held references, bottom to top, without mutating
    pub fn iter(&self) -> impl Iterator<Item = ObjectRef> + '_ {
        self.slots.iter().copied()
    }

    /// The stack contents as a slice, bottom to top
    pub fn as_slice(&self) -> &[ObjectRef] {
        &self.slots
    }
}
