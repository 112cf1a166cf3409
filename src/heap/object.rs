use std::fmt;

/// Reference to an object in the heap, stable for the object's lifetime
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectRef {
    // Index of the object's slot in the heap arena
    index: u32,
}

impl ObjectRef {
    /// Create a reference to the slot at the given index
    pub fn new(index: u32) -> Self {
        Self { index }
    }

    /// Get the arena slot index this reference points at
    pub fn index(&self) -> usize {
        self.index as usize
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectRef({})", self.index)
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Object@{}", self.index)
    }
}

/// The type tag of a heap object, fixed at construction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObjectKind {
    Scalar,
    Pair,
}

/// Payload of a heap object: an integer, or two references to other objects
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Payload {
    Scalar(i64),
    Pair { first: ObjectRef, second: ObjectRef },
}

/// A single heap-allocated object plus its GC bookkeeping
///
/// The mark bit is transient: it is only set between the mark and sweep
/// phases of a single collection cycle, and is false at all other times.
#[derive(Debug)]
pub struct Object {
    marked: bool,
    payload: Payload,
}

impl Object {
    /// Create a scalar object holding an integer value
    pub fn scalar(value: i64) -> Self {
        Self {
            marked: false,
            payload: Payload::Scalar(value),
        }
    }

    /// Create a pair object referencing two existing objects
    pub fn pair(first: ObjectRef, second: ObjectRef) -> Self {
        Self {
            marked: false,
            payload: Payload::Pair { first, second },
        }
    }

    /// Get this object's type tag
    pub fn kind(&self) -> ObjectKind {
        match self.payload {
            Payload::Scalar(_) => ObjectKind::Scalar,
            Payload::Pair { .. } => ObjectKind::Pair,
        }
    }

    /// Get the integer value if this is a scalar
    pub fn value(&self) -> Option<i64> {
        match self.payload {
            Payload::Scalar(value) => Some(value),
            Payload::Pair { .. } => None,
        }
    }

    /// Get the two references if this is a pair
    pub fn children(&self) -> Option<(ObjectRef, ObjectRef)> {
        match self.payload {
            Payload::Scalar(_) => None,
            Payload::Pair { first, second } => Some((first, second)),
        }
    }

    /// Whether the collector has marked this object in the current cycle
    pub fn is_marked(&self) -> bool {
        self.marked
    }

    /// Set the mark bit, returning true if the object was previously unmarked
    pub(crate) fn mark(&mut self) -> bool {
        let newly_marked = !self.marked;
        self.marked = true;
        newly_marked
    }

    /// Reset the mark bit in preparation for the next cycle
    pub(crate) fn clear_mark(&mut self) {
        self.marked = false;
    }

    #[cfg(test)]
    pub(crate) fn payload_mut(&mut self) -> &mut Payload {
        &mut self.payload
    }
}
