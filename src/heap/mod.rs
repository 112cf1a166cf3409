mod arena;
mod mark_sweep;
mod object;

pub use arena::Heap;
pub use mark_sweep::{CollectionStats, Collector};
pub use object::{Object, ObjectKind, ObjectRef};

use thiserror::Error;

/// Errors that can occur in heap operations
#[derive(Error, Debug)]
pub enum HeapError {
    #[error("Heap allocation failed: {0}")]
    AllocationFailed(String),

    #[error("Invalid object reference: {0}")]
    InvalidReference(ObjectRef),
}

/// Result type for heap operations
pub type HeapResult<T> = Result<T, HeapError>;
