use crate::heap::HeapError;
use thiserror::Error;

/// Error type for VM operations
#[derive(Error, Debug)]
pub enum VmError {
    #[error("Stack overflow")]
    StackOverflow,

    #[error("Stack underflow")]
    StackUnderflow,

    #[error("Heap error: {0}")]
    Heap(#[from] HeapError),
}

/// Result type for VM operations
pub type VmResult<T> = Result<T, VmError>;
