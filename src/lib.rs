// Crumb - A toy stack VM with a mark-sweep garbage collected heap

pub mod heap;
pub mod vm;

pub use heap::{CollectionStats, Heap, HeapError, Object, ObjectKind, ObjectRef};
pub use vm::{Machine, OperandStack, VmConfig, VmError};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
