mod config;
mod error;
mod machine;
mod operand_stack;

pub use config::VmConfig;
pub use error::{VmError, VmResult};
pub use machine::Machine;
pub use operand_stack::OperandStack;
