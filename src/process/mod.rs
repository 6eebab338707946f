/*!
 * Process Module
 * Process types, control blocks, synthetic code, and the process table
 */

pub mod codegen;
pub mod pcb;
pub mod table;
pub mod types;

// Re-export for convenience
pub use pcb::{Pcb, Process};
pub use table::ProcessTable;
pub use types::{Instruction, MemoryUsage, ProcessState, ProcessType, SyscallKind};
