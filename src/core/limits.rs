/*!
 * Simulated OS Limits
 * Compile-time parameters of the modeled machine
 */

/// Maximum number of live processes in the table
pub const MAX_PROCESSES: u32 = 1000;

/// Maximum number of users owning processes
pub const MAX_USERS: u32 = 10;

/// Priority assigned when callers pass no explicit value
pub const DEFAULT_PRIORITY: u32 = 20;

/// Time-slice quantum, in instructions per dispatch
pub const DEFAULT_TIMESLICE: u32 = 6239;

/// Simulated address range instructions may reference
pub const ADDR_SPACE: u32 = 0x1_0000;
