/*!
 * Core Types
 * Common identifier types used across the simulator
 */

/// Process ID type (valid pids are 1..=MAX_PROCESSES)
pub type Pid = u32;

/// User ID type (valid uids are 1..=MAX_USERS)
pub type Uid = u32;

/// Priority value (lower value = more urgent)
pub type Priority = u32;
