//! A scheduler library.
//!
//! This library provides the process model and the round robin policy
//! used to simulate CPU scheduling over a fixed set of processes.
//!

mod error;
mod process;
mod scheduler;
mod schedulers;

pub use crate::error::{Result, SchedulerError};
pub use crate::process::{sequential, ProcessRecord};
pub use crate::scheduler::{Pid, Process, ProcessState, Scheduler, SchedulingDecision, Ticks};
pub use crate::schedulers::RoundRobin;

/// Returns a round robin scheduler over `processes`.
///
/// * `processes` - the processes to run, in the order they are visited
///                 every round
/// * `quantum` - the time quanta that a process can run before it is preempted
pub fn round_robin(processes: Vec<ProcessRecord>, quantum: Ticks) -> Result<RoundRobin> {
    RoundRobin::new(processes, quantum)
}

/// Runs `processes` to completion with a round robin policy.
///
/// Returns the processes in the order they finished. Fails before running
/// anything if the workload is empty, the quantum is 0 or a process has
/// already been scheduled.
pub fn run(processes: Vec<ProcessRecord>, quantum: Ticks) -> Result<Vec<ProcessRecord>> {
    Ok(round_robin(processes, quantum)?.run())
}
