use std::fmt::{self, Display};
use std::num::NonZeroUsize;

use crate::error::{Result, SchedulerError};

/// Simulated time, in abstract time units.
pub type Ticks = u64;

/// The PID of a process
///
/// The PID cannot be 0, PIDs start from 1 and are displayed as `p1`, `p2`, ...
#[derive(PartialEq, Eq, Copy, Clone, Hash, Ord, PartialOrd)]
#[repr(transparent)]
pub struct Pid(NonZeroUsize);

impl Pid {
    /// Returns [`None`] for 0.
    pub fn new(pid: usize) -> Option<Pid> {
        NonZeroUsize::new(pid).map(Pid)
    }

    /// The PID of the process created at the zero-based position `index`.
    pub fn from_index(index: usize) -> Pid {
        Pid(NonZeroUsize::MIN.saturating_add(index))
    }

    pub fn get(&self) -> usize {
        self.0.get()
    }
}

impl PartialEq<usize> for Pid {
    fn eq(&self, other: &usize) -> bool {
        self.0.get() == *other
    }
}

impl Display for Pid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "p{}", self.0)
    }
}

impl fmt::Debug for Pid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "p{}", self.0)
    }
}

/// The action the scheduler took on its last step.
///
/// This is returned by the [`Scheduler::next`] function.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SchedulingDecision {
    /// The process with PID `pid` ran for `executed` time units starting at
    /// clock value `at`, during the `round`-th pass over the processes.
    Run {
        round: usize,
        pid: Pid,
        at: Ticks,
        executed: Ticks,
    },

    /// There are no more processes to schedule.
    Done,
}

impl Display for SchedulingDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchedulingDecision::Run {
                round,
                pid,
                at,
                executed,
            } => {
                write!(f, "Round {round}: run {pid} for {executed} units at {at}")
            }
            SchedulingDecision::Done => {
                write!(f, "Done, no more processes")
            }
        }
    }
}

/// The trait that any scheduler has to implement.
pub trait Scheduler {
    /// Grants the next execution slice, or returns
    /// [`SchedulingDecision::Done`] once every process has finished.
    fn next(&mut self) -> SchedulingDecision;

    /// The current value of the simulated clock.
    fn clock(&self) -> Ticks;

    /// Returns the list of processes, in creation order.
    fn list(&self) -> Vec<&dyn Process>;

    /// Returns the finished processes, in completion order.
    fn completed(&self) -> Vec<&dyn Process>;
}

/// The state of a process.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ProcessState {
    /// The process has never been granted a slice.
    New,

    /// The process has run at least once and still has work left.
    Running,

    /// The process has no remaining work. Terminal.
    Finished,
}

impl Display for ProcessState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessState::New => write!(f, "NEW"),
            ProcessState::Running => write!(f, "RUNNING"),
            ProcessState::Finished => write!(f, "FINISHED"),
        }
    }
}

/// The trait that the Process Control Block (PCB) has to implement.
///
/// The metrics are provided on top of the timestamp accessors, so they are
/// pure functions of fields that never change once set.
pub trait Process {
    /// Return the PID of the process.
    fn pid(&self) -> Pid;

    /// Return the state of the process.
    fn state(&self) -> ProcessState;

    fn arrival_time(&self) -> Ticks;

    /// The clock value of the first slice granted to the process.
    fn start_time(&self) -> Option<Ticks>;

    /// The clock value at which the remaining time reached 0.
    fn end_time(&self) -> Option<Ticks>;

    fn total_execution_time(&self) -> Ticks;

    fn remaining_time(&self) -> Ticks;

    /// Time from arrival to completion.
    fn turnaround_time(&self) -> Result<Ticks> {
        let end = self.end_time().ok_or_else(|| {
            SchedulerError::PreconditionViolation(format!("{} has not finished", self.pid()))
        })?;
        since_arrival(self.pid(), end, self.arrival_time())
    }

    /// Time from arrival to the first slice.
    fn wait_time(&self) -> Result<Ticks> {
        let start = self.start_time().ok_or_else(|| {
            SchedulerError::PreconditionViolation(format!("{} has not started", self.pid()))
        })?;
        since_arrival(self.pid(), start, self.arrival_time())
    }

    /// Total execution time over the time elapsed between start and end.
    fn utilization(&self) -> Result<f64> {
        let pid = self.pid();
        let (Some(start), Some(end)) = (self.start_time(), self.end_time()) else {
            return Err(SchedulerError::PreconditionViolation(format!(
                "{pid} has not run to completion"
            )));
        };
        match end.checked_sub(start) {
            Some(0) => Err(SchedulerError::DivisionByZero(pid)),
            Some(elapsed) => Ok(self.total_execution_time() as f64 / elapsed as f64),
            None => Err(SchedulerError::PreconditionViolation(format!(
                "{pid} finished at {end} before it started at {start}"
            ))),
        }
    }
}

fn since_arrival(pid: Pid, time: Ticks, arrival: Ticks) -> Result<Ticks> {
    time.checked_sub(arrival).ok_or_else(|| {
        SchedulerError::PreconditionViolation(format!(
            "{pid} has a timestamp {time} earlier than its arrival {arrival}"
        ))
    })
}
