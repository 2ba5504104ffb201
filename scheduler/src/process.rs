use std::num::NonZeroU64;

use crate::error::{Result, SchedulerError};
use crate::{Pid, Process, ProcessState, Ticks};

/// The process control block used by the schedulers.
///
/// The static parameters are fixed at creation. The run-time state is
/// only changed through [`ProcessRecord::run_slice`] and the `mark_*`
/// functions.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessRecord {
    pid: Pid,
    total_execution_time: Ticks,
    remaining_time: Ticks,
    arrival_time: Ticks,
    start_time: Option<Ticks>,
    end_time: Option<Ticks>,
    state: ProcessState,
}

impl ProcessRecord {
    /// Creates a new process that needs `total_execution_time` units of CPU.
    ///
    /// * `pid` - the identifier of the process
    /// * `total_execution_time` - must be greater than 0
    /// * `arrival_time` - the clock value at which the process arrives
    pub fn new(pid: Pid, total_execution_time: Ticks, arrival_time: Ticks) -> Result<Self> {
        if total_execution_time == 0 {
            return Err(SchedulerError::InvalidArgument(format!(
                "{pid} must have a positive execution time"
            )));
        }

        Ok(ProcessRecord {
            pid,
            total_execution_time,
            remaining_time: total_execution_time,
            arrival_time,
            start_time: None,
            end_time: None,
            state: ProcessState::New,
        })
    }

    /// Records the first time the process runs. Later calls are ignored.
    pub fn mark_started(&mut self, at: Ticks) {
        if self.start_time.is_none() {
            self.start_time = Some(at);
            self.state = ProcessState::Running;
        }
    }

    /// Records the completion time of the process.
    ///
    /// Fails if the process still has work left or has already finished.
    pub fn mark_finished(&mut self, at: Ticks) -> Result<()> {
        if self.remaining_time != 0 {
            return Err(SchedulerError::PreconditionViolation(format!(
                "{} cannot finish with {} units remaining",
                self.pid, self.remaining_time
            )));
        }
        if let Some(end) = self.end_time {
            return Err(SchedulerError::PreconditionViolation(format!(
                "{} already finished at {end}",
                self.pid
            )));
        }

        self.end_time = Some(at);
        self.state = ProcessState::Finished;
        Ok(())
    }

    /// Runs the process for at most `quantum` units starting at `at` and
    /// returns how many units were executed.
    pub fn run_slice(&mut self, quantum: NonZeroU64, at: Ticks) -> Ticks {
        self.mark_started(at);

        let executed = quantum.get().min(self.remaining_time);
        self.remaining_time -= executed;
        executed
    }

    pub fn is_finished(&self) -> bool {
        self.remaining_time == 0
    }
}

impl Process for ProcessRecord {
    fn pid(&self) -> Pid {
        self.pid
    }

    fn state(&self) -> ProcessState {
        self.state
    }

    fn arrival_time(&self) -> Ticks {
        self.arrival_time
    }

    fn start_time(&self) -> Option<Ticks> {
        self.start_time
    }

    fn end_time(&self) -> Option<Ticks> {
        self.end_time
    }

    fn total_execution_time(&self) -> Ticks {
        self.total_execution_time
    }

    fn remaining_time(&self) -> Ticks {
        self.remaining_time
    }
}

/// Builds one process per execution time, numbered `p1`, `p2`, ... and
/// arriving at 0, 1, 2, ... in the order given.
pub fn sequential(execution_times: &[Ticks]) -> Result<Vec<ProcessRecord>> {
    if execution_times.is_empty() {
        return Err(SchedulerError::InvalidArgument(
            "at least one process is required".to_string(),
        ));
    }

    execution_times
        .iter()
        .enumerate()
        .map(|(index, &time)| ProcessRecord::new(Pid::from_index(index), time, index as Ticks))
        .collect()
}
