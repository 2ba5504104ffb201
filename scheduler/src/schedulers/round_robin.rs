use std::num::NonZeroU64;

use log::{debug, info};

use crate::error::{Result, SchedulerError};
use crate::process::ProcessRecord;
use crate::ProcessState::New;
use crate::SchedulingDecision::{Done, Run};
use crate::{Process, Scheduler, SchedulingDecision, Ticks};

/// Round-robin over a fixed set of processes.
///
/// Every round visits the processes in creation order and grants each
/// unfinished one a single slice of at most `quantum` units. The clock only
/// moves by the amount actually executed, so no time is lost between slices.
/// Arrival times are not used for gating: every process is eligible from
/// clock 0.
pub struct RoundRobin {
    processes: Vec<ProcessRecord>,
    // Indices into `processes`, in completion order
    completed: Vec<usize>,
    quantum: NonZeroU64,
    clock: Ticks,
    cursor: usize,
    round: usize,
}

impl RoundRobin {
    /// Checks the workload and the quantum before anything runs.
    ///
    /// * `processes` - at least one process, none of which has run yet
    /// * `quantum` - the maximum slice a process gets per round, greater than 0
    pub fn new(processes: Vec<ProcessRecord>, quantum: Ticks) -> Result<Self> {
        let quantum = NonZeroU64::new(quantum).ok_or_else(|| {
            SchedulerError::InvalidArgument("quantum size must be positive".to_string())
        })?;

        if processes.is_empty() {
            return Err(SchedulerError::InvalidArgument(
                "at least one process is required".to_string(),
            ));
        }

        if let Some(process) = processes
            .iter()
            .find(|p| p.state() != New || p.remaining_time() != p.total_execution_time())
        {
            return Err(SchedulerError::InvalidArgument(format!(
                "{} has already been scheduled",
                process.pid()
            )));
        }

        // The clock ends at the total work, which must fit in `Ticks`
        processes
            .iter()
            .try_fold(0 as Ticks, |total, p| {
                total.checked_add(p.total_execution_time())
            })
            .ok_or_else(|| {
                SchedulerError::InvalidArgument(
                    "total execution time exceeds the clock range".to_string(),
                )
            })?;

        info!(
            "Round-robin scheduler initialized: processes={}, quantum={}",
            processes.len(),
            quantum
        );

        Ok(RoundRobin {
            completed: Vec::with_capacity(processes.len()),
            processes,
            quantum,
            clock: 0,
            cursor: 0,
            round: 0,
        })
    }

    /// Runs every process to completion.
    ///
    /// Returns the processes in the order they finished.
    pub fn run(mut self) -> Vec<ProcessRecord> {
        while self.next() != Done {}
        self.into_completed()
    }

    /// Consumes the scheduler, returning the finished processes in completion
    /// order. Unfinished processes are dropped.
    pub fn into_completed(self) -> Vec<ProcessRecord> {
        let mut slots = self.processes.into_iter().map(Some).collect::<Vec<_>>();
        self.completed
            .iter()
            .filter_map(|&index| slots[index].take())
            .collect()
    }

    /// The number of rounds started so far.
    pub fn round(&self) -> usize {
        self.round
    }

    fn is_done(&self) -> bool {
        self.completed.len() == self.processes.len()
    }
}

impl Scheduler for RoundRobin {
    fn next(&mut self) -> SchedulingDecision {
        if self.is_done() {
            return Done;
        }

        // At least one process is unfinished, so this stops within one pass
        let index = loop {
            if self.cursor == self.processes.len() {
                self.cursor = 0;
            }
            if self.cursor == 0 {
                self.round += 1;
                debug!("Round {} started at {}", self.round, self.clock);
            }

            let index = self.cursor;
            self.cursor += 1;
            if !self.processes[index].is_finished() {
                break index;
            }
        };

        let at = self.clock;
        let process = &mut self.processes[index];
        let executed = process.run_slice(self.quantum, at);
        self.clock += executed;

        let pid = process.pid();
        debug!(
            "Ran {} for {} units at {}, {} remaining",
            pid,
            executed,
            at,
            process.remaining_time()
        );

        if process.is_finished() {
            let finished = process.mark_finished(self.clock);
            assert!(finished.is_ok(), "{finished:?}");
            self.completed.push(index);
            info!("{} finished at {}", pid, self.clock);
        }

        Run {
            round: self.round,
            pid,
            at,
            executed,
        }
    }

    fn clock(&self) -> Ticks {
        self.clock
    }

    fn list(&self) -> Vec<&dyn Process> {
        self.processes.iter().map(|p| p as &dyn Process).collect()
    }

    fn completed(&self) -> Vec<&dyn Process> {
        self.completed
            .iter()
            .map(|&index| &self.processes[index] as &dyn Process)
            .collect()
    }
}
