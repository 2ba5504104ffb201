//! A processor simulation library
//!
//! This is used for driving the schedulers from the [`scheduler`] crate
//! one slice at a time and for formatting what they did.

use std::collections::HashMap;
use std::fmt::{self, Display, Write};

use log::{debug, trace};
use scheduler::{Pid, Process, ProcessState, Scheduler, SchedulingDecision, Ticks};

/// Running iteration log
#[derive(Debug, PartialEq)]
pub struct Log {
    /// The action taken by the scheduler.
    pub decision: SchedulingDecision,

    /// The simulated clock after the decision.
    pub clock: Ticks,

    /// The list of processes and their corresponding states
    /// returned by the scheduler.
    pub processes: HashMap<Pid, ProcessInfo>,
}

impl Log {
    fn new(
        decision: SchedulingDecision,
        clock: Ticks,
        processes: HashMap<Pid, ProcessInfo>,
    ) -> Log {
        Log {
            decision,
            clock,
            processes,
        }
    }
}

impl Display for Log {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.decision)?;
        writeln!(f, "Clock: {}", self.clock)?;
        writeln!(f, "PID\tSTATE\t\tARRIVAL\tTOTAL\tREMAIN\tSTART\tEND")?;
        let mut pids = self.processes.keys().collect::<Vec<&Pid>>();
        pids.sort();
        for pid in pids {
            if let Some(info) = self.processes.get(pid) {
                writeln!(f, "{}", info)?;
            }
        }
        writeln!(f)
    }
}

/// Information about a process state.
#[derive(Debug, PartialEq)]
pub struct ProcessInfo {
    /// The PID of the process.
    pub pid: Pid,

    /// The process state.
    pub state: ProcessState,

    pub arrival_time: Ticks,

    pub total_execution_time: Ticks,

    pub remaining_time: Ticks,

    pub start_time: Option<Ticks>,

    pub end_time: Option<Ticks>,
}

impl ProcessInfo {
    fn new(process: &dyn Process) -> ProcessInfo {
        ProcessInfo {
            pid: process.pid(),
            state: process.state(),
            arrival_time: process.arrival_time(),
            total_execution_time: process.total_execution_time(),
            remaining_time: process.remaining_time(),
            start_time: process.start_time(),
            end_time: process.end_time(),
        }
    }
}

impl Display for ProcessInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\t{}\t\t{}\t{}\t{}\t{}\t{}",
            self.pid,
            self.state,
            self.arrival_time,
            self.total_execution_time,
            self.remaining_time,
            OrDash(self.start_time),
            OrDash(self.end_time)
        )
    }
}

struct OrDash<T>(Option<T>);

impl<T: Display> Display for OrDash<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            Some(value) => write!(f, "{value}"),
            None => write!(f, "-"),
        }
    }
}

/// The processor simulator.
pub struct Processor<'s, S: Scheduler> {
    scheduler: &'s mut S,
    logs: Vec<Log>,
}

impl<'s, S: Scheduler> Processor<'s, S> {
    /// Runs the scheduler until it has nothing left to schedule.
    ///
    /// Returns one [`Log`] per decision, the last one being
    /// [`SchedulingDecision::Done`]. The finished processes can be read back
    /// from the scheduler afterwards.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use processor::Processor;
    /// use scheduler::{round_robin, sequential, Scheduler};
    ///
    /// let mut scheduler = round_robin(sequential(&[6, 4, 2]).unwrap(), 3).unwrap();
    /// let logs = Processor::run(&mut scheduler);
    ///
    /// assert_eq!(logs.len(), 6);
    /// assert_eq!(scheduler.clock(), 12);
    /// ```
    pub fn run(scheduler: &'s mut S) -> Vec<Log> {
        let mut processor = Processor {
            scheduler,
            logs: vec![],
        };
        while processor.step() {}
        processor.logs
    }

    fn step(&mut self) -> bool {
        let next = self.scheduler.next();
        let clock = self.scheduler.clock();
        let process_map = self
            .scheduler
            .list()
            .into_iter()
            .map(|process| (process.pid(), ProcessInfo::new(process)))
            .collect();
        self.logs.push(Log::new(next, clock, process_map));

        match next {
            SchedulingDecision::Run { .. } => {
                trace!("{next}");
                true
            }
            SchedulingDecision::Done => {
                debug!("DONE at {clock}");
                false
            }
        }
    }
}

/// Format the [`Processor`]'s logs to a [`String`].
///
/// * `logs` - the logs returned by the [`Processor`].
pub fn format_logs(logs: &[Log]) -> String {
    let mut s = String::new();
    for (iteration, log) in logs.iter().enumerate() {
        // Writing to a String does not fail
        let _ = write!(s, "===== Iteration: {} =====\n{}\n", iteration + 1, log);
    }
    s
}

/// Format the timing report of the finished processes, in the given order.
///
/// ## Example
///
/// ```rust
/// use processor::format_report;
/// use scheduler::{run, sequential, Process};
///
/// let completed = run(sequential(&[2]).unwrap(), 3).unwrap();
/// let processes = completed.iter().map(|p| p as &dyn Process).collect::<Vec<_>>();
///
/// assert!(format_report(&processes).starts_with("Process ID: p1\n"));
/// ```
pub fn format_report(processes: &[&dyn Process]) -> String {
    let mut s = String::new();
    for process in processes {
        let _ = write_report(&mut s, *process);
    }
    s
}

fn write_report(s: &mut String, process: &dyn Process) -> fmt::Result {
    writeln!(s, "Process ID: {}", process.pid())?;
    writeln!(s, "Arrival Time: {}", process.arrival_time())?;
    writeln!(s, "Start Time: {}", OrDash(process.start_time()))?;
    writeln!(s, "End Time: {}", OrDash(process.end_time()))?;
    match process.turnaround_time() {
        Ok(time) => writeln!(s, "Turnaround Time: {time}")?,
        Err(_) => writeln!(s, "Turnaround Time: n/a")?,
    }
    match process.wait_time() {
        Ok(time) => writeln!(s, "Wait Time: {time}")?,
        Err(_) => writeln!(s, "Wait Time: n/a")?,
    }
    match process.utilization() {
        Ok(utilization) => writeln!(s, "Utilization: {utilization:.2}")?,
        Err(_) => writeln!(s, "Utilization: n/a")?,
    }
    writeln!(s, "------------------------------")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use scheduler::{round_robin, sequential, ProcessRecord};

    #[test]
    fn test_logs_end_with_done() {
        let mut scheduler = round_robin(sequential(&[6, 4, 2]).unwrap(), 3).unwrap();
        let logs = Processor::run(&mut scheduler);

        assert_eq!(logs.len(), 6);
        assert_eq!(logs.last().unwrap().decision, SchedulingDecision::Done);
        assert_eq!(logs.last().unwrap().clock, 12);
        assert!(logs
            .last()
            .unwrap()
            .processes
            .values()
            .all(|info| info.state == ProcessState::Finished));
    }

    #[test]
    fn test_snapshot_after_decision() {
        let mut scheduler = round_robin(sequential(&[6, 4, 2]).unwrap(), 3).unwrap();
        let logs = Processor::run(&mut scheduler);

        let p3 = &logs[2].processes[&Pid::new(3).unwrap()];
        assert_eq!(logs[2].clock, 8);
        assert_eq!(p3.state, ProcessState::Finished);
        assert_eq!(p3.start_time, Some(6));
        assert_eq!(p3.end_time, Some(8));

        let p2 = &logs[2].processes[&Pid::new(2).unwrap()];
        assert_eq!(p2.state, ProcessState::Running);
        assert_eq!(p2.remaining_time, 1);
    }

    #[test]
    fn test_format_log() {
        let mut scheduler = round_robin(sequential(&[4, 2]).unwrap(), 3).unwrap();
        let logs = Processor::run(&mut scheduler);

        assert_eq!(
            format_logs(&logs[..1]),
            "===== Iteration: 1 =====\n\
             Round 1: run p1 for 3 units at 0\n\
             Clock: 3\n\
             PID\tSTATE\t\tARRIVAL\tTOTAL\tREMAIN\tSTART\tEND\n\
             p1\tRUNNING\t\t0\t4\t1\t0\t-\n\
             p2\tNEW\t\t1\t2\t2\t-\t-\n\
             \n\n"
        );
    }

    #[test]
    fn test_format_report() {
        let mut scheduler = round_robin(sequential(&[6, 4, 2]).unwrap(), 3).unwrap();
        Processor::run(&mut scheduler);

        let report = format_report(&scheduler.completed()[..1]);
        assert_eq!(
            report,
            "Process ID: p3\n\
             Arrival Time: 2\n\
             Start Time: 6\n\
             End Time: 8\n\
             Turnaround Time: 6\n\
             Wait Time: 4\n\
             Utilization: 1.00\n\
             ------------------------------\n"
        );
    }

    #[test]
    fn test_format_report_unfinished() {
        let process = ProcessRecord::new(Pid::new(1).unwrap(), 4, 0).unwrap();

        let report = format_report(&[&process as &dyn Process]);
        assert_eq!(
            report,
            "Process ID: p1\n\
             Arrival Time: 0\n\
             Start Time: -\n\
             End Time: -\n\
             Turnaround Time: n/a\n\
             Wait Time: n/a\n\
             Utilization: n/a\n\
             ------------------------------\n"
        );
    }
}
