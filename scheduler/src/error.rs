use thiserror::Error;

use crate::Pid;

/// Errors raised by the process model and the schedulers.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchedulerError {
    /// The caller supplied a workload or quantum the simulation cannot run.
    ///
    /// Raised before any process state is touched.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A process record was used out of order, e.g. finished while it still
    /// had work left or queried before its timestamps were set.
    #[error("Precondition violated: {0}")]
    PreconditionViolation(String),

    /// Utilization of a process that started and finished on the same tick.
    #[error("Division by zero: process {0} has no elapsed time")]
    DivisionByZero(Pid),
}

pub type Result<T> = std::result::Result<T, SchedulerError>;
