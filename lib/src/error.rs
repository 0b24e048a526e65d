//! Error type shared by every stage of a simulation run.

use std::path::PathBuf;
use thiserror::Error;

use crate::process::Pid;

#[derive(Debug, Error)]
pub enum SimulationError {
    /// The workload handed to the engine contains no process.
    #[error("Process list is empty")]
    EmptyWorkload,

    #[error("Process {pid} has a non-positive burst time: {burst_time}")]
    InvalidBurstTime { pid: Pid, burst_time: i32 },

    #[error("Process {pid} has a negative arrival time: {arrival_time}")]
    NegativeArrivalTime { pid: Pid, arrival_time: i32 },

    #[error("Duplicate pid in workload: {0}")]
    DuplicatePid(Pid),

    #[error("Dispatch latency cannot be negative: {0}")]
    NegativeDispatchLatency(i32),

    #[error("At least one core is required")]
    NoCores,

    #[error("Duplicate core id: {0}")]
    DuplicateCoreId(usize),

    #[error("No core at index {0}")]
    UnknownCore(usize),

    #[error("Time quantum must be greater than 0, got {0}")]
    InvalidTimeQuantum(i32),

    /// `assign()` on a core that already owns a process.
    #[error("Core {core_id} is already occupied by process {pid}")]
    CoreOccupied { core_id: usize, pid: Pid },

    /// `release()` on a core that is empty or whose process still has work left.
    #[error("Core {core_id} cannot be released")]
    InvalidRelease { core_id: usize },

    /// A process without remaining work was pushed into the ready queue.
    #[error("Process {0} has no remaining work and cannot be queued")]
    ExhaustedProcess(Pid),

    #[error("Policy {policy} returned an ineligible process {pid}: {reason}")]
    PolicyViolation {
        policy: String,
        pid: Pid,
        reason: String,
    },

    #[error("Completion of process {0} was recorded twice")]
    DuplicateCompletion(Pid),

    #[error("Trace event at time {time} recorded after an event at time {last_time}")]
    OutOfOrderEvent { time: i32, last_time: i32 },

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Invalid workload: {0}")]
    InvalidWorkload(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
