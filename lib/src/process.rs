//! Schedulable unit of work and its lifecycle state.
use getset::CopyGetters;
use serde_derive::{Deserialize, Serialize};

use crate::error::SimulationError;

pub type Pid = i32;

/// NEW -> READY -> RUNNING -> (READY -> RUNNING)* -> TERMINATED
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProcessState {
    #[default]
    New,
    Ready,
    Running,
    Terminated,
}

/// A process as seen by the engine.
///
/// The input fields (`pid`, `arrival_time`, `burst_time`, `priority`) are fixed at
/// construction. `remaining_time` and the completion fields are only written by the
/// engine while a run is in progress, so they are readable but not settable from
/// outside the crate.
#[derive(Debug, Clone, PartialEq, Eq, CopyGetters, Serialize, Deserialize)]
#[getset(get_copy = "pub")]
pub struct Process {
    pid: Pid,
    arrival_time: i32,
    burst_time: i32,
    /// Lower value is more urgent.
    priority: Option<i32>,
    remaining_time: i32,
    state: ProcessState,
    /// Tick of the first unit of work.
    start_time: Option<i32>,
    completion_time: Option<i32>,
    turnaround_time: Option<i32>,
    waiting_time: Option<i32>,
}

impl Process {
    pub fn new(pid: Pid, burst_time: i32, arrival_time: i32, priority: Option<i32>) -> Self {
        Self {
            pid,
            arrival_time,
            burst_time,
            priority,
            remaining_time: burst_time,
            state: ProcessState::New,
            start_time: None,
            completion_time: None,
            turnaround_time: None,
            waiting_time: None,
        }
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.burst_time <= 0 {
            return Err(SimulationError::InvalidBurstTime {
                pid: self.pid,
                burst_time: self.burst_time,
            });
        }
        if self.arrival_time < 0 {
            return Err(SimulationError::NegativeArrivalTime {
                pid: self.pid,
                arrival_time: self.arrival_time,
            });
        }
        Ok(())
    }

    pub fn is_finished(&self) -> bool {
        self.remaining_time == 0
    }

    pub(crate) fn set_state(&mut self, state: ProcessState) {
        self.state = state;
    }

    /// Consumes one tick of work. Returns true when the process has no work left.
    pub(crate) fn execute_tick(&mut self, current_time: i32) -> bool {
        if self.start_time.is_none() {
            self.start_time = Some(current_time);
        }
        self.remaining_time = (self.remaining_time - 1).max(0);
        self.remaining_time == 0
    }

    pub(crate) fn complete(&mut self, completion_time: i32) {
        let turnaround_time = completion_time - self.arrival_time;
        self.completion_time = Some(completion_time);
        self.turnaround_time = Some(turnaround_time);
        self.waiting_time = Some(turnaround_time - self.burst_time);
        self.state = ProcessState::Terminated;
    }
}
