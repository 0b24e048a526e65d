use crate::{
    error::SimulationError,
    process::{Pid, Process},
    ready_queue::ReadyQueue,
    scheduler_policy::{RemainingTimes, SchedulerPolicy},
};

/// Round robin with a fixed quantum.
///
/// The running process keeps the core until it has used a whole quantum. At that
/// point the queue head takes over and the engine requeues the expired process at
/// the tail, behind anything that arrived on the same tick. With an empty queue the
/// expired process simply carries on into a fresh quantum.
#[derive(Debug, Clone, Copy)]
pub struct RoundRobin {
    time_quantum: i32,
}

impl RoundRobin {
    pub fn new(time_quantum: i32) -> Result<Self, SimulationError> {
        if time_quantum <= 0 {
            return Err(SimulationError::InvalidTimeQuantum(time_quantum));
        }
        Ok(Self { time_quantum })
    }

    pub fn time_quantum(&self) -> i32 {
        self.time_quantum
    }

    fn is_quantum_expired(&self, current_runtime: i32) -> bool {
        current_runtime > 0 && current_runtime % self.time_quantum == 0
    }
}

impl SchedulerPolicy for RoundRobin {
    fn name(&self) -> &str {
        "RR"
    }

    fn is_preemptive(&self) -> bool {
        true
    }

    fn decide(
        &self,
        ready_queue: &ReadyQueue,
        current_process: Option<&Process>,
        current_runtime: i32,
        _remaining_times: &RemainingTimes,
    ) -> Option<Pid> {
        match current_process {
            Some(current) if !self.is_quantum_expired(current_runtime) => Some(current.pid()),
            current => ready_queue
                .front()
                .or(current)
                .map(Process::pid),
        }
    }
}
