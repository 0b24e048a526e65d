use crate::{
    process::{Pid, Process},
    ready_queue::ReadyQueue,
    scheduler_policy::{RemainingTimes, SchedulerPolicy},
};

/// First come, first served. Keeps the running process; otherwise takes the queue head.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstComeFirstServed;

impl SchedulerPolicy for FirstComeFirstServed {
    fn name(&self) -> &str {
        "FCFS"
    }

    fn is_preemptive(&self) -> bool {
        false
    }

    fn decide(
        &self,
        ready_queue: &ReadyQueue,
        current_process: Option<&Process>,
        _current_runtime: i32,
        _remaining_times: &RemainingTimes,
    ) -> Option<Pid> {
        match current_process {
            Some(current) => Some(current.pid()),
            None => ready_queue.front().map(Process::pid),
        }
    }
}
