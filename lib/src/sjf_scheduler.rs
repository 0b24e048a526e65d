use crate::{
    process::{Pid, Process},
    ready_queue::ReadyQueue,
    scheduler_policy::{select_min_by_key, RemainingTimes, SchedulerPolicy},
};

/// Non-preemptive shortest job first, ranked by total burst time.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortestJobFirst;

impl SchedulerPolicy for ShortestJobFirst {
    fn name(&self) -> &str {
        "SJF"
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
        if let Some(current) = current_process {
            return Some(current.pid());
        }
        select_min_by_key(ready_queue, Process::burst_time).map(Process::pid)
    }
}
