use crate::{
    process::{Pid, Process},
    ready_queue::ReadyQueue,
    scheduler_policy::{select_min_by_key, RemainingTimes, SchedulerPolicy},
};

/// Priority scheduling. Smaller values have higher priority; processes without a
/// priority rank after every process that has one.
///
/// Whether a newly ready, more urgent process displaces the running one is chosen
/// by the caller, there is no default.
#[derive(Debug, Clone, Copy)]
pub struct FixedPriorityScheduler {
    preemptive: bool,
}

impl FixedPriorityScheduler {
    pub fn new(preemptive: bool) -> Self {
        Self { preemptive }
    }
}

/// Sort key for a process priority. `None` ranks last.
pub fn priority_rank(process: &Process) -> (bool, i32) {
    match process.priority() {
        Some(priority) => (false, priority),
        None => (true, 0),
    }
}

impl SchedulerPolicy for FixedPriorityScheduler {
    fn name(&self) -> &str {
        if self.preemptive {
            "Priority (preemptive)"
        } else {
            "Priority"
        }
    }

    fn is_preemptive(&self) -> bool {
        self.preemptive
    }

    fn decide(
        &self,
        ready_queue: &ReadyQueue,
        current_process: Option<&Process>,
        _current_runtime: i32,
        _remaining_times: &RemainingTimes,
    ) -> Option<Pid> {
        let most_urgent = select_min_by_key(ready_queue, priority_rank);
        match (current_process, most_urgent) {
            (Some(current), Some(ready))
                if self.preemptive && priority_rank(ready) < priority_rank(current) =>
            {
                Some(ready.pid())
            }
            (Some(current), _) => Some(current.pid()),
            (None, ready) => ready.map(Process::pid),
        }
    }
}
