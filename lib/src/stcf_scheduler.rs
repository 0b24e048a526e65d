use crate::{
    process::{Pid, Process},
    ready_queue::ReadyQueue,
    scheduler_policy::{remaining_time_of, select_min_by_key, RemainingTimes, SchedulerPolicy},
};

/// Shortest time to completion first.
///
/// Ranks the ready processes and the running one by remaining work. The running
/// process is only displaced by a ready process with strictly less work left, so
/// an equal contender never causes a context switch.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortestTimeToCompletionFirst;

impl SchedulerPolicy for ShortestTimeToCompletionFirst {
    fn name(&self) -> &str {
        "STCF"
    }

    fn is_preemptive(&self) -> bool {
        true
    }

    fn decide(
        &self,
        ready_queue: &ReadyQueue,
        current_process: Option<&Process>,
        _current_runtime: i32,
        remaining_times: &RemainingTimes,
    ) -> Option<Pid> {
        let shortest_ready = select_min_by_key(ready_queue, |process| {
            remaining_time_of(process, remaining_times)
        });
        match (current_process, shortest_ready) {
            (Some(current), Some(ready))
                if remaining_time_of(ready, remaining_times)
                    < remaining_time_of(current, remaining_times) =>
            {
                Some(ready.pid())
            }
            (Some(current), _) => Some(current.pid()),
            (None, ready) => ready.map(Process::pid),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_remaining_times(entries: &[(Pid, i32)]) -> RemainingTimes {
        entries.iter().copied().collect()
    }

    #[test]
    fn test_stcf_preempts_for_strictly_shorter() {
        let mut ready_queue = ReadyQueue::new();
        ready_queue.push(Process::new(2, 4, 1, None)).unwrap();
        let current = Process::new(1, 8, 0, None);
        let remaining_times = create_remaining_times(&[(1, 7), (2, 4)]);
        let decision =
            ShortestTimeToCompletionFirst.decide(&ready_queue, Some(&current), 1, &remaining_times);
        assert_eq!(decision, Some(2));
    }

    #[test]
    fn test_stcf_keeps_current_on_equal() {
        let mut ready_queue = ReadyQueue::new();
        ready_queue.push(Process::new(1, 4, 1, None)).unwrap();
        let current = Process::new(2, 8, 0, None);
        let remaining_times = create_remaining_times(&[(1, 4), (2, 4)]);
        let decision =
            ShortestTimeToCompletionFirst.decide(&ready_queue, Some(&current), 4, &remaining_times);
        assert_eq!(decision, Some(2));
    }

    #[test]
    fn test_stcf_idle_core_tie_break_ascending_pid() {
        let mut ready_queue = ReadyQueue::new();
        ready_queue.push(Process::new(9, 3, 0, None)).unwrap();
        ready_queue.push(Process::new(3, 3, 0, None)).unwrap();
        ready_queue.push(Process::new(5, 6, 0, None)).unwrap();
        let remaining_times = create_remaining_times(&[(9, 3), (3, 3), (5, 6)]);
        let decision =
            ShortestTimeToCompletionFirst.decide(&ready_queue, None, 0, &remaining_times);
        assert_eq!(decision, Some(3));
    }

    #[test]
    fn test_stcf_empty() {
        let decision = ShortestTimeToCompletionFirst.decide(
            &ReadyQueue::new(),
            None,
            0,
            &RemainingTimes::new(),
        );
        assert_eq!(decision, None);
        assert!(ShortestTimeToCompletionFirst.is_preemptive());
    }
}
