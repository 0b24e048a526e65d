//! Dispatch decision interface shared by the built-in and user-supplied policies.
use std::collections::BTreeMap;

use crate::{
    process::{Pid, Process},
    ready_queue::ReadyQueue,
};

/// Remaining work of every admitted, unfinished process keyed by pid.
pub type RemainingTimes = BTreeMap<Pid, i32>;

/// A pure dispatch decision.
///
/// # Contract
///
/// `decide` is called once per tick per core whenever a decision is needed: every tick
/// for preemptive policies, and only when the core holds no process for non-preemptive
/// ones. It must return either `None` (the core stays idle this tick, and a running
/// process is sent back to the ready queue) or the pid of a process that is in
/// `ready_queue` or is `current_process`.
///
/// The policy never mutates anything. The engine performs the queue and core changes
/// that follow from the returned pid, and a pid outside the contract aborts the run.
pub trait SchedulerPolicy {
    fn name(&self) -> &str;

    fn is_preemptive(&self) -> bool;

    fn decide(
        &self,
        ready_queue: &ReadyQueue,
        current_process: Option<&Process>,
        current_runtime: i32,
        remaining_times: &RemainingTimes,
    ) -> Option<Pid>;
}

impl<P: SchedulerPolicy + ?Sized> SchedulerPolicy for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn is_preemptive(&self) -> bool {
        (**self).is_preemptive()
    }

    fn decide(
        &self,
        ready_queue: &ReadyQueue,
        current_process: Option<&Process>,
        current_runtime: i32,
        remaining_times: &RemainingTimes,
    ) -> Option<Pid> {
        (**self).decide(
            ready_queue,
            current_process,
            current_runtime,
            remaining_times,
        )
    }
}

/// Remaining work of `process`, preferring the engine's snapshot.
pub fn remaining_time_of(process: &Process, remaining_times: &RemainingTimes) -> i32 {
    remaining_times
        .get(&process.pid())
        .copied()
        .unwrap_or_else(|| process.remaining_time())
}

/// Ready process with the smallest key, ties broken by ascending pid.
pub fn select_min_by_key<K, F>(ready_queue: &ReadyQueue, key: F) -> Option<&Process>
where
    K: Ord,
    F: Fn(&Process) -> K,
{
    ready_queue
        .iter()
        .min_by_key(|process| (key(process), process.pid()))
}
