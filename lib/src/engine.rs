//! Tick-driven simulation engine.
//!
//! Each tick runs four steps in a fixed order:
//!
//! 1. Admission: every pending process with `arrival_time <= time` joins the ready queue.
//! 2. Dispatch: each core, in ascending `core_id` order, consults the policy and the
//!    engine applies the decision. Seating a different process costs `dispatch_latency`
//!    ticks of context switch before it may run.
//! 3. Execution: each core either pays switch overhead, runs its process for one tick,
//!    or idles. A process with no work left is released and its metrics recorded.
//! 4. The clock advances.
//!
//! The loop stops once nothing is pending, queued or seated. `TickLoop` lets a caller
//! replace the per-tick procedure while keeping the clock, tracer and statistics.
use std::collections::VecDeque;

use log::{debug, info};

use crate::{
    clock::Clock,
    config::SimulationConfig,
    core::{Core, ProcessResult},
    error::SimulationError,
    homogeneous::HomogeneousProcessor,
    process::{Process, ProcessState},
    ready_queue::ReadyQueue,
    report::Report,
    scheduler_creator::create_policy,
    scheduler_policy::{RemainingTimes, SchedulerPolicy},
    stats_collector::StatsCollector,
    tracer::{EventType, Tracer},
    util::{get_total_burst_time, sort_processes_by_arrival, validate_processes},
};

/// Mutable state of one run. Created when `run()` starts and consumed into the report.
#[derive(Debug)]
pub struct SimulationState {
    clock: Clock,
    processor: HomogeneousProcessor,
    ready_queue: ReadyQueue,
    tracer: Tracer,
    stats: StatsCollector,
    arrivals: VecDeque<Process>,
}

impl SimulationState {
    pub fn new(mut processes: Vec<Process>, processor: HomogeneousProcessor) -> Self {
        sort_processes_by_arrival(&mut processes);
        Self {
            clock: Clock::new(),
            processor,
            ready_queue: ReadyQueue::new(),
            tracer: Tracer::new(),
            stats: StatsCollector::new(),
            arrivals: processes.into(),
        }
    }

    pub fn time(&self) -> i32 {
        self.clock.time()
    }

    pub fn processor(&self) -> &HomogeneousProcessor {
        &self.processor
    }

    pub fn ready_queue(&self) -> &ReadyQueue {
        &self.ready_queue
    }

    pub fn tracer(&self) -> &Tracer {
        &self.tracer
    }

    pub fn stats(&self) -> &StatsCollector {
        &self.stats
    }

    pub fn pending_arrivals(&self) -> usize {
        self.arrivals.len()
    }

    pub fn is_finished(&self) -> bool {
        self.arrivals.is_empty() && self.ready_queue.is_empty() && self.processor.is_idle()
    }

    /// Remaining work of every process that is queued or seated on a core.
    pub fn remaining_times(&self) -> RemainingTimes {
        self.ready_queue
            .iter()
            .chain(
                self.processor
                    .cores()
                    .iter()
                    .filter_map(Core::current_process),
            )
            .map(|process| (process.pid(), process.remaining_time()))
            .collect()
    }

    /// Moves every arrived process into the ready queue. Returns how many were admitted.
    pub fn admit(&mut self) -> Result<usize, SimulationError> {
        let current_time = self.clock.time();
        let mut admitted = 0;
        while matches!(self.arrivals.front(), Some(process) if process.arrival_time() <= current_time)
        {
            let Some(process) = self.arrivals.pop_front() else {
                break;
            };
            let pid = process.pid();
            self.ready_queue.push(process)?;
            self.tracer
                .record(current_time, EventType::Arrival, Some(pid), None)?;
            admitted += 1;
        }
        Ok(admitted)
    }

    /// Asks `policy` what the core at `core_index` should run and applies the answer.
    pub fn dispatch(
        &mut self,
        core_index: usize,
        policy: &dyn SchedulerPolicy,
        dispatch_latency: i32,
    ) -> Result<(), SimulationError> {
        let current_time = self.clock.time();
        let remaining_times = self.remaining_times();
        let core = self.processor.core(core_index)?;
        if core.is_switching() {
            return Ok(());
        }
        let core_id = core.core_id();
        let current_pid = core.current_process().map(Process::pid);
        if current_pid.is_some() && !policy.is_preemptive() {
            return Ok(());
        }

        let decision = policy.decide(
            &self.ready_queue,
            core.current_process(),
            core.current_runtime(),
            &remaining_times,
        );

        match decision {
            None => {
                if let Some(preempted) = self.processor.core_mut(core_index)?.preempt() {
                    debug!(
                        "time {}: core {} left idle, process {} requeued",
                        current_time,
                        core_id,
                        preempted.pid()
                    );
                    self.ready_queue.push(preempted)?;
                }
            }
            Some(pid) if Some(pid) == current_pid => {}
            Some(pid) => {
                let next = self.ready_queue.extract(pid).ok_or_else(|| {
                    SimulationError::PolicyViolation {
                        policy: policy.name().to_string(),
                        pid,
                        reason: format!(
                            "not in the ready queue and not running on core {}",
                            core_id
                        ),
                    }
                })?;
                if next.remaining_time() <= 0 {
                    return Err(SimulationError::PolicyViolation {
                        policy: policy.name().to_string(),
                        pid,
                        reason: "no remaining work".to_string(),
                    });
                }

                let core = self.processor.core_mut(core_index)?;
                if let Some(preempted) = core.preempt() {
                    debug!(
                        "time {}: process {} preempted by {} on core {}",
                        current_time,
                        preempted.pid(),
                        pid,
                        core_id
                    );
                    self.ready_queue.push(preempted)?;
                }
                core.assign(next)?;
                core.begin_context_switch(dispatch_latency);
                debug!(
                    "time {}: process {} dispatched on core {}",
                    current_time, pid, core_id
                );
                self.tracer
                    .record(current_time, EventType::Dispatch, Some(pid), Some(core_id))?;
            }
        }
        Ok(())
    }

    /// Runs one tick on the core at `core_index` and records what happened.
    pub fn execute(&mut self, core_index: usize) -> Result<(), SimulationError> {
        let current_time = self.clock.time();
        let core = self.processor.core_mut(core_index)?;
        let core_id = core.core_id();
        match core.process(current_time) {
            ProcessResult::Idle => {
                self.tracer
                    .record(current_time, EventType::Idle, None, Some(core_id))?;
            }
            ProcessResult::ContextSwitch(pid) => {
                self.tracer
                    .record(current_time, EventType::ContextSwitch, Some(pid), Some(core_id))?;
            }
            ProcessResult::Continue(pid) => {
                self.tracer
                    .record(current_time, EventType::Exec, Some(pid), Some(core_id))?;
            }
            ProcessResult::Done(pid) => {
                self.tracer
                    .record(current_time, EventType::Exec, Some(pid), Some(core_id))?;
                self.tracer
                    .record(current_time, EventType::Completion, Some(pid), Some(core_id))?;
                let mut finished = core.release()?;
                let completion_time = current_time + 1;
                finished.complete(completion_time);
                debug!(
                    "time {}: process {} completed on core {}",
                    completion_time, pid, core_id
                );
                self.stats
                    .record_completion(finished, core_id, completion_time)?;
            }
        }
        Ok(())
    }

    pub fn advance_clock(&mut self) -> i32 {
        self.clock.tick()
    }

    pub fn into_report(self, total_burst: i32) -> Report {
        let total_time = self.clock.time();
        self.stats
            .generate_report(total_time, total_burst, self.processor.cores(), self.tracer)
    }
}

/// One step of the simulation loop.
pub trait TickLoop {
    fn tick(
        &self,
        state: &mut SimulationState,
        policy: &dyn SchedulerPolicy,
        dispatch_latency: i32,
    ) -> Result<(), SimulationError>;
}

/// Admission, dispatch, execution, clock advance.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTickLoop;

impl TickLoop for DefaultTickLoop {
    fn tick(
        &self,
        state: &mut SimulationState,
        policy: &dyn SchedulerPolicy,
        dispatch_latency: i32,
    ) -> Result<(), SimulationError> {
        state.admit()?;
        let number_of_cores = state.processor().get_number_of_cores();
        for core_index in 0..number_of_cores {
            state.dispatch(core_index, policy, dispatch_latency)?;
        }
        for core_index in 0..number_of_cores {
            state.execute(core_index)?;
        }
        state.advance_clock();
        Ok(())
    }
}

pub struct Engine<P, L = DefaultTickLoop>
where
    P: SchedulerPolicy,
    L: TickLoop,
{
    policy: P,
    dispatch_latency: i32,
    core_ids: Vec<usize>,
    tick_loop: L,
}

impl<P: SchedulerPolicy> Engine<P> {
    /// One core, no dispatch latency.
    pub fn new(policy: P) -> Self {
        Self {
            policy,
            dispatch_latency: 0,
            core_ids: vec![0],
            tick_loop: DefaultTickLoop,
        }
    }
}

impl Engine<Box<dyn SchedulerPolicy>> {
    pub fn from_config(config: &SimulationConfig) -> Result<Self, SimulationError> {
        let policy = create_policy(&config.policy)?;
        Ok(Engine::new(policy)
            .with_dispatch_latency(config.dispatch_latency)
            .with_number_of_cores(config.number_of_cores))
    }
}

impl<P, L> Engine<P, L>
where
    P: SchedulerPolicy,
    L: TickLoop,
{
    pub fn with_dispatch_latency(mut self, dispatch_latency: i32) -> Self {
        self.dispatch_latency = dispatch_latency;
        self
    }

    pub fn with_number_of_cores(mut self, number_of_cores: usize) -> Self {
        self.core_ids = (0..number_of_cores).collect();
        self
    }

    /// Uses the ids of `cores` as the core layout. The cores themselves are recreated
    /// for every run, so their counters never leak between runs.
    pub fn with_cores(mut self, cores: &[Core]) -> Self {
        self.core_ids = cores.iter().map(Core::core_id).collect();
        self
    }

    pub fn with_tick_loop<T: TickLoop>(self, tick_loop: T) -> Engine<P, T> {
        Engine {
            policy: self.policy,
            dispatch_latency: self.dispatch_latency,
            core_ids: self.core_ids,
            tick_loop,
        }
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn dispatch_latency(&self) -> i32 {
        self.dispatch_latency
    }

    /// Simulates `processes` to completion.
    ///
    /// Input is validated before the first tick. A contract violation by the policy
    /// or by a custom tick loop aborts the run with no report.
    pub fn run(&self, processes: Vec<Process>) -> Result<Report, SimulationError> {
        if self.dispatch_latency < 0 {
            return Err(SimulationError::NegativeDispatchLatency(
                self.dispatch_latency,
            ));
        }
        let processor = HomogeneousProcessor::from_cores(
            self.core_ids.iter().copied().map(Core::new).collect(),
        )?;
        validate_processes(&processes)?;
        if let Some(process) = processes
            .iter()
            .find(|process| process.state() != ProcessState::New)
        {
            return Err(SimulationError::InvalidWorkload(format!(
                "process {} has already been scheduled",
                process.pid()
            )));
        }

        let total_burst = get_total_burst_time(&processes)?;
        info!(
            "Simulation started: policy={}, processes={}, cores={}, dispatch_latency={}",
            self.policy.name(),
            processes.len(),
            processor.get_number_of_cores(),
            self.dispatch_latency
        );

        let mut state = SimulationState::new(processes, processor);
        while !state.is_finished() {
            self.tick_loop
                .tick(&mut state, &self.policy, self.dispatch_latency)?;
        }

        let report = state.into_report(total_burst);
        info!(
            "Simulation finished: total_time={}, average waiting time={:.2}, average turnaround time={:.2}",
            report.total_time(),
            report.averages().waiting_time,
            report.averages().turnaround_time
        );
        Ok(report)
    }
}
