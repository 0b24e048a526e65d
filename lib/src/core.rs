//! This module contains the definition of the core and the process result enum
use crate::{
    core::ProcessResult::*,
    error::SimulationError,
    process::{Pid, Process, ProcessState},
};
use log::warn;

///enum to represent what a core did during one tick
///nothing to run, paying dispatch overhead, execution in progress, execution finished
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ProcessResult {
    Idle,
    ContextSwitch(Pid),
    Continue(Pid),
    Done(Pid),
}

#[derive(Debug, Clone, Default)]
pub struct Core {
    core_id: usize,
    current_process: Option<Process>,
    /// Ticks of work done by the current process since it was seated.
    current_runtime: i32,
    /// Context-switch ticks still owed before the current process may run.
    switch_remaining: i32,
    busy_ticks: i32,
}

impl Core {
    pub fn new(core_id: usize) -> Self {
        Self {
            core_id,
            ..Default::default()
        }
    }

    pub fn core_id(&self) -> usize {
        self.core_id
    }

    pub fn current_process(&self) -> Option<&Process> {
        self.current_process.as_ref()
    }

    pub fn current_runtime(&self) -> i32 {
        self.current_runtime
    }

    pub fn busy_ticks(&self) -> i32 {
        self.busy_ticks
    }

    pub fn is_idle(&self) -> bool {
        self.current_process.is_none()
    }

    pub fn is_switching(&self) -> bool {
        self.switch_remaining > 0
    }

    pub fn assign(&mut self, mut process: Process) -> Result<(), SimulationError> {
        if let Some(current) = &self.current_process {
            warn!("Core {} is already allocated to a process", self.core_id);
            return Err(SimulationError::CoreOccupied {
                core_id: self.core_id,
                pid: current.pid(),
            });
        }
        process.set_state(ProcessState::Running);
        self.current_process = Some(process);
        self.current_runtime = 0;
        self.switch_remaining = 0;
        Ok(())
    }

    /// Charges `dispatch_latency` ticks of overhead before the seated process runs.
    pub fn begin_context_switch(&mut self, dispatch_latency: i32) {
        if self.current_process.is_some() {
            self.switch_remaining = dispatch_latency.max(0);
        }
    }

    pub fn process(&mut self, current_time: i32) -> ProcessResult {
        let Some(process) = self.current_process.as_mut() else {
            return Idle;
        };
        if self.switch_remaining > 0 {
            self.switch_remaining -= 1;
            return ContextSwitch(process.pid());
        }
        self.busy_ticks += 1;
        self.current_runtime += 1;
        if process.execute_tick(current_time) {
            Done(process.pid())
        } else {
            Continue(process.pid())
        }
    }

    /// Hands back a finished process. Fails if the core is empty or the process still has work.
    pub fn release(&mut self) -> Result<Process, SimulationError> {
        match self.current_process.take() {
            Some(process) if process.is_finished() => {
                self.current_runtime = 0;
                self.switch_remaining = 0;
                Ok(process)
            }
            other => {
                self.current_process = other;
                Err(SimulationError::InvalidRelease {
                    core_id: self.core_id,
                })
            }
        }
    }

    /// Takes the current process off the core regardless of its remaining work.
    pub fn preempt(&mut self) -> Option<Process> {
        let mut process = self.current_process.take()?;
        process.set_state(ProcessState::Ready);
        self.current_runtime = 0;
        self.switch_remaining = 0;
        Some(process)
    }
}
