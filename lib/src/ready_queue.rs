//! Processes that have arrived, still have work, and are not seated on a core.
use std::collections::VecDeque;

use crate::{
    error::SimulationError,
    process::{Pid, Process, ProcessState},
};

#[derive(Debug, Clone, Default)]
pub struct ReadyQueue {
    processes: VecDeque<Process>,
}

impl ReadyQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends at the tail. Exhausted processes are rejected.
    pub fn push(&mut self, mut process: Process) -> Result<(), SimulationError> {
        if process.remaining_time() <= 0 {
            return Err(SimulationError::ExhaustedProcess(process.pid()));
        }
        process.set_state(ProcessState::Ready);
        self.processes.push_back(process);
        Ok(())
    }

    pub fn extract(&mut self, pid: Pid) -> Option<Process> {
        self.extract_by(|process| process.pid() == pid)
    }

    /// Removes and returns the first process matching `predicate`.
    pub fn extract_by<F>(&mut self, predicate: F) -> Option<Process>
    where
        F: FnMut(&Process) -> bool,
    {
        let index = self.processes.iter().position(predicate)?;
        self.processes.remove(index)
    }

    pub fn front(&self) -> Option<&Process> {
        self.processes.front()
    }

    pub fn get(&self, pid: Pid) -> Option<&Process> {
        self.processes.iter().find(|process| process.pid() == pid)
    }

    pub fn contains(&self, pid: Pid) -> bool {
        self.get(pid).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Process> {
        self.processes.iter()
    }

    pub fn pids(&self) -> Vec<Pid> {
        self.processes.iter().map(Process::pid).collect()
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }
}
