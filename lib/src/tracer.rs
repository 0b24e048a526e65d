//! Append-only event trace of a simulation run.
use serde_derive::{Deserialize, Serialize};

use crate::{error::SimulationError, process::Pid};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    Arrival,
    Dispatch,
    ContextSwitch,
    Exec,
    Idle,
    Completion,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEvent {
    pub time: i32,
    pub event_type: EventType,
    /// `None` only for IDLE.
    pub pid: Option<Pid>,
    /// `None` only for ARRIVAL, which happens before any core is involved.
    pub core_id: Option<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct Tracer {
    events: Vec<TraceEvent>,
}

impl Tracer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one event. Events must arrive in non-decreasing time order.
    pub fn record(
        &mut self,
        time: i32,
        event_type: EventType,
        pid: Option<Pid>,
        core_id: Option<usize>,
    ) -> Result<(), SimulationError> {
        if let Some(last) = self.events.last() {
            if last.time > time {
                return Err(SimulationError::OutOfOrderEvent {
                    time,
                    last_time: last.time,
                });
            }
        }
        self.events.push(TraceEvent {
            time,
            event_type,
            pid,
            core_id,
        });
        Ok(())
    }

    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<TraceEvent> {
        self.events
    }
}

/// Queries over a recorded trace, usable on a live `Tracer` or a finished report.
pub trait TraceExtension {
    fn events_of(&self, event_type: EventType) -> Vec<&TraceEvent>;
    fn count_events(&self, event_type: EventType, pid: Pid) -> usize;
    fn exec_count(&self, pid: Pid) -> usize;
    fn dispatch_count(&self, pid: Pid) -> usize;
    fn context_switch_ticks(&self) -> usize;
}

impl TraceExtension for [TraceEvent] {
    fn events_of(&self, event_type: EventType) -> Vec<&TraceEvent> {
        self.iter()
            .filter(|event| event.event_type == event_type)
            .collect()
    }

    fn count_events(&self, event_type: EventType, pid: Pid) -> usize {
        self.iter()
            .filter(|event| event.event_type == event_type && event.pid == Some(pid))
            .count()
    }

    fn exec_count(&self, pid: Pid) -> usize {
        self.count_events(EventType::Exec, pid)
    }

    fn dispatch_count(&self, pid: Pid) -> usize {
        self.count_events(EventType::Dispatch, pid)
    }

    fn context_switch_ticks(&self) -> usize {
        self.events_of(EventType::ContextSwitch).len()
    }
}
