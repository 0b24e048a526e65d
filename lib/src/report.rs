use getset::{CopyGetters, Getters};
use serde_derive::{Deserialize, Serialize};

use crate::{
    error::SimulationError,
    output_log::append_info_to_yaml,
    process::{Pid, Process},
    tracer::{TraceEvent, TraceExtension},
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessLog {
    pub pid: Pid,
    pub core_id: usize, // Core on which the process completed
    pub arrival_time: i32,
    pub burst_time: i32,
    pub start_time: i32,
    pub completion_time: i32,
    pub turnaround_time: i32,
    pub waiting_time: i32,
    pub response_time: i32,
}

impl ProcessLog {
    pub fn new(process: &Process, core_id: usize, completion_time: i32) -> Self {
        let turnaround_time = completion_time - process.arrival_time();
        let start_time = process.start_time().unwrap_or(completion_time);
        Self {
            pid: process.pid(),
            core_id,
            arrival_time: process.arrival_time(),
            burst_time: process.burst_time(),
            start_time,
            completion_time,
            turnaround_time,
            waiting_time: turnaround_time - process.burst_time(),
            response_time: start_time - process.arrival_time(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoreLog {
    pub core_id: usize,
    pub busy_ticks: i32,
    pub utilization: f32,
}

impl CoreLog {
    pub fn new(core_id: usize, busy_ticks: i32) -> Self {
        Self {
            core_id,
            busy_ticks,
            utilization: Default::default(),
        }
    }

    pub fn calculate_utilization(&mut self, total_time: i32) {
        self.utilization = if total_time > 0 {
            self.busy_ticks as f32 / total_time as f32
        } else {
            0.0
        };
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessorLog {
    pub average_utilization: f32,
    pub variance_utilization: f32,
    pub core_logs: Vec<CoreLog>,
}

impl ProcessorLog {
    pub fn new(core_logs: Vec<CoreLog>) -> Self {
        Self {
            average_utilization: Default::default(),
            variance_utilization: Default::default(),
            core_logs,
        }
    }

    pub fn calculate_average_utilization(&mut self) {
        if self.core_logs.is_empty() {
            return;
        }
        self.average_utilization = self
            .core_logs
            .iter()
            .map(|core_log| core_log.utilization)
            .sum::<f32>()
            / self.core_logs.len() as f32;
    }

    pub fn calculate_variance_utilization(&mut self) {
        if self.core_logs.is_empty() {
            return;
        }
        self.variance_utilization = self
            .core_logs
            .iter()
            .map(|core_log| (core_log.utilization - self.average_utilization).powi(2))
            .sum::<f32>()
            / self.core_logs.len() as f32;
    }

    pub fn calculate_cores_utilization(&mut self, total_time: i32) {
        for core_log in self.core_logs.iter_mut() {
            core_log.calculate_utilization(total_time);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Averages {
    pub waiting_time: f32,
    pub turnaround_time: f32,
    pub response_time: f32,
    pub cpu_utilization: f32,
    /// total burst / (total burst + context-switch ticks)
    pub hardware_efficiency: f32,
}

/// Everything a run produced. Built once when the tick loop ends and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Getters, CopyGetters, Serialize, Deserialize)]
pub struct Report {
    /// In completion order.
    #[getset(get = "pub")]
    individual_results: Vec<ProcessLog>,
    /// The processes handed to `run()`, terminated and stamped, in completion order.
    #[getset(get = "pub")]
    processes: Vec<Process>,
    #[getset(get = "pub")]
    averages: Averages,
    #[getset(get = "pub")]
    processor_log: ProcessorLog,
    #[getset(get = "pub")]
    structured_trace: Vec<TraceEvent>,
    #[getset(get_copy = "pub")]
    total_time: i32,
}

impl Report {
    pub(crate) fn new(
        individual_results: Vec<ProcessLog>,
        processes: Vec<Process>,
        averages: Averages,
        processor_log: ProcessorLog,
        structured_trace: Vec<TraceEvent>,
        total_time: i32,
    ) -> Self {
        Self {
            individual_results,
            processes,
            averages,
            processor_log,
            structured_trace,
            total_time,
        }
    }

    pub fn result_of(&self, pid: Pid) -> Option<&ProcessLog> {
        self.individual_results.iter().find(|result| result.pid == pid)
    }

    pub fn process(&self, pid: Pid) -> Option<&Process> {
        self.processes.iter().find(|process| process.pid() == pid)
    }

    pub fn into_processes(self) -> Vec<Process> {
        self.processes
    }

    pub fn context_switch_ticks(&self) -> usize {
        self.structured_trace.context_switch_ticks()
    }

    pub fn dump_report_to_yaml(&self, file_path: &str) -> Result<(), SimulationError> {
        let yaml = serde_yaml::to_string(self)?;
        append_info_to_yaml(file_path, &yaml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_log_new_normal() {
        let mut process = Process::new(3, 4, 2, None);
        process.execute_tick(5);
        let process_log = ProcessLog::new(&process, 1, 10);
        assert_eq!(process_log.pid, 3);
        assert_eq!(process_log.core_id, 1);
        assert_eq!(process_log.start_time, 5);
        assert_eq!(process_log.turnaround_time, 8);
        assert_eq!(process_log.waiting_time, 4);
        assert_eq!(process_log.response_time, 3);
    }

    #[test]
    fn test_processor_log_utilization() {
        let mut processor_log = ProcessorLog::new(vec![CoreLog::new(0, 6), CoreLog::new(1, 3)]);
        processor_log.calculate_cores_utilization(6);
        processor_log.calculate_average_utilization();
        processor_log.calculate_variance_utilization();
        assert_eq!(processor_log.core_logs[0].utilization, 1.0);
        assert_eq!(processor_log.core_logs[1].utilization, 0.5);
        assert_eq!(processor_log.average_utilization, 0.75);
        assert_eq!(processor_log.variance_utilization, 0.0625);
    }

    #[test]
    fn test_core_log_zero_total_time() {
        let mut core_log = CoreLog::new(0, 0);
        core_log.calculate_utilization(0);
        assert_eq!(core_log.utilization, 0.0);
    }
}
