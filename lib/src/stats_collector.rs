use std::collections::BTreeSet;

use crate::{
    core::Core,
    error::SimulationError,
    process::{Pid, Process},
    report::{Averages, CoreLog, ProcessLog, ProcessorLog, Report},
    tracer::{TraceExtension, Tracer},
};

/// Accumulates per-process results during a run and turns them into a `Report`.
#[derive(Debug, Clone, Default)]
pub struct StatsCollector {
    process_logs: Vec<ProcessLog>,
    finished_processes: Vec<Process>,
    completed_pids: BTreeSet<Pid>,
}

impl StatsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes ownership of a finished process and stores its metrics. Each pid may
    /// complete only once.
    pub fn record_completion(
        &mut self,
        process: Process,
        core_id: usize,
        completion_time: i32,
    ) -> Result<(), SimulationError> {
        if !self.completed_pids.insert(process.pid()) {
            return Err(SimulationError::DuplicateCompletion(process.pid()));
        }
        self.process_logs
            .push(ProcessLog::new(&process, core_id, completion_time));
        self.finished_processes.push(process);
        Ok(())
    }

    pub fn completed_count(&self) -> usize {
        self.process_logs.len()
    }

    pub fn generate_report(
        self,
        total_time: i32,
        total_burst: i32,
        cores: &[Core],
        tracer: Tracer,
    ) -> Report {
        let mut processor_log = ProcessorLog::new(
            cores
                .iter()
                .map(|core| CoreLog::new(core.core_id(), core.busy_ticks()))
                .collect(),
        );
        processor_log.calculate_cores_utilization(total_time);
        processor_log.calculate_average_utilization();
        processor_log.calculate_variance_utilization();

        let context_switch_ticks = tracer.events().context_switch_ticks() as f64;
        let useful_ticks = f64::from(total_burst);
        let hardware_efficiency = if useful_ticks + context_switch_ticks > 0.0 {
            (useful_ticks / (useful_ticks + context_switch_ticks)) as f32
        } else {
            1.0
        };

        let averages = Averages {
            waiting_time: self.mean_of(|log| log.waiting_time),
            turnaround_time: self.mean_of(|log| log.turnaround_time),
            response_time: self.mean_of(|log| log.response_time),
            cpu_utilization: processor_log.average_utilization,
            hardware_efficiency,
        };

        Report::new(
            self.process_logs,
            self.finished_processes,
            averages,
            processor_log,
            tracer.into_events(),
            total_time,
        )
    }

    fn mean_of<F>(&self, metric: F) -> f32
    where
        F: Fn(&ProcessLog) -> i32,
    {
        if self.process_logs.is_empty() {
            return 0.0;
        }
        let total: i64 = self
            .process_logs
            .iter()
            .map(|log| i64::from(metric(log)))
            .sum();
        (total as f64 / self.process_logs.len() as f64) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracer::EventType;

    fn create_finished_process(pid: Pid, burst_time: i32, arrival_time: i32, start: i32) -> Process {
        let mut process = Process::new(pid, burst_time, arrival_time, None);
        for time in start..start + burst_time {
            process.execute_tick(time);
        }
        process
    }

    #[test]
    fn test_record_completion_twice() {
        let mut stats = StatsCollector::new();
        let process = create_finished_process(1, 2, 0, 0);
        stats.record_completion(process.clone(), 0, 2).unwrap();
        assert!(matches!(
            stats.record_completion(process, 0, 2),
            Err(SimulationError::DuplicateCompletion(1))
        ));
        assert_eq!(stats.completed_count(), 1);
    }

    #[test]
    fn test_generate_report_averages() {
        let mut stats = StatsCollector::new();
        stats
            .record_completion(create_finished_process(1, 3, 0, 1), 0, 4)
            .unwrap();
        stats
            .record_completion(create_finished_process(2, 2, 1, 5), 0, 7)
            .unwrap();

        let mut tracer = Tracer::new();
        tracer.record(0, EventType::ContextSwitch, Some(1), Some(0)).unwrap();
        tracer.record(4, EventType::ContextSwitch, Some(2), Some(0)).unwrap();

        let mut core = Core::new(0);
        core.assign(Process::new(1, 5, 0, None)).unwrap();
        for time in 0..5 {
            core.process(time);
        }
        core.release().unwrap();

        let report = stats.generate_report(7, 5, &[core], tracer);
        assert_eq!(report.total_time(), 7);
        assert_eq!(report.individual_results().len(), 2);
        // turnaround 4 and 6, waiting 1 and 4, response 1 and 4
        assert_eq!(report.averages().turnaround_time, 5.0);
        assert_eq!(report.averages().waiting_time, 2.5);
        assert_eq!(report.averages().response_time, 2.5);
        assert_eq!(report.averages().hardware_efficiency, 5.0 / 7.0);
        assert_eq!(report.processor_log().core_logs[0].busy_ticks, 5);
        assert_eq!(report.averages().cpu_utilization, 5.0 / 7.0);
        assert_eq!(report.context_switch_ticks(), 2);
    }
}
