use std::collections::BTreeSet;

use crate::{error::SimulationError, process::Process};

/// Sorts by arrival time, ties by ascending pid.
pub fn sort_processes_by_arrival(processes: &mut [Process]) {
    processes.sort_by_key(|process| (process.arrival_time(), process.pid()));
}

pub fn is_sorted_by_arrival(processes: &[Process]) -> bool {
    processes.windows(2).all(|pair| {
        (pair[0].arrival_time(), pair[0].pid()) <= (pair[1].arrival_time(), pair[1].pid())
    })
}

/// Checks a workload before any tick runs: non-empty, positive bursts,
/// non-negative arrivals, unique pids.
pub fn validate_processes(processes: &[Process]) -> Result<(), SimulationError> {
    if processes.is_empty() {
        return Err(SimulationError::EmptyWorkload);
    }
    let mut pids = BTreeSet::new();
    for process in processes {
        process.validate()?;
        if !pids.insert(process.pid()) {
            return Err(SimulationError::DuplicatePid(process.pid()));
        }
    }
    Ok(())
}

/// Sum of every burst time. Fails if the sum does not fit the simulator's time type.
pub fn get_total_burst_time(processes: &[Process]) -> Result<i32, SimulationError> {
    processes
        .iter()
        .try_fold(0i32, |total, process| total.checked_add(process.burst_time()))
        .ok_or_else(|| SimulationError::InvalidWorkload("total burst time overflows".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_processes(entries: &[(i32, i32, i32)]) -> Vec<Process> {
        entries
            .iter()
            .map(|&(pid, burst_time, arrival_time)| Process::new(pid, burst_time, arrival_time, None))
            .collect()
    }

    #[test]
    fn test_sort_processes_by_arrival_normal() {
        let mut processes = create_processes(&[(3, 1, 4), (2, 1, 0), (1, 1, 4)]);
        assert!(!is_sorted_by_arrival(&processes));
        sort_processes_by_arrival(&mut processes);
        let pids: Vec<i32> = processes.iter().map(Process::pid).collect();
        assert_eq!(pids, vec![2, 1, 3]);
        assert!(is_sorted_by_arrival(&processes));
    }

    #[test]
    fn test_validate_processes_empty() {
        assert!(matches!(
            validate_processes(&[]),
            Err(SimulationError::EmptyWorkload)
        ));
    }

    #[test]
    fn test_validate_processes_duplicate_pid() {
        let processes = create_processes(&[(1, 3, 0), (2, 3, 0), (1, 2, 5)]);
        assert!(matches!(
            validate_processes(&processes),
            Err(SimulationError::DuplicatePid(1))
        ));
    }

    #[test]
    fn test_validate_processes_invalid_burst() {
        let processes = create_processes(&[(1, 3, 0), (2, -1, 0)]);
        assert!(matches!(
            validate_processes(&processes),
            Err(SimulationError::InvalidBurstTime { pid: 2, .. })
        ));
    }

    #[test]
    fn test_get_total_burst_time_normal() {
        let processes = create_processes(&[(1, 10, 0), (2, 5, 0), (3, 8, 0)]);
        assert_eq!(get_total_burst_time(&processes).unwrap(), 23);
    }

    #[test]
    fn test_get_total_burst_time_overflow() {
        let processes = create_processes(&[(1, i32::MAX, 0), (2, 1, 0)]);
        assert!(matches!(
            get_total_burst_time(&processes),
            Err(SimulationError::InvalidWorkload(_))
        ));
    }
}
