use std::fs;

use cpu_sched_sim::{
    config::{load_simulation_config, PolicyConfig},
    engine::Engine,
    error::SimulationError,
    output_log::create_scheduler_log_yaml_file,
    report::Report,
    workload_creator::create_processes_from_yaml,
};

fn completion_times(report: &Report) -> Vec<(i32, i32)> {
    report
        .individual_results()
        .iter()
        .map(|result| (result.pid, result.completion_time))
        .collect()
}

fn run_from_files(config_path: &str, workload_path: &str) -> Report {
    let _ = env_logger::builder().is_test(true).try_init();
    let config = load_simulation_config(config_path).unwrap();
    let processes = create_processes_from_yaml(workload_path).unwrap();
    Engine::from_config(&config).unwrap().run(processes).unwrap()
}

#[test]
fn test_round_robin_from_files() {
    let report = run_from_files(
        "tests/sample_configs/round_robin.yaml",
        "tests/sample_workloads/round_robin_overhead.yaml",
    );
    assert_eq!(report.total_time(), 97);
    assert_eq!(
        completion_times(&report),
        vec![(2, 54), (4, 69), (1, 77), (3, 90), (5, 97)]
    );
}

#[test]
fn test_priority_from_files() {
    let config = load_simulation_config("tests/sample_configs/priority_preemptive.yaml").unwrap();
    assert_eq!(config.policy, PolicyConfig::Priority { preemptive: true });
    assert_eq!(config.dispatch_latency, 0);

    let report = run_from_files(
        "tests/sample_configs/priority_preemptive.yaml",
        "tests/sample_workloads/priority_mixed.yaml",
    );
    assert_eq!(
        completion_times(&report),
        vec![(2, 5), (3, 7), (1, 12), (4, 15)]
    );
}

#[test]
fn test_fcfs_workload_file() {
    let processes = create_processes_from_yaml("tests/sample_workloads/fcfs_basic.yaml").unwrap();
    let report = Engine::new(cpu_sched_sim::fcfs_scheduler::FirstComeFirstServed)
        .run(processes)
        .unwrap();
    assert_eq!(completion_times(&report), vec![(1, 10), (2, 15), (3, 23)]);
}

#[test]
fn test_missing_config_file() {
    assert!(matches!(
        load_simulation_config("tests/sample_configs/does_not_exist.yaml"),
        Err(SimulationError::FileNotFound(_))
    ));
}

#[test]
fn test_dump_report_to_yaml() {
    let report = run_from_files(
        "tests/sample_configs/round_robin.yaml",
        "tests/sample_workloads/round_robin_overhead.yaml",
    );
    let file_path = create_scheduler_log_yaml_file("../outputs", "test_dump_report_to_yaml").unwrap();
    report.dump_report_to_yaml(&file_path).unwrap();

    let file_contents = fs::read_to_string(&file_path).unwrap();
    assert!(file_contents.contains("event_type: CONTEXT_SWITCH"));
    let loaded: Report = serde_yaml::from_str(&file_contents).unwrap();
    assert_eq!(loaded.total_time(), report.total_time());
    assert_eq!(loaded.individual_results(), report.individual_results());
    assert_eq!(loaded.structured_trace(), report.structured_trace());
    assert_eq!(loaded.processes(), report.processes());
    assert!((loaded.averages().waiting_time - report.averages().waiting_time).abs() < 1e-4);

    fs::remove_file(file_path).unwrap();
}
