//! Generate a process list from a yaml file
use crate::{error::SimulationError, process::Process};

use log::warn;
use std::{fs, path::Path};
use yaml_rust::{Yaml, YamlLoader};

const KNOWN_KEYS: [&str; 4] = ["pid", "burst_time", "arrival_time", "priority"];

fn load_yaml(file_path: &str) -> Result<Vec<Yaml>, SimulationError> {
    if !Path::new(file_path).exists() {
        return Err(SimulationError::FileNotFound(file_path.into()));
    }
    let file_content = fs::read_to_string(file_path)?;
    YamlLoader::load_from_str(&file_content)
        .map_err(|err| SimulationError::InvalidWorkload(format!("{}: {}", file_path, err)))
}

fn get_integer(node: &Yaml, key: &str) -> Result<Option<i32>, SimulationError> {
    match &node[key] {
        Yaml::Integer(value) => i32::try_from(*value).map(Some).map_err(|_| {
            SimulationError::InvalidWorkload(format!("{} is out of range: {}", key, value))
        }),
        Yaml::BadValue | Yaml::Null => Ok(None),
        other => Err(SimulationError::InvalidWorkload(format!(
            "{} must be an integer, found {:?}",
            key, other
        ))),
    }
}

fn get_required_integer(node: &Yaml, key: &str) -> Result<i32, SimulationError> {
    get_integer(node, key)?
        .ok_or_else(|| SimulationError::InvalidWorkload(format!("missing {}", key)))
}

fn create_process_from_node(node: &Yaml) -> Result<Process, SimulationError> {
    let params = node.as_hash().ok_or_else(|| {
        SimulationError::InvalidWorkload(format!("process entry is not a map: {:?}", node))
    })?;
    for key in params.keys() {
        match key.as_str() {
            Some(key_str) if KNOWN_KEYS.contains(&key_str) => {}
            _ => warn!("Unknown process parameter is ignored: {:?}", key),
        }
    }

    let pid = get_required_integer(node, "pid")?;
    let burst_time = get_required_integer(node, "burst_time")?;
    let arrival_time = get_integer(node, "arrival_time")?.unwrap_or(0);
    let priority = get_integer(node, "priority")?;
    Ok(Process::new(pid, burst_time, arrival_time, priority))
}

/// load yaml file and return the process list it describes
///
/// # Arguments
///
/// *  `file_path` - yaml file path
///
/// # Returns
///
/// *  `processes` - processes in file order, with `arrival_time` defaulting to 0
///
/// # Example
///
/// ```
/// use cpu_sched_sim::workload_creator::create_processes_from_yaml;
///
/// let processes = create_processes_from_yaml("tests/sample_workloads/fcfs_basic.yaml").unwrap();
/// assert_eq!(processes.len(), 3);
/// assert_eq!(processes[0].burst_time(), 10);
/// ```
pub fn create_processes_from_yaml(file_path: &str) -> Result<Vec<Process>, SimulationError> {
    let yaml_docs = load_yaml(file_path)?;
    let yaml_doc = yaml_docs
        .first()
        .ok_or_else(|| SimulationError::InvalidWorkload(format!("{} is empty", file_path)))?;
    let entries = yaml_doc["processes"].as_vec().ok_or_else(|| {
        SimulationError::InvalidWorkload(format!("{} has no processes list", file_path))
    })?;
    entries.iter().map(create_process_from_node).collect()
}
