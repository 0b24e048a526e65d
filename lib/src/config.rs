//! Simulation configuration loaded from YAML.
use serde_derive::{Deserialize, Serialize};
use std::path::Path;

use crate::error::SimulationError;

/// Which built-in policy to run, with its parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PolicyConfig {
    Fcfs,
    Sjf,
    Stcf,
    RoundRobin { time_quantum: i32 },
    /// `preemptive` has no default and must be spelled out.
    Priority { preemptive: bool },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub policy: PolicyConfig,
    #[serde(default)]
    pub dispatch_latency: i32,
    #[serde(default = "default_number_of_cores")]
    pub number_of_cores: usize,
}

fn default_number_of_cores() -> usize {
    1
}

impl SimulationConfig {
    pub fn new(policy: PolicyConfig) -> Self {
        Self {
            policy,
            dispatch_latency: 0,
            number_of_cores: default_number_of_cores(),
        }
    }
}

/// Loads the simulation configuration from a YAML file.
pub fn load_simulation_config<P: AsRef<Path>>(path: P) -> Result<SimulationConfig, SimulationError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(SimulationError::FileNotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path)?;
    let config: SimulationConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulation_config_from_str_defaults() {
        let config: SimulationConfig = serde_yaml::from_str("policy:\n  kind: fcfs\n").unwrap();
        assert_eq!(config, SimulationConfig::new(PolicyConfig::Fcfs));
    }

    #[test]
    fn test_simulation_config_from_str_round_robin() {
        let yaml = "policy:\n  kind: round_robin\n  time_quantum: 5\ndispatch_latency: 3\nnumber_of_cores: 2\n";
        let config: SimulationConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.policy, PolicyConfig::RoundRobin { time_quantum: 5 });
        assert_eq!(config.dispatch_latency, 3);
        assert_eq!(config.number_of_cores, 2);
    }

    #[test]
    fn test_simulation_config_priority_requires_preemptive() {
        let result: Result<SimulationConfig, _> =
            serde_yaml::from_str("policy:\n  kind: priority\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_simulation_config_normal() {
        let config = load_simulation_config("tests/sample_configs/round_robin.yaml").unwrap();
        assert_eq!(config.policy, PolicyConfig::RoundRobin { time_quantum: 5 });
        assert_eq!(config.dispatch_latency, 3);
        assert_eq!(config.number_of_cores, 1);
    }

    #[test]
    fn test_load_simulation_config_missing_file() {
        assert!(matches!(
            load_simulation_config("tests/sample_configs/missing.yaml"),
            Err(SimulationError::FileNotFound(_))
        ));
    }
}
