use std::collections::BTreeSet;

use crate::{core::Core, error::SimulationError};

/// Ordered set of identical cores, kept in ascending `core_id` order.
#[derive(Debug, Clone)]
pub struct HomogeneousProcessor {
    cores: Vec<Core>,
}

impl HomogeneousProcessor {
    pub fn new(num_cores: usize) -> Self {
        let cores = (0..num_cores).map(Core::new).collect::<Vec<Core>>();
        Self { cores }
    }

    /// Builds a processor from caller-supplied cores. The cores must be idle,
    /// non-empty, and carry unique ids.
    pub fn from_cores(mut cores: Vec<Core>) -> Result<Self, SimulationError> {
        if cores.is_empty() {
            return Err(SimulationError::NoCores);
        }
        let mut core_ids = BTreeSet::new();
        for core in &cores {
            if !core_ids.insert(core.core_id()) {
                return Err(SimulationError::DuplicateCoreId(core.core_id()));
            }
            if let Some(process) = core.current_process() {
                return Err(SimulationError::CoreOccupied {
                    core_id: core.core_id(),
                    pid: process.pid(),
                });
            }
        }
        cores.sort_by_key(Core::core_id);
        Ok(Self { cores })
    }

    pub fn get_number_of_cores(&self) -> usize {
        self.cores.len()
    }

    pub fn cores(&self) -> &[Core] {
        &self.cores
    }

    pub fn core(&self, core_index: usize) -> Result<&Core, SimulationError> {
        self.cores
            .get(core_index)
            .ok_or(SimulationError::UnknownCore(core_index))
    }

    pub(crate) fn core_mut(&mut self, core_index: usize) -> Result<&mut Core, SimulationError> {
        self.cores
            .get_mut(core_index)
            .ok_or(SimulationError::UnknownCore(core_index))
    }

    pub fn is_idle(&self) -> bool {
        self.cores.iter().all(Core::is_idle)
    }
}
