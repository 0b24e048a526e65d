use crate::{
    config::PolicyConfig, error::SimulationError, fcfs_scheduler::FirstComeFirstServed,
    fixed_priority_scheduler::FixedPriorityScheduler, round_robin_scheduler::RoundRobin,
    scheduler_policy::SchedulerPolicy, sjf_scheduler::ShortestJobFirst,
    stcf_scheduler::ShortestTimeToCompletionFirst,
};

pub fn create_policy(
    policy_config: &PolicyConfig,
) -> Result<Box<dyn SchedulerPolicy>, SimulationError> {
    let policy: Box<dyn SchedulerPolicy> = match *policy_config {
        PolicyConfig::Fcfs => Box::new(FirstComeFirstServed),
        PolicyConfig::Sjf => Box::new(ShortestJobFirst),
        PolicyConfig::Stcf => Box::new(ShortestTimeToCompletionFirst),
        PolicyConfig::RoundRobin { time_quantum } => Box::new(RoundRobin::new(time_quantum)?),
        PolicyConfig::Priority { preemptive } => Box::new(FixedPriorityScheduler::new(preemptive)),
    };
    Ok(policy)
}
