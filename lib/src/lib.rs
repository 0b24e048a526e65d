//! Discrete-tick CPU scheduling simulator.
//!
//! Processes are fed to an [`Engine`](engine::Engine) configured with one
//! [`SchedulerPolicy`](scheduler_policy::SchedulerPolicy), a dispatch latency and a set of
//! cores. The engine advances a logical clock one tick at a time and returns a
//! [`Report`](report::Report) with per-process results, averages, core utilization and the
//! full event trace. Runs are deterministic: the same input always yields the same report.
pub mod clock;
pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod fcfs_scheduler;
pub mod fixed_priority_scheduler;
pub mod homogeneous;
pub mod output_log;
pub mod process;
pub mod ready_queue;
pub mod report;
pub mod round_robin_scheduler;
pub mod scheduler_creator;
pub mod scheduler_policy;
pub mod sjf_scheduler;
pub mod stats_collector;
pub mod stcf_scheduler;
pub mod tracer;
pub mod util;
pub mod workload_creator;
