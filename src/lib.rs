pub mod config;
pub mod core;
pub mod report;
pub mod scheduler;
pub mod sim;
pub mod workload;

pub use config::SimConfig;
pub use self::core::{Event, ProcessRecord};
pub use report::Summary;
pub use scheduler::SchedulingPolicy;
pub use sim::{Simulation, StepEvent};
