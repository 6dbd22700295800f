use std::fmt;

use average::{Estimate, Mean};

use crate::config::SimConfig;
use crate::core::state::SimCtx;

/// End-of-run summary: configuration echoed back plus process statistics.
/// "Completed" counts processes not left in the ready queue; wait time is
/// the span from arrival to dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub config: SimConfig,
    pub total: usize,
    pub completed: usize,
    pub left_waiting: usize,
    pub mean_wait: Option<f64>,
    pub retired_per_cpu: Vec<u64>,
}

impl Summary {
    pub fn new(config: &SimConfig, ctx: &SimCtx) -> Self {
        let total = ctx.processes.len();
        let completed = ctx.completed_count();

        let waits: Mean = ctx
            .processes
            .iter()
            .filter_map(|p| {
                p.completed_at
                    .map(|done| (done - p.record.arrival_time) as f64)
            })
            .collect();
        let mean_wait = (completed > 0).then(|| waits.estimate());

        Self {
            config: config.clone(),
            total,
            completed,
            left_waiting: ctx.ready.len(),
            mean_wait,
            retired_per_cpu: ctx.cpus.iter().map(|cpu| cpu.retired).collect(),
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Simulation results")?;
        writeln!(f, "Configuration:")?;
        writeln!(f, "  CPUs: {}", self.config.cpu_count)?;
        writeln!(f, "  CPU speed: {}", self.config.cpu_speed)?;
        writeln!(f, "  Memory: {}GB", self.config.memory_gb)?;
        writeln!(f, "  Quantum: {}ms", self.config.quantum_ms)?;
        writeln!(f, "Process statistics:")?;
        writeln!(f, "  Total processes: {}", self.total)?;
        writeln!(f, "  Completed: {}", self.completed)?;
        writeln!(f, "  Left waiting: {}", self.left_waiting)?;
        if let Some(wait) = self.mean_wait {
            writeln!(f, "  Mean wait: {wait:.2} ticks")?;
        }
        for (cpu, retired) in self.retired_per_cpu.iter().enumerate() {
            writeln!(f, "  CPU {cpu}: {retired} instructions retired")?;
        }
        Ok(())
    }
}
