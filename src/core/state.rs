use std::collections::VecDeque;

use rustc_hash::FxHashSet;
use tracing::trace;

use super::clock::Clock;
use crate::config::SimConfig;

// Index into the SimCtx process table
pub type ProcessId = usize;
pub type CpuId = usize;
pub type Ticks = u64;

/// One workload record as read from input. Never mutated after creation;
/// identity within a simulation is its [`ProcessId`], the index in the
/// process table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessRecord {
    pub arrival_time: Ticks,
    pub instructions: u64,
    pub memory: u64,
    pub io_rate: u64,
}

/// A record plus the state the simulation accretes around it.
#[derive(Debug, Clone)]
pub struct ProcessEntry {
    pub record: ProcessRecord,
    pub completed_at: Option<Ticks>,
    pub ran_on: Option<CpuId>,
}

#[derive(Debug)]
pub struct Cpu {
    pub id: CpuId,
    pub speed: u64,
    pub occupied: bool,
    pub retired: u64,
}

impl Cpu {
    pub fn new(id: CpuId, speed: u64) -> Self {
        Self {
            id,
            speed,
            occupied: false,
            retired: 0,
        }
    }

    pub fn is_free(&self) -> bool {
        !self.occupied
    }

    /// Run `record` to completion. No simulated time elapses; occupancy is
    /// held for the duration of the call and released before returning.
    pub fn execute(&mut self, record: &ProcessRecord) {
        debug_assert!(!self.occupied, "CPU {} already running a process", self.id);
        self.occupied = true;
        trace!(cpu = self.id, instructions = record.instructions, "executing");
        self.retired = self.retired.saturating_add(record.instructions);
        self.occupied = false;
    }
}

/// Arrived processes awaiting a CPU, oldest first. One instance per
/// [`SimCtx`]; membership is added only by event application and removed
/// only by a successful dispatch.
#[derive(Debug, Default)]
pub struct ReadyQueue {
    order: VecDeque<ProcessId>,
    members: FxHashSet<ProcessId>,
}

impl ReadyQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `process`. A process may be queued at most once.
    pub fn add(&mut self, process: ProcessId) {
        assert!(
            self.members.insert(process),
            "process {process} already in the ready queue"
        );
        self.order.push_back(process);
    }

    /// Drop the first queued occurrence of `process`. No-op when absent.
    pub fn remove(&mut self, process: ProcessId) {
        if self.members.remove(&process)
            && let Some(pos) = self.order.iter().position(|&p| p == process)
        {
            self.order.remove(pos);
        }
    }

    pub fn contains(&self, process: ProcessId) -> bool {
        self.members.contains(&process)
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Queue order, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = ProcessId> + '_ {
        self.order.iter().copied()
    }
}

/// Shared simulation state: the clock, the process table, the ready queue,
/// and the CPU pool. Owned by the driver and lent to the policy; never a
/// process-wide singleton, so parallel simulations cannot interfere.
#[derive(Debug)]
pub struct SimCtx {
    pub clock: Clock,
    pub processes: Vec<ProcessEntry>,
    pub ready: ReadyQueue,
    pub cpus: Vec<Cpu>,
}

impl SimCtx {
    /// Build the context from configuration and the parsed workload. The
    /// pool size is fixed from here on; zero CPUs is a valid configuration
    /// (every process then waits forever).
    pub fn new(config: &SimConfig, records: Vec<ProcessRecord>) -> Self {
        let cpus = (0..config.cpu_count)
            .map(|id| Cpu::new(id, config.cpu_speed))
            .collect();
        let processes = records
            .into_iter()
            .map(|record| ProcessEntry {
                record,
                completed_at: None,
                ran_on: None,
            })
            .collect();

        Self {
            clock: Clock::new(),
            processes,
            ready: ReadyQueue::new(),
            cpus,
        }
    }

    pub fn now(&self) -> Ticks {
        self.clock.current()
    }

    pub fn process(&self, process: ProcessId) -> &ProcessEntry {
        &self.processes[process]
    }

    pub fn process_mut(&mut self, process: ProcessId) -> &mut ProcessEntry {
        &mut self.processes[process]
    }

    pub fn record(&self, process: ProcessId) -> &ProcessRecord {
        &self.processes[process].record
    }

    /// First free CPU in pool-index order, if any.
    pub fn pick_free_cpu(&self) -> Option<CpuId> {
        self.cpus.iter().find(|cpu| cpu.is_free()).map(|cpu| cpu.id)
    }

    pub fn completed_count(&self) -> usize {
        self.processes
            .iter()
            .filter(|p| p.completed_at.is_some())
            .count()
    }
}
