use tracing::{debug, info, trace};

use crate::config::SimConfig;
use crate::core::event::{Action, Event, EventQueue};
use crate::core::observer::Observer;
use crate::core::state::{CpuId, ProcessId, ProcessRecord, SimCtx, Ticks};
use crate::scheduler::{Dispatch, SchedulingPolicy};

/// One line of the per-step trace. The trace is the determinism witness:
/// identical input and configuration must reproduce it exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepEvent {
    Arrived {
        at: Ticks,
        process: ProcessId,
    },
    IoCompleted {
        at: Ticks,
        process: ProcessId,
    },
    Dispatched {
        at: Ticks,
        process: ProcessId,
        cpu: CpuId,
    },
    /// Ready work exists but no CPU was free.
    Starved {
        at: Ticks,
        waiting: usize,
    },
}

/// Owns the clock, event queue, ready queue, CPU pool, and policy, and runs
/// the event loop until the event queue is exhausted.
pub struct Simulation<P: SchedulingPolicy> {
    pub ctx: SimCtx,
    pub policy: P,
    events: EventQueue,
    observer: Observer,
}

impl<P: SchedulingPolicy> Simulation<P> {
    /// Build a simulation and seed one arrival per record, in input order.
    pub fn new(config: &SimConfig, records: Vec<ProcessRecord>) -> Self {
        let mut ctx = SimCtx::new(config, records);
        let policy = P::init(&mut ctx);

        let mut events = EventQueue::new();
        for (process, entry) in ctx.processes.iter().enumerate() {
            events.push(Event::arrival(entry.record.arrival_time, process));
        }

        Self {
            ctx,
            policy,
            events,
            observer: Observer::new(),
        }
    }

    /// Queue an additional event, e.g. an I/O completion.
    pub fn schedule(&mut self, event: Event) {
        trace!(?event, "event scheduled");
        self.events.push(event);
    }

    /// Consume the earliest pending event: advance the clock to its
    /// timestamp, apply it, then give the policy one dispatch attempt.
    /// Returns the step's trace; empty when no events are pending.
    pub fn step(&mut self) -> Vec<StepEvent> {
        let Some(event) = self.events.pop() else {
            return Vec::new();
        };

        self.ctx.clock.advance_to(event.timestamp);
        event.apply(&mut self.ctx);

        let at = self.ctx.now();
        let mut steps = Vec::with_capacity(2);
        steps.push(match event.action {
            Action::Arrival { process } => StepEvent::Arrived { at, process },
            Action::IoCompletion { process } => StepEvent::IoCompleted { at, process },
        });
        debug!(?event, now = at, "event applied");

        match self.policy.dispatch(&mut self.ctx) {
            Some(Dispatch { process, cpu }) => {
                debug!(process, cpu, now = at, "dispatched");
                steps.push(StepEvent::Dispatched { at, process, cpu });
            }
            None if !self.ctx.ready.is_empty() => {
                let waiting = self.ctx.ready.len();
                trace!(waiting, now = at, "no CPU free");
                steps.push(StepEvent::Starved { at, waiting });
            }
            None => {}
        }

        self.observer.observe(&self.ctx);
        steps
    }

    /// Run to event-queue exhaustion and return the full trace.
    pub fn run(&mut self) -> Vec<StepEvent> {
        let mut full_trace = Vec::new();
        while !self.events.is_empty() {
            full_trace.extend(self.step());
        }
        info!(
            total = self.ctx.processes.len(),
            completed = self.completed_count(),
            now = self.ctx.now(),
            "event queue drained"
        );
        full_trace
    }

    pub fn completed_count(&self) -> usize {
        self.ctx.completed_count()
    }

    pub fn pending_events(&self) -> usize {
        self.events.len()
    }
}
