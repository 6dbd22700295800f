use rustc_hash::FxHashSet;

use super::state::{SimCtx, Ticks};

/// Debug-build auditor for cross-structure invariants, run after every
/// driver step.
#[derive(Debug)]
pub struct Observer {
    step: u64,
    last_now: Ticks,
}

impl Observer {
    pub fn new() -> Self {
        Self {
            step: 0,
            last_now: 0,
        }
    }

    pub fn observe(&mut self, ctx: &SimCtx) {
        self.step += 1;

        debug_assert!(
            ctx.now() >= self.last_now,
            "clock moved backwards between steps {} and {}",
            self.step - 1,
            self.step
        );
        self.last_now = ctx.now();

        // Execution is synchronous, so no CPU stays occupied across steps.
        for cpu in &ctx.cpus {
            debug_assert!(
                cpu.is_free(),
                "CPU {} left occupied between steps",
                cpu.id
            );
        }

        let mut seen = FxHashSet::default();
        for process in ctx.ready.iter() {
            debug_assert!(
                process < ctx.processes.len(),
                "ready queue references unknown process {process}"
            );
            debug_assert!(
                seen.insert(process),
                "process {process} appears twice in the ready queue"
            );
            debug_assert!(
                ctx.process(process).completed_at.is_none(),
                "completed process {process} still in the ready queue"
            );
        }
    }
}

impl Default for Observer {
    fn default() -> Self {
        Self::new()
    }
}
