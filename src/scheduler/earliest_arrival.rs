use super::{Dispatch, SchedulingPolicy};
use crate::core::state::{ProcessId, SimCtx, Ticks};

/// First-come-first-served dressed as a priority policy: the priority key
/// is the arrival timestamp, ties resolved by current ready-queue order.
pub struct EarliestArrival;

impl SchedulingPolicy for EarliestArrival {
    fn init(_ctx: &mut SimCtx) -> Self {
        Self
    }

    fn dispatch(&mut self, ctx: &mut SimCtx) -> Option<Dispatch> {
        // Strict `<` keeps the first queued process among equal arrivals.
        let mut selected: Option<(ProcessId, Ticks)> = None;
        for candidate in ctx.ready.iter() {
            let arrival = ctx.record(candidate).arrival_time;
            if selected.is_none_or(|(_, best)| arrival < best) {
                selected = Some((candidate, arrival));
            }
        }
        let (process, _) = selected?;

        // No free CPU leaves the process queued for a later attempt.
        let cpu = ctx.pick_free_cpu()?;

        let record = ctx.processes[process].record;
        ctx.cpus[cpu].execute(&record);
        ctx.ready.remove(process);

        let now = ctx.now();
        let entry = ctx.process_mut(process);
        entry.completed_at = Some(now);
        entry.ran_on = Some(cpu);

        Some(Dispatch { process, cpu })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::core::state::ProcessRecord;

    fn record(arrival_time: Ticks) -> ProcessRecord {
        ProcessRecord {
            arrival_time,
            instructions: 4,
            memory: 1,
            io_rate: 1,
        }
    }

    fn ctx(cpu_count: usize, arrivals: &[Ticks]) -> SimCtx {
        let records = arrivals.iter().map(|&t| record(t)).collect();
        SimCtx::new(&SimConfig::new(cpu_count, 1), records)
    }

    #[test]
    fn empty_ready_queue_is_a_noop() {
        let mut ctx = ctx(1, &[0]);
        let mut policy = EarliestArrival::init(&mut ctx);
        assert_eq!(policy.dispatch(&mut ctx), None);
    }

    #[test]
    fn picks_smallest_arrival_time() {
        let mut ctx = ctx(1, &[7, 2, 5]);
        ctx.ready.add(0);
        ctx.ready.add(1);
        ctx.ready.add(2);
        let mut policy = EarliestArrival::init(&mut ctx);

        let dispatch = policy.dispatch(&mut ctx).unwrap();
        assert_eq!(dispatch, Dispatch { process: 1, cpu: 0 });
        assert!(!ctx.ready.contains(1));
        assert_eq!(ctx.process(1).completed_at, Some(0));
        assert_eq!(ctx.process(1).ran_on, Some(0));
    }

    #[test]
    fn equal_arrivals_resolve_by_queue_order() {
        let mut ctx = ctx(1, &[3, 3]);
        ctx.ready.add(1);
        ctx.ready.add(0);
        let mut policy = EarliestArrival::init(&mut ctx);

        let dispatch = policy.dispatch(&mut ctx).unwrap();
        assert_eq!(dispatch.process, 1);
    }

    #[test]
    fn no_free_cpu_leaves_the_queue_intact() {
        let mut ctx = ctx(0, &[0]);
        ctx.ready.add(0);
        let mut policy = EarliestArrival::init(&mut ctx);

        assert_eq!(policy.dispatch(&mut ctx), None);
        assert!(ctx.ready.contains(0));
        assert_eq!(ctx.process(0).completed_at, None);
    }

    #[test]
    fn cpu_returns_free_after_dispatch() {
        let mut ctx = ctx(1, &[0]);
        ctx.ready.add(0);
        let mut policy = EarliestArrival::init(&mut ctx);

        policy.dispatch(&mut ctx).unwrap();
        assert!(ctx.cpus[0].is_free());
        assert_eq!(ctx.cpus[0].retired, 4);
    }
}
