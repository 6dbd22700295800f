pub mod earliest_arrival;

pub use earliest_arrival::EarliestArrival;

use crate::core::state::{CpuId, ProcessId, SimCtx};

/// A successful binding of a ready process to a free CPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatch {
    pub process: ProcessId,
    pub cpu: CpuId,
}

/// Strategy for picking the next ready process and the CPU to run it on.
///
/// The driver calls `dispatch` exactly once after applying each event.
/// Returning `None` leaves the ready queue untouched for a later attempt;
/// with no further events pending, queued processes wait forever.
pub trait SchedulingPolicy {
    fn init(ctx: &mut SimCtx) -> Self;

    fn dispatch(&mut self, ctx: &mut SimCtx) -> Option<Dispatch>;
}
