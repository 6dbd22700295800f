pub mod clock;
pub mod event;
pub mod observer;
pub mod state;

pub use clock::Clock;
pub use event::{Action, Event, EventQueue};
pub use observer::Observer;
pub use state::{Cpu, CpuId, ProcessEntry, ProcessId, ProcessRecord, ReadyQueue, SimCtx, Ticks};
