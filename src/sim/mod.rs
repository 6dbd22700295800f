pub mod driver;

pub use driver::{Simulation, StepEvent};
