/// Startup configuration for a simulation run.
///
/// `memory_gb` and `quantum_ms` are carried through to the report only;
/// dispatch neither budgets memory nor preempts on quantum expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimConfig {
    pub cpu_count: usize,
    pub cpu_speed: u64,
    pub memory_gb: u64,
    pub quantum_ms: u64,
}

impl SimConfig {
    pub fn new(cpu_count: usize, cpu_speed: u64) -> Self {
        Self {
            cpu_count,
            cpu_speed,
            memory_gb: 0,
            quantum_ms: 0,
        }
    }

    pub fn with_memory_gb(mut self, memory_gb: u64) -> Self {
        self.memory_gb = memory_gb;
        self
    }

    pub fn with_quantum_ms(mut self, quantum_ms: u64) -> Self {
        self.quantum_ms = quantum_ms;
        self
    }
}
