use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use mpsim::scheduler::EarliestArrival;
use mpsim::{SimConfig, Simulation, Summary, workload};

/// Discrete-event simulation of a multiprocessor OS scheduler.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// CSV workload: one `arrival,instructions,memory,io_rate` line per process.
    #[arg(required_unless_present = "synthetic")]
    workload: Option<PathBuf>,

    /// Number of CPUs in the pool.
    #[arg(long, default_value_t = 2)]
    cpus: usize,

    /// Speed rating applied to every CPU.
    #[arg(long, default_value_t = 1)]
    speed: u64,

    /// Memory budget in GB (echoed in the report).
    #[arg(long, default_value_t = 4)]
    memory_gb: u64,

    /// Time quantum in ms (echoed in the report).
    #[arg(long, default_value_t = 100)]
    quantum_ms: u64,

    /// Generate a Bernoulli workload over this many ticks instead of
    /// reading a file.
    #[arg(long, conflicts_with = "workload")]
    synthetic: Option<u64>,

    /// Seed for the synthetic workload.
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let records = match (&cli.workload, cli.synthetic) {
        (Some(path), None) => workload::load_csv(path)?,
        (None, Some(ticks)) => workload::bernoulli_workload(ticks, 0.3, 0.3, 2, 6, cli.seed),
        _ => unreachable!("clap enforces exactly one workload source"),
    };

    let config = SimConfig::new(cli.cpus, cli.speed)
        .with_memory_gb(cli.memory_gb)
        .with_quantum_ms(cli.quantum_ms);

    let mut sim = Simulation::<EarliestArrival>::new(&config, records);
    sim.run();

    print!("{}", Summary::new(&config, &sim.ctx));
    Ok(())
}
