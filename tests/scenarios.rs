use std::io::Write;

use mpsim::scheduler::EarliestArrival;
use mpsim::workload::{self, WorkloadError};
use mpsim::{ProcessRecord, SimConfig, Simulation, StepEvent, Summary};

fn record(arrival_time: u64, instructions: u64) -> ProcessRecord {
    ProcessRecord {
        arrival_time,
        instructions,
        memory: 1,
        io_rate: 1,
    }
}

#[test]
fn single_process_dispatches_immediately() {
    let config = SimConfig::new(1, 1);
    let mut sim = Simulation::<EarliestArrival>::new(&config, vec![record(0, 5)]);

    let trace = sim.run();
    assert_eq!(
        trace,
        vec![
            StepEvent::Arrived { at: 0, process: 0 },
            StepEvent::Dispatched {
                at: 0,
                process: 0,
                cpu: 0
            },
        ]
    );
    assert_eq!(sim.completed_count(), 1);
}

#[test]
fn equal_arrivals_dispatch_in_input_order() {
    let config = SimConfig::new(1, 1);
    let records = vec![record(0, 5), record(0, 3)];
    let mut sim = Simulation::<EarliestArrival>::new(&config, records);

    let trace = sim.run();
    let dispatched: Vec<_> = trace
        .iter()
        .filter_map(|step| match step {
            StepEvent::Dispatched { process, .. } => Some(*process),
            _ => None,
        })
        .collect();
    assert_eq!(dispatched, vec![0, 1]);
    assert_eq!(sim.completed_count(), 2);
}

#[test]
fn zero_cpus_drain_the_event_queue_without_completions() {
    let config = SimConfig::new(0, 1);
    let records = vec![record(0, 5), record(1, 3)];
    let mut sim = Simulation::<EarliestArrival>::new(&config, records);

    let trace = sim.run();
    assert_eq!(
        trace,
        vec![
            StepEvent::Arrived { at: 0, process: 0 },
            StepEvent::Starved { at: 0, waiting: 1 },
            StepEvent::Arrived { at: 1, process: 1 },
            StepEvent::Starved { at: 1, waiting: 2 },
        ]
    );
    assert_eq!(sim.completed_count(), 0);
    assert_eq!(sim.ctx.ready.len(), 2);
    assert_eq!(sim.pending_events(), 0);
}

#[test]
fn malformed_workload_refuses_to_start() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "0,5,1,1").unwrap();
    writeln!(file, "abc,1,1,1").unwrap();

    let err = workload::load_csv(file.path()).unwrap_err();
    match err {
        WorkloadError::InvalidField { line, field, value } => {
            assert_eq!(line, 2);
            assert_eq!(field, 1);
            assert_eq!(value, "abc");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn trace_timestamps_never_decrease() {
    let config = SimConfig::new(2, 1);
    let records = workload::bernoulli_workload(100, 0.4, 0.3, 2, 6, 9);
    let mut sim = Simulation::<EarliestArrival>::new(&config, records);

    let mut last = 0;
    for step in sim.run() {
        let at = match step {
            StepEvent::Arrived { at, .. }
            | StepEvent::IoCompleted { at, .. }
            | StepEvent::Dispatched { at, .. }
            | StepEvent::Starved { at, .. } => at,
        };
        assert!(at >= last, "trace went backwards: {at} after {last}");
        last = at;
    }
}

#[test]
fn identical_runs_produce_identical_traces() {
    let config = SimConfig::new(2, 1);
    let records = workload::bernoulli_workload(300, 0.3, 0.3, 2, 6, 7);

    let mut first = Simulation::<EarliestArrival>::new(&config, records.clone());
    let mut second = Simulation::<EarliestArrival>::new(&config, records);

    assert_eq!(first.run(), second.run());
    assert_eq!(first.completed_count(), second.completed_count());
}

#[test]
fn summary_reflects_the_run() {
    let config = SimConfig::new(1, 2).with_memory_gb(4).with_quantum_ms(100);
    let records = vec![record(0, 5), record(2, 3)];
    let mut sim = Simulation::<EarliestArrival>::new(&config, records);
    sim.run();

    let summary = Summary::new(&config, &sim.ctx);
    assert_eq!(summary.total, 2);
    assert_eq!(summary.completed, 2);
    assert_eq!(summary.left_waiting, 0);
    assert_eq!(summary.mean_wait, Some(0.0));
    assert_eq!(summary.retired_per_cpu, vec![8]);
}
