use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rand::prelude::*;
use thiserror::Error;
use tracing::info;

use crate::core::state::{ProcessRecord, Ticks};

/// Why a workload source could not be turned into process records.
#[derive(Debug, Error)]
pub enum WorkloadError {
    #[error("cannot read workload {path}: {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("line {line}: expected 4 comma-separated fields, found {found}")]
    FieldCount { line: usize, found: usize },
    #[error("line {line}, field {field}: {value:?} is not a non-negative integer")]
    InvalidField {
        line: usize,
        field: usize,
        value: String,
    },
}

/// Load records from a CSV source: one `arrival,instructions,memory,io_rate`
/// line per process, no header, whitespace around fields trimmed, blank
/// lines skipped. Any malformed line refuses the whole workload.
pub fn load_csv(path: &Path) -> Result<Vec<ProcessRecord>, WorkloadError> {
    let text = fs::read_to_string(path).map_err(|source| WorkloadError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    let records = parse_csv(&text)?;
    info!(path = %path.display(), count = records.len(), "workload loaded");
    Ok(records)
}

pub fn parse_csv(text: &str) -> Result<Vec<ProcessRecord>, WorkloadError> {
    let mut records = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() != 4 {
            return Err(WorkloadError::FieldCount {
                line: line_no,
                found: fields.len(),
            });
        }

        let mut values = [0u64; 4];
        for (i, field) in fields.iter().enumerate() {
            let trimmed = field.trim();
            values[i] = trimmed.parse().map_err(|_| WorkloadError::InvalidField {
                line: line_no,
                field: i + 1,
                value: trimmed.to_string(),
            })?;
        }

        records.push(ProcessRecord {
            arrival_time: values[0],
            instructions: values[1],
            memory: values[2],
            io_rate: values[3],
        });
    }

    Ok(records)
}

/// Synthetic workload: each tick a process arrives with probability
/// `p_arrival`; it is short with probability `p_short`. Deterministic per
/// seed.
pub fn bernoulli_workload(
    ticks: Ticks,
    p_arrival: f64,
    p_short: f64,
    short_instructions: u64,
    long_instructions: u64,
    seed: u64,
) -> Vec<ProcessRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut records = Vec::new();

    for t in 0..ticks {
        if rng.random::<f64>() < p_arrival {
            let instructions = if rng.random::<f64>() < p_short {
                short_instructions
            } else {
                long_instructions
            };

            records.push(ProcessRecord {
                arrival_time: t,
                instructions,
                memory: 1,
                io_rate: 1,
            });
        }
    }

    records
}
