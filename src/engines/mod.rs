//! # Engines
//!
//! The training loop and the experiment runner that persists its results.

mod experiment;
mod record;
mod train;

pub use experiment::{
    run_experiment,
    run_experiment_in,
};
pub use record::{
    write_csv_header,
    LogRecord,
    TrainingLog,
    LABELS,
};
pub use train::train;
