//! Errors raised by the agent, its components and the task wrapper.
//!
//! The engines and the binary wrap these in [`anyhow::Error`].
use thiserror::Error;

/// Errors in the library.
#[derive(Error, Debug)]
pub enum Error {
    /// The replay buffer holds fewer transitions than one batch needs.
    #[error("Insufficient replay data: {available} transitions stored, {required} required")]
    InsufficientData {
        available: usize,
        required: usize,
    },

    /// A local and a target network do not have identical parameter sets.
    ///
    /// This means the two networks were not built from the same
    /// configuration, so it is never recoverable.
    #[error("Parameter mismatch between local and target network: {0}")]
    ParameterMismatch(String),

    /// Invalid configuration, including a reward that evaluates to a
    /// non-finite value.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The simulator reported a state the agent cannot learn from.
    #[error("Environment fault: {0}")]
    EnvironmentFault(String),

    /// `step` was called before the first `reset_episode`.
    #[error("No episode is active, call reset_episode first")]
    EpisodeNotStarted,

    /// Failure inside the numeric backend.
    #[error(transparent)]
    Candle(#[from] candle_core::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
