pub mod logging;
pub mod util;

pub mod components;
pub mod configs;
pub mod envs;
pub mod agents;
pub mod engines;

pub mod cli;
pub mod error;

pub use error::{
    Error,
    Result,
};

use serde::{
    Deserialize,
    Serialize,
};


/// The execution mode of an agent is either training or testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
pub enum RunMode {
    Train,
    Test,
}
