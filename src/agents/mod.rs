//! # Agents
//!
//! The DDPG agent and its two function approximators.
//!
//! One training step moves data through the agent like this:
#![doc = simple_mermaid::mermaid!("../../docs/data_flow.mmd")]

mod actor;
mod critic;
mod ddpg;

pub use actor::Actor;
pub use critic::Critic;
pub use ddpg::DDPG;
