//! # Components
//!
//! This module contains the components that the [`crate::agents::DDPG`] agent
//! is built from.
//!
//! ## Noise
//!
//! The [`OuNoise`] struct implements the Ornstein-Uhlenbeck process, which is
//! added to the actions of the agent for exploration.
//!
//! ## Replay Buffer
//!
//! The [`ReplayBuffer`] struct implements a fixed-capacity ring buffer of
//! [`Transition`]s with uniform sampling without replacement.
//!
//! ## Network
//!
//! The [`Network`] struct is the single function approximator that both the
//! actor and the critic are instances of. A local and a target network are
//! linked by [`soft_update`].

mod network;
mod ou_noise;
mod replay_buffer;

pub use network::{
    parameter_distance,
    soft_update,
    Network,
    NetworkConfig,
    OutputTransform,
};
pub use ou_noise::OuNoise;
pub use replay_buffer::{
    ReplayBuffer,
    Transition,
};
