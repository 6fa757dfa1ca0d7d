//! # Environments
//!
//! The [`Simulator`] trait is the seam to the physics simulation. The
//! [`Task`] wrapper turns any simulator into a reinforcement learning
//! environment, and [`QuadcopterSim`] is the simulator the binary trains on.

mod quadcopter_sim;
mod reward;
mod task;

pub use crate::envs::{
    quadcopter_sim::{
        QuadcopterSim,
        Vec3,
    },
    reward::{
        QuadReward,
        RewardCallback,
    },
    task::{
        Task,
        TaskStep,
        Tick,
    },
};


/// A physics simulator that advances a quadcopter under rotor-speed commands.
pub trait Simulator {
    /// Return to the initial conditions.
    fn reset(&mut self);

    /// Advance by one timestep. Returns `true` when the episode is over.
    fn next_timestep(
        &mut self,
        rotor_speeds: &[f64; 4],
    ) -> bool;

    /// Position `(x, y, z)` followed by Euler angles `(phi, theta, psi)`.
    fn pose(&self) -> [f64; 6];
    fn velocity(&self) -> [f64; 3];
    fn angular_velocity(&self) -> [f64; 3];
    fn time(&self) -> f64;
}
