use {
    crate::{
        envs::QuadReward,
        error::{
            Error,
            Result,
        },
    },
    serde::{
        Deserialize,
        Serialize,
    },
};

/// The configuration struct for the [`Task`](crate::envs::Task) wrapper.
///
/// # Fields
/// * `init_pose` - Initial position `(x, y, z)` and Euler angles `(phi, theta, psi)`.
/// * `init_velocities` - Initial velocity in `(x, y, z)`.
/// * `init_angle_velocities` - Initial radians/second for each Euler angle.
/// * `runtime` - Time limit of each episode in seconds.
/// * `target_pos` - The `(x, y, z)` position the agent should reach.
/// * `action_repeat` - The number of simulator timesteps per agent action.
/// * `action_low` - Lower bound of every action component (rotor speed).
/// * `action_high` - Upper bound of every action component.
/// * `action_size` - The number of action components, between 1 and 4.
/// * `reward` - The reward function. See [`QuadReward`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskConfig {
    pub init_pose: [f64; 6],
    pub init_velocities: [f64; 3],
    pub init_angle_velocities: [f64; 3],
    pub runtime: f64,
    pub target_pos: [f64; 3],
    pub action_repeat: usize,
    pub action_low: f64,
    pub action_high: f64,
    pub action_size: usize,
    pub reward: QuadReward,
}
impl Default for TaskConfig {
    fn default() -> Self {
        Self::takeoff()
    }
}
impl TaskConfig {
    /// Start on the ground and climb to 10m.
    pub fn takeoff() -> Self {
        Self {
            init_pose: [0.0; 6],
            init_velocities: [0.0; 3],
            init_angle_velocities: [0.0; 3],
            runtime: 5.0,
            target_pos: [0.0, 0.0, 10.0],
            action_repeat: 3,
            action_low: 0.0,
            action_high: 900.0,
            action_size: 4,
            reward: QuadReward::default(),
        }
    }

    /// Start at 10m altitude and hold position at the same height.
    pub fn hover() -> Self {
        Self {
            init_pose: [0.0, 0.0, 10.0, 0.0, 0.0, 0.0],
            ..Self::takeoff()
        }
    }

    /// The size of one raw pose.
    pub const POSE_SIZE: usize = 6;

    /// The size of the observed state, `action_repeat` stacked poses.
    pub fn state_size(&self) -> usize {
        self.action_repeat * Self::POSE_SIZE
    }

    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn validate(&self) -> Result<()> {
        if self.action_repeat == 0 {
            return Err(Error::Config("action_repeat must be at least 1".to_owned()));
        }
        if !(1..=4).contains(&self.action_size) {
            return Err(Error::Config(format!(
                "action_size must be between 1 and 4, got {}",
                self.action_size,
            )));
        }
        if !(self.action_low < self.action_high) {
            return Err(Error::Config(format!(
                "action_low ({}) must be below action_high ({})",
                self.action_low, self.action_high,
            )));
        }
        if !(self.runtime > 0.0) {
            return Err(Error::Config(format!("runtime must be positive, got {}", self.runtime)));
        }
        Ok(())
    }
}
