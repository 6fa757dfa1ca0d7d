use {
    super::{
        QuadcopterSim,
        Simulator,
    },
    crate::{
        configs::TaskConfig,
        error::{
            Error,
            Result,
        },
    },
    tracing::info,
};

/// The simulator state after one repeated timestep.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub time: f64,
    pub pose: [f64; 6],
    pub velocity: [f64; 3],
    pub angular_velocity: [f64; 3],
    pub reward: f64,
}

/// The result of one [`Task::step`].
///
/// # Fields
///
/// * `next_state` - The `action_repeat` poses of this step, concatenated.
/// * `reward` - The reward summed over the repeated timesteps.
/// * `done` - The simulator's done flag after the final repeat.
/// * `ticks` - The simulator state after each repeated timestep.
#[derive(Debug, Clone)]
pub struct TaskStep {
    pub next_state: Vec<f64>,
    pub reward: f64,
    pub done: bool,
    pub ticks: Vec<Tick>,
}

/// Task (environment) that defines the goal and provides feedback to the
/// agent.
///
/// The wrapper turns simulator timesteps into reinforcement learning
/// transitions: every action is held for `action_repeat` timesteps, the
/// observed state stacks the poses of those timesteps and the reward is summed
/// over them. Termination is entirely up to the simulator.
pub struct Task<S: Simulator> {
    sim: S,
    config: TaskConfig,
}

impl Task<QuadcopterSim> {
    /// Build the task around a [`QuadcopterSim`] with the configured initial
    /// conditions.
    pub fn from_config(config: TaskConfig) -> Result<Self> {
        let sim = QuadcopterSim::new(
            config.init_pose,
            config.init_velocities,
            config.init_angle_velocities,
            config.runtime,
        );
        Self::new(sim, config)
    }
}

impl<S: Simulator> Task<S> {
    /// Wrap a simulator.
    ///
    /// The reward is evaluated once at the initial pose so that a reward
    /// function producing non-finite values fails here rather than during
    /// training.
    pub fn new(
        sim: S,
        config: TaskConfig,
    ) -> Result<Self> {
        config.validate()?;
        let reward = config.reward.compute(&config.init_pose, &config.target_pos);
        if !reward.is_finite() {
            return Err(Error::Config(format!(
                "reward {} evaluates to {reward} at the initial pose",
                config.reward,
            )));
        }
        Ok(Self { sim, config })
    }

    pub fn config(&self) -> &TaskConfig {
        &self.config
    }

    pub fn sim(&self) -> &S {
        &self.sim
    }

    pub fn state_size(&self) -> usize {
        self.config.state_size()
    }

    pub fn action_size(&self) -> usize {
        self.config.action_size
    }

    pub fn action_low(&self) -> f64 {
        self.config.action_low
    }

    pub fn action_high(&self) -> f64 {
        self.config.action_high
    }

    pub fn target_pos(&self) -> [f64; 3] {
        self.config.target_pos
    }

    /// Reset the sim to start a new episode.
    ///
    /// Returns the initial pose repeated `action_repeat` times.
    pub fn reset(&mut self) -> Result<Vec<f64>> {
        self.sim.reset();
        let pose = self.sim.pose();
        check_finite("pose", &pose)?;
        Ok(pose.repeat(self.config.action_repeat))
    }

    /// Hold `rotor_speeds` for `action_repeat` timesteps.
    pub fn step(
        &mut self,
        rotor_speeds: &[f64; 4],
    ) -> Result<TaskStep> {
        let repeat = self.config.action_repeat;
        let mut next_state = Vec::with_capacity(self.state_size());
        let mut ticks = Vec::with_capacity(repeat);
        let mut reward = 0.0;
        let mut done = false;

        for _ in 0..repeat {
            done = self.sim.next_timestep(rotor_speeds);
            let tick = self.observe()?;
            reward += tick.reward;
            next_state.extend_from_slice(&tick.pose);
            ticks.push(tick);
        }

        info!(?rotor_speeds, reward, done, time = self.sim.time(), "task step");
        Ok(TaskStep {
            next_state,
            reward,
            done,
            ticks,
        })
    }

    /// Expand an action of `action_size` components into four rotor speeds.
    ///
    /// Smaller actions are repeated until all rotors are covered, so one
    /// component drives all four rotors, two components alternate, and three
    /// components wrap around to the first.
    pub fn rotor_speeds(
        &self,
        action: &[f64],
    ) -> Result<[f64; 4]> {
        if action.len() != self.config.action_size {
            return Err(Error::Config(format!(
                "expected an action of size {}, got {}",
                self.config.action_size,
                action.len(),
            )));
        }
        let mut speeds = [0.0; 4];
        for (i, speed) in speeds.iter_mut().enumerate() {
            *speed = action[i % action.len()];
        }
        Ok(speeds)
    }

    fn observe(&self) -> Result<Tick> {
        let pose = self.sim.pose();
        let velocity = self.sim.velocity();
        let angular_velocity = self.sim.angular_velocity();
        check_finite("pose", &pose)?;
        check_finite("velocity", &velocity)?;
        check_finite("angular velocity", &angular_velocity)?;

        let reward = self.config.reward.compute(&pose, &self.config.target_pos);
        if !reward.is_finite() {
            return Err(Error::Config(format!(
                "reward {} evaluates to {reward} at pose {pose:?}",
                self.config.reward,
            )));
        }

        Ok(Tick {
            time: self.sim.time(),
            pose,
            velocity,
            angular_velocity,
            reward,
        })
    }
}

fn check_finite(
    what: &str,
    values: &[f64],
) -> Result<()> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(Error::EnvironmentFault(format!("simulator reported a non-finite {what}: {values:?}")))
    }
}


#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::envs::{
            QuadReward,
            RewardCallback,
        },
    };

    /// Moves up by one meter per timestep and ends after `limit` timesteps.
    struct Elevator {
        z: f64,
        ticks: usize,
        limit: usize,
        poison: bool,
    }
    impl Elevator {
        fn new(limit: usize) -> Self {
            Self { z: 0.0, ticks: 0, limit, poison: false }
        }
    }
    impl Simulator for Elevator {
        fn reset(&mut self) {
            self.z = 0.0;
            self.ticks = 0;
        }
        fn next_timestep(&mut self, _rotor_speeds: &[f64; 4]) -> bool {
            self.z += 1.0;
            self.ticks += 1;
            self.ticks >= self.limit
        }
        fn pose(&self) -> [f64; 6] {
            let z = if self.poison { f64::NAN } else { self.z };
            [0.0, 0.0, z, 0.0, 0.0, 0.0]
        }
        fn velocity(&self) -> [f64; 3] {
            [0.0, 0.0, 1.0]
        }
        fn angular_velocity(&self) -> [f64; 3] {
            [0.0; 3]
        }
        fn time(&self) -> f64 {
            self.ticks as f64 * 0.02
        }
    }

    fn config(action_repeat: usize) -> TaskConfig {
        TaskConfig {
            init_pose: [0.0; 6],
            target_pos: [0.0, 0.0, 10.0],
            action_repeat,
            ..Default::default()
        }
    }

    #[test]
    fn reset_stacks_the_initial_pose() {
        let mut task = Task::new(Elevator::new(100), config(3)).unwrap();
        let state = task.reset().unwrap();
        assert_eq!(state.len(), 18);
        assert_eq!(state, [0.0; 18].to_vec());
    }

    #[test]
    fn step_repeats_the_action() {
        for repeat in 1..=5 {
            let mut task = Task::new(Elevator::new(100), config(repeat)).unwrap();
            task.reset().unwrap();
            let step = task.step(&[400.0; 4]).unwrap();

            assert_eq!(step.next_state.len(), 6 * repeat);
            assert_eq!(step.ticks.len(), repeat);
            assert_eq!(task.sim().ticks, repeat);
            // the last pose in the state is the current one
            assert_eq!(step.next_state[6 * repeat - 4], repeat as f64);
            assert!(!step.done);
        }
    }

    #[test]
    fn reward_is_summed_over_repeats() {
        let mut task = Task::new(Elevator::new(100), config(3)).unwrap();
        task.reset().unwrap();
        let step = task.step(&[0.0; 4]).unwrap();
        // z = 1, 2, 3 against a target at 10: 1 - 0.3 * (9 + 8 + 7)
        assert!((step.reward - (3.0 - 0.3 * 24.0)).abs() < 1e-12);
        let summed: f64 = step.ticks.iter().map(|t| t.reward).sum();
        assert!((summed - step.reward).abs() < 1e-12);
    }

    #[test]
    fn done_comes_from_the_final_repeat() {
        let mut task = Task::new(Elevator::new(4), config(3)).unwrap();
        task.reset().unwrap();
        assert!(!task.step(&[0.0; 4]).unwrap().done);
        // the simulator reports done on its fourth tick, the wrapper still
        // finishes the repeat and reports the final flag
        let step = task.step(&[0.0; 4]).unwrap();
        assert!(step.done);
        assert_eq!(task.sim().ticks, 6);
    }

    #[test]
    fn quadcopter_advances_r_timesteps() {
        let mut task = Task::from_config(TaskConfig::hover()).unwrap();
        task.reset().unwrap();
        let step = task.step(&[400.0; 4]).unwrap();
        assert_eq!(step.next_state.len(), 18);
        assert!((task.sim().time() - 3.0 * QuadcopterSim::DT).abs() < 1e-12);
    }

    #[test]
    fn takeoff_survives_the_first_step_under_thrust() {
        let mut task = Task::from_config(TaskConfig::default()).unwrap();
        task.reset().unwrap();
        let step = task.step(&[450.0, 500.0, 450.0, 500.0]).unwrap();
        assert!(!step.done);
        assert!(step.next_state[step.next_state.len() - 4] > 0.0);

        // without thrust it falls through the floor at once
        task.reset().unwrap();
        assert!(task.step(&[0.0; 4]).unwrap().done);
    }

    #[test]
    fn rotor_speeds_cover_all_rotors() {
        let task_with = |action_size| {
            let config = TaskConfig { action_size, ..config(1) };
            Task::new(Elevator::new(1), config).unwrap()
        };
        assert_eq!(task_with(1).rotor_speeds(&[5.0]).unwrap(), [5.0; 4]);
        assert_eq!(task_with(2).rotor_speeds(&[1.0, 2.0]).unwrap(), [1.0, 2.0, 1.0, 2.0]);
        assert_eq!(task_with(3).rotor_speeds(&[1.0, 2.0, 3.0]).unwrap(), [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(
            task_with(4).rotor_speeds(&[1.0, 2.0, 3.0, 4.0]).unwrap(),
            [1.0, 2.0, 3.0, 4.0],
        );
        assert!(task_with(2).rotor_speeds(&[1.0]).is_err());
    }

    #[test]
    fn non_finite_reward_is_a_config_error() {
        let nan_config = TaskConfig {
            reward: QuadReward::Custom(RewardCallback::new(|_, _| f64::NAN)),
            ..config(1)
        };
        assert!(matches!(Task::new(Elevator::new(1), nan_config), Err(Error::Config(_))));

        let pole_config = TaskConfig {
            reward: QuadReward::Custom(RewardCallback::new(|pose, _| 1.0 / (pose[2] - 2.0))),
            ..config(1)
        };
        let mut task = Task::new(Elevator::new(100), pole_config).unwrap();
        task.reset().unwrap();
        task.step(&[0.0; 4]).unwrap();
        assert!(matches!(task.step(&[0.0; 4]), Err(Error::Config(_))));
    }

    #[test]
    fn non_finite_pose_is_an_environment_fault() {
        let mut sim = Elevator::new(100);
        sim.poison = true;
        let mut task = Task::new(sim, config(2)).unwrap();
        assert!(matches!(task.reset(), Err(Error::EnvironmentFault(_))));
        assert!(matches!(task.step(&[0.0; 4]), Err(Error::EnvironmentFault(_))));
    }
}
