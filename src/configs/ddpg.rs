use {
    crate::error::{
        Error,
        Result,
    },
    serde::{
        Deserialize,
        Serialize,
    },
};


#[allow(non_camel_case_types)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DDPG_Config {
    // The learning rates for the Actor and Critic networks
    pub actor_learning_rate: f64,
    pub critic_learning_rate: f64,
    // The impact of the q value of the next state on the current state's q value.
    pub gamma: f64,
    // The weight for updating the target networks.
    pub tau: f64,
    // The hidden layer sizes of the Actor and Critic networks.
    pub actor_hidden: Vec<usize>,
    pub critic_hidden: Vec<usize>,
    // The capacity of the replay buffer used for sampling training data.
    pub replay_buffer_capacity: usize,
    // The training batch size for each training iteration.
    pub training_batch_size: usize,
    // Ornstein-Uhlenbeck process parameters.
    pub ou_mu: f64,
    pub ou_theta: f64,
    pub ou_sigma: f64,
    // Seeds the exploration noise and the replay sampling.
    pub seed: Option<u64>,
}
impl Default for DDPG_Config {
    fn default() -> Self {
        Self::quadcopter()
    }
}
impl DDPG_Config {
    pub fn quadcopter() -> Self {
        Self {
            actor_learning_rate: 1e-3,
            critic_learning_rate: 1e-3,
            gamma: 0.99,
            tau: 0.01,
            actor_hidden: vec![32, 64, 32],
            critic_hidden: vec![32, 64],
            replay_buffer_capacity: 100_000,
            training_batch_size: 64,
            ou_mu: 0.0,
            ou_theta: 0.15,
            ou_sigma: 0.2,
            seed: None,
        }
    }

    pub fn with_seed(
        mut self,
        seed: u64,
    ) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        let fail = |msg: String| Err(Error::Config(msg));
        if !(0.0..=1.0).contains(&self.gamma) {
            return fail(format!("gamma must lie in [0, 1], got {}", self.gamma));
        }
        if !(0.0..=1.0).contains(&self.tau) {
            return fail(format!("tau must lie in [0, 1], got {}", self.tau));
        }
        if self.actor_learning_rate <= 0.0 || self.critic_learning_rate <= 0.0 {
            return fail("learning rates must be positive".to_owned());
        }
        if self.training_batch_size == 0 {
            return fail("training_batch_size must be positive".to_owned());
        }
        if self.replay_buffer_capacity <= self.training_batch_size {
            return fail(format!(
                "replay_buffer_capacity ({}) must exceed training_batch_size ({}) or learning never starts",
                self.replay_buffer_capacity, self.training_batch_size,
            ));
        }
        if self.ou_theta < 0.0 || self.ou_sigma < 0.0 {
            return fail("ou_theta and ou_sigma must be non-negative".to_owned());
        }
        Ok(())
    }
}
