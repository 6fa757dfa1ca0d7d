use {
    super::{
        Actor,
        Critic,
    },
    crate::{
        components::{
            soft_update,
            OuNoise,
            ReplayBuffer,
            Transition,
        },
        configs::DDPG_Config,
        envs::{
            Simulator,
            Task,
        },
        error::{
            Error,
            Result,
        },
        RunMode,
    },
    candle_core::{
        Device,
        Tensor,
    },
    tracing::info,
    unzip_n::unzip_n,
};

unzip_n!(5);

/// Reinforcement learning agent that learns using DDPG.
///
/// The agent owns four function approximators: a local actor and critic that
/// are trained every learning step, and their target copies that only ever
/// change through [`soft_update`].
#[allow(clippy::upper_case_acronyms)]
pub struct DDPG {
    actor_local: Actor,
    actor_target: Actor,
    critic_local: Critic,
    critic_target: Critic,

    gamma: f64,
    tau: f64,
    replay_buffer: ReplayBuffer,
    ou_noise: OuNoise,

    last_state: Option<Tensor>,
    learn_steps: usize,

    config: DDPG_Config,
    device: Device,
    pub run_mode: RunMode,
}

impl DDPG {
    pub fn new(
        device: &Device,
        config: &DDPG_Config,
        size_state: usize,
        size_action: usize,
        action_low: f64,
        action_high: f64,
    ) -> Result<Self> {
        config.validate()?;

        let make_actor = || {
            Actor::new(
                device,
                size_state,
                size_action,
                &config.actor_hidden,
                action_low,
                action_high,
                config.actor_learning_rate,
            )
        };
        let make_critic = || {
            Critic::new(
                device,
                size_state,
                size_action,
                &config.critic_hidden,
                config.critic_learning_rate,
            )
        };

        let actor_local = make_actor()?;
        let mut actor_target = make_actor()?;
        let critic_local = make_critic()?;
        let mut critic_target = make_critic()?;

        // this sets the target networks equal to the local ones using tau = 1.0
        soft_update(actor_local.network(), actor_target.network_mut(), 1.0)?;
        soft_update(critic_local.network(), critic_target.network_mut(), 1.0)?;

        Ok(Self {
            actor_local,
            actor_target,
            critic_local,
            critic_target,
            gamma: config.gamma,
            tau: config.tau,
            replay_buffer: ReplayBuffer::new(
                config.replay_buffer_capacity,
                config.training_batch_size,
                config.seed.map(|s| s.wrapping_add(1)),
            ),
            ou_noise: OuNoise::new(
                config.ou_mu,
                config.ou_theta,
                config.ou_sigma,
                size_action,
                config.seed,
                device,
            ),
            last_state: None,
            learn_steps: 0,
            config: config.clone(),
            device: device.clone(),
            run_mode: RunMode::Train,
        })
    }

    /// Build an agent whose state and action shapes match `task`.
    pub fn for_task<S: Simulator>(
        device: &Device,
        config: &DDPG_Config,
        task: &Task<S>,
    ) -> Result<Self> {
        Self::new(
            device,
            config,
            task.state_size(),
            task.action_size(),
            task.action_low(),
            task.action_high(),
        )
    }

    /// Start a new episode: reset the noise and the task and remember the
    /// initial state.
    pub fn reset_episode<S: Simulator>(
        &mut self,
        task: &mut Task<S>,
    ) -> Result<Tensor> {
        self.ou_noise.reset();
        let state = Tensor::new(task.reset()?, &self.device)?;
        self.last_state = Some(state.clone());
        Ok(state)
    }

    /// The action for `state` under the current policy.
    ///
    /// In [`RunMode::Train`] a fresh noise sample is added for exploration.
    pub fn act(
        &mut self,
        state: &Tensor,
    ) -> Result<Tensor> {
        // Candle assumes a batch dimension, so when we don't have one we need
        // to pretend we do by un- and resqueezing the state tensor.
        let action = self
            .actor_local
            .predict(&state.detach().unsqueeze(0)?)?
            .squeeze(0)?;
        Ok(if let RunMode::Train = self.run_mode {
            (action + self.ou_noise.sample()?)?
        } else {
            action
        })
    }

    /// Store the transition from the last state and learn once the buffer
    /// holds more than one batch.
    pub fn step(
        &mut self,
        action: &Tensor,
        reward: f64,
        next_state: &Tensor,
        done: bool,
    ) -> Result<()> {
        let state = self.last_state.as_ref().ok_or(Error::EpisodeNotStarted)?;
        info!(
            concat!(
                "\nPushing to replay buffer:",
                "\n{state:?}",
                "\n{action:?}",
                "\n{reward:?}",
                "\n{next_state:?}",
            ),
            state = state,
            action = action,
            reward = reward,
            next_state = next_state,
        );
        self.replay_buffer
            .add(Transition::new(state, action, reward, next_state, done));

        if self.replay_buffer.len() > self.replay_buffer.batch_size() {
            let experiences = self.replay_buffer.sample()?;
            self.learn(&experiences)?;
        }

        self.last_state = Some(next_state.clone());
        Ok(())
    }

    /// Update the policy and value parameters from a batch of transitions.
    pub fn learn(
        &mut self,
        experiences: &[Transition],
    ) -> Result<()> {
        let (states, actions, rewards, next_states, dones) = experiences
            .iter()
            .map(|t| {
                (
                    t.state().clone(),
                    t.action().clone(),
                    t.reward(),
                    t.next_state().clone(),
                    if t.done() { 1.0 } else { 0.0 },
                )
            })
            .unzip_n_vec();

        let states = Tensor::stack(&states, 0)?;
        let actions = Tensor::stack(&actions, 0)?;
        let next_states = Tensor::stack(&next_states, 0)?;
        let rewards = Tensor::new(rewards, &self.device)?.unsqueeze(1)?;
        let dones = Tensor::new(dones, &self.device)?.unsqueeze(1)?;

        let q_targets = self.q_targets(&rewards, &next_states, &dones)?;
        self.critic_local.train(&states, &actions, &q_targets)?;

        let action_gradients = self.critic_local.action_gradients(&states, &actions)?;
        self.actor_local.train(&states, &action_gradients)?;

        soft_update(self.critic_local.network(), self.critic_target.network_mut(), self.tau)?;
        soft_update(self.actor_local.network(), self.actor_target.network_mut(), self.tau)?;

        self.learn_steps += 1;
        Ok(())
    }

    /// `rewards + gamma * critic_target(s', actor_target(s')) * (1 - dones)`,
    /// all of shape `[batch, 1]` except `next_states`.
    pub fn q_targets(
        &self,
        rewards: &Tensor,
        next_states: &Tensor,
        dones: &Tensor,
    ) -> Result<Tensor> {
        let actions_next = self.actor_target.predict(next_states)?;
        let q_targets_next = self.critic_target.predict(next_states, &actions_next)?;

        // terminal transitions do not bootstrap
        let not_done = dones.affine(-1.0, 1.0)?;
        Ok((rewards + ((self.gamma * q_targets_next)? * not_done)?)?.detach())
    }

    pub fn config(&self) -> &DDPG_Config {
        &self.config
    }

    /// The number of completed learning steps.
    pub fn learn_steps(&self) -> usize {
        self.learn_steps
    }

    pub fn last_state(&self) -> Option<&Tensor> {
        self.last_state.as_ref()
    }

    pub fn replay_buffer(&self) -> &ReplayBuffer {
        &self.replay_buffer
    }

    pub fn noise(&self) -> &OuNoise {
        &self.ou_noise
    }

    pub fn actor_local(&self) -> &Actor {
        &self.actor_local
    }

    pub fn actor_target(&self) -> &Actor {
        &self.actor_target
    }

    pub fn critic_local(&self) -> &Critic {
        &self.critic_local
    }

    pub fn critic_target(&self) -> &Critic {
        &self.critic_target
    }
}
