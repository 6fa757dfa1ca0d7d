use {
    crate::{
        components::{
            Network,
            NetworkConfig,
            OutputTransform,
        },
        error::Result,
    },
    candle_core::{
        Device,
        Tensor,
    },
    candle_nn::{
        AdamW,
        Optimizer,
        ParamsAdamW,
    },
};

/// Actor (policy) model, mapping states to actions in
/// `[action_low, action_high]`.
pub struct Actor {
    network: Network,
    optimizer: AdamW,
}

impl Actor {
    pub fn new(
        device: &Device,
        size_state: usize,
        size_action: usize,
        hidden: &[usize],
        action_low: f64,
        action_high: f64,
        learning_rate: f64,
    ) -> Result<Self> {
        let network = Network::new(
            &NetworkConfig {
                input_dim: size_state,
                hidden: hidden.to_vec(),
                output_dim: size_action,
                transform: OutputTransform::ScaledSigmoid {
                    low: action_low,
                    high: action_high,
                },
            },
            device,
        )?;
        let optimizer = AdamW::new(
            network.vars(),
            ParamsAdamW {
                lr: learning_rate,
                weight_decay: 0.0,
                ..Default::default()
            },
        )?;
        Ok(Self { network, optimizer })
    }

    /// Actions for a `[batch, size_state]` batch of states.
    pub fn predict(
        &self,
        states: &Tensor,
    ) -> Result<Tensor> {
        self.network.forward(states)
    }

    /// One step of the deterministic policy gradient.
    ///
    /// Minimises `-mean(action_gradients * actor(states))`, which moves the
    /// actions in the direction in which the critic's value increases.
    pub fn train(
        &mut self,
        states: &Tensor,
        action_gradients: &Tensor,
    ) -> Result<()> {
        let actions = self.network.forward(states)?;
        let loss = (action_gradients.detach() * actions)?.mean_all()?.neg()?;
        self.optimizer.backward_step(&loss)?;
        Ok(())
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub(super) fn network_mut(&mut self) -> &mut Network {
        &mut self.network
    }
}
