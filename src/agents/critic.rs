use {
    crate::{
        components::{
            Network,
            NetworkConfig,
            OutputTransform,
        },
        error::{
            Error,
            Result,
        },
    },
    candle_core::{
        Device,
        Tensor,
        Var,
    },
    candle_nn::{
        AdamW,
        Optimizer,
        ParamsAdamW,
    },
};

/// Critic (value) model, mapping `(state, action)` pairs to Q-values.
pub struct Critic {
    network: Network,
    optimizer: AdamW,
}

impl Critic {
    pub fn new(
        device: &Device,
        size_state: usize,
        size_action: usize,
        hidden: &[usize],
        learning_rate: f64,
    ) -> Result<Self> {
        let network = Network::new(
            &NetworkConfig {
                input_dim: size_state + size_action,
                hidden: hidden.to_vec(),
                output_dim: 1,
                transform: OutputTransform::Identity,
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

    /// Q-values of shape `[batch, 1]`.
    pub fn predict(
        &self,
        states: &Tensor,
        actions: &Tensor,
    ) -> Result<Tensor> {
        let xs = Tensor::cat(&[actions, states], 1)?;
        self.network.forward(&xs)
    }

    /// One step on the mean squared error between the predicted Q-values and
    /// `q_targets`.
    pub fn train(
        &mut self,
        states: &Tensor,
        actions: &Tensor,
        q_targets: &Tensor,
    ) -> Result<()> {
        let q = self.predict(states, actions)?;
        let loss = (q - q_targets.detach())?.sqr()?.mean_all()?;
        self.optimizer.backward_step(&loss)?;
        Ok(())
    }

    /// The gradient of Q with respect to the action input, `[batch, size_action]`.
    pub fn action_gradients(
        &self,
        states: &Tensor,
        actions: &Tensor,
    ) -> Result<Tensor> {
        let actions = Var::from_tensor(&actions.detach())?;
        let q = self.predict(&states.detach(), actions.as_tensor())?;
        let grads = q.sum_all()?.backward()?;
        let gradient = grads
            .get(actions.as_tensor())
            .ok_or_else(|| Error::Candle(candle_core::Error::Msg("no gradient for the action input".to_owned())))?;
        Ok(gradient.detach())
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub(super) fn network_mut(&mut self) -> &mut Network {
        &mut self.network
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn batch() -> (Tensor, Tensor) {
        let states = Tensor::new(&[[0.1f64, 0.2, 0.3], [1.0, -1.0, 0.5], [0.0, 0.0, 0.0]], &Device::Cpu).unwrap();
        let actions = Tensor::new(&[[0.5f64, 0.5], [-0.2, 0.9], [0.0, 1.0]], &Device::Cpu).unwrap();
        (states, actions)
    }

    #[test]
    fn q_has_one_column() {
        let critic = Critic::new(&Device::Cpu, 3, 2, &[32, 64], 1e-3).unwrap();
        let (states, actions) = batch();
        assert_eq!(critic.predict(&states, &actions).unwrap().dims(), &[3, 1]);
    }

    #[test]
    fn training_reduces_the_error() {
        let mut critic = Critic::new(&Device::Cpu, 3, 2, &[32], 1e-2).unwrap();
        let (states, actions) = batch();
        let targets = Tensor::new(&[[1.0f64], [-2.0], [0.5]], &Device::Cpu).unwrap();
        let mse = |critic: &Critic| {
            (critic.predict(&states, &actions).unwrap() - &targets)
                .unwrap()
                .sqr()
                .unwrap()
                .mean_all()
                .unwrap()
                .to_scalar::<f64>()
                .unwrap()
        };

        let before = mse(&critic);
        for _ in 0..50 {
            critic.train(&states, &actions, &targets).unwrap();
        }
        assert!(mse(&critic) < before);
    }

    #[test]
    fn action_gradients_match_finite_differences() {
        let critic = Critic::new(&Device::Cpu, 3, 2, &[8], 1e-3).unwrap();
        let (states, actions) = batch();
        let gradients = critic.action_gradients(&states, &actions).unwrap();
        assert_eq!(gradients.dims(), &[3, 2]);
        let gradients = gradients.to_vec2::<f64>().unwrap();

        let eps = 1e-6;
        let base = actions.to_vec2::<f64>().unwrap();
        let q = |a: &Vec<Vec<f64>>| {
            let a = Tensor::new(a.concat(), &Device::Cpu).unwrap().reshape((3, 2)).unwrap();
            critic.predict(&states, &a).unwrap().to_vec2::<f64>().unwrap()
        };
        let q0 = q(&base);
        for row in 0..3 {
            for col in 0..2 {
                let mut shifted = base.clone();
                shifted[row][col] += eps;
                let numeric = (q(&shifted)[row][0] - q0[row][0]) / eps;
                assert!(
                    (numeric - gradients[row][col]).abs() < 1e-4,
                    "row {row} col {col}: {numeric} vs {}",
                    gradients[row][col],
                );
            }
        }
    }

    #[test]
    fn action_gradients_do_not_touch_parameters() {
        let critic = Critic::new(&Device::Cpu, 3, 2, &[8], 1e-3).unwrap();
        let (states, actions) = batch();
        let before = critic.network().parameters().unwrap();
        critic.action_gradients(&states, &actions).unwrap();
        let after = critic.network().parameters().unwrap();
        for (name, t) in before {
            let diff = (t - &after[&name]).unwrap().abs().unwrap().sum_all().unwrap();
            assert_eq!(diff.to_scalar::<f64>().unwrap(), 0.0);
        }
    }
}
