use {
    crate::error::Result,
    candle_core::{
        Device,
        Tensor,
    },
    rand::{
        rngs::StdRng,
        Rng,
        SeedableRng,
    },
    rand_distr::StandardNormal,
};

/// Ornstein-Uhlenbeck process producing temporally correlated exploration
/// noise.
///
/// Every call to [`OuNoise::sample`] moves the internal state by
/// `theta * (mu - x) + sigma * N(0, 1)`, so consecutive samples depend on
/// each other.
pub struct OuNoise {
    mu: f64,
    theta: f64,
    sigma: f64,
    state: Vec<f64>,
    rng: StdRng,
    device: Device,
}
impl OuNoise {
    /// Create a new process of dimension `size_action` whose state starts at
    /// `mu`. Pass a `seed` to make the Gaussian draws reproducible.
    pub fn new(
        mu: f64,
        theta: f64,
        sigma: f64,
        size_action: usize,
        seed: Option<u64>,
        device: &Device,
    ) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            mu,
            theta,
            sigma,
            state: vec![mu; size_action],
            rng,
            device: device.clone(),
        }
    }

    /// Reset the internal state to the mean.
    pub fn reset(&mut self) {
        self.state.iter_mut().for_each(|x| *x = self.mu);
    }

    /// Advance the process by one step and return the new state.
    pub fn sample(&mut self) -> Result<Tensor> {
        for x in self.state.iter_mut() {
            let eps: f64 = self.rng.sample(StandardNormal);
            *x += self.theta * (self.mu - *x) + self.sigma * eps;
        }
        Ok(Tensor::new(self.state.as_slice(), &self.device)?)
    }

    pub fn state(&self) -> &[f64] {
        &self.state
    }

    pub fn mu(&self) -> f64 {
        self.mu
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_and_resets_at_mu() {
        let mut noise = OuNoise::new(0.5, 0.15, 0.2, 4, Some(7), &Device::Cpu);
        assert_eq!(noise.state(), &[0.5; 4]);

        for _ in 0..10 {
            noise.sample().unwrap();
        }
        assert_ne!(noise.state(), &[0.5; 4]);

        noise.reset();
        assert_eq!(noise.state(), &[0.5; 4]);
    }

    #[test]
    fn sample_returns_the_new_state() {
        let mut noise = OuNoise::new(0.0, 0.15, 0.2, 3, Some(1), &Device::Cpu);
        let sample = noise.sample().unwrap().to_vec1::<f64>().unwrap();
        assert_eq!(sample.as_slice(), noise.state());
    }

    #[test]
    fn same_seed_same_noise() {
        let mut a = OuNoise::new(0.0, 0.15, 0.2, 4, Some(42), &Device::Cpu);
        let mut b = OuNoise::new(0.0, 0.15, 0.2, 4, Some(42), &Device::Cpu);
        for _ in 0..5 {
            a.sample().unwrap();
            b.sample().unwrap();
        }
        assert_eq!(a.state(), b.state());
    }

    #[test]
    fn zero_sigma_reverts_deterministically() {
        let mut noise = OuNoise::new(1.0, 0.5, 0.0, 2, Some(0), &Device::Cpu);
        noise.state = vec![3.0, -1.0];
        noise.sample().unwrap();
        // x + 0.5 * (1 - x)
        assert_eq!(noise.state(), &[2.0, 0.0]);
    }

    #[test]
    fn empirical_mean_approaches_mu() {
        let mu = 2.0;
        let mut noise = OuNoise::new(mu, 0.15, 0.2, 1, Some(3), &Device::Cpu);
        noise.state = vec![10.0];

        // let the process forget its starting point
        for _ in 0..200 {
            noise.sample().unwrap();
        }
        let n = 20_000;
        let mean = (0..n)
            .map(|_| {
                noise.sample().unwrap();
                noise.state()[0]
            })
            .sum::<f64>()
            / n as f64;

        assert!((mean - mu).abs() < 0.1, "mean {mean} too far from {mu}");
    }
}
