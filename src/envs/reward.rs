use {
    serde::{
        Deserialize,
        Serialize,
    },
    std::{
        fmt::Debug,
        sync::Arc,
    },
    strum::Display,
};

/// A user supplied reward function `(pose, target) -> reward`.
#[derive(Clone)]
pub struct RewardCallback(Arc<dyn Fn(&[f64; 6], &[f64; 3]) -> f64 + Send + Sync>);
impl RewardCallback {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[f64; 6], &[f64; 3]) -> f64 + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }
}
impl Debug for RewardCallback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RewardCallback")
    }
}

/// The reward functions for the [`Task`](super::Task) wrapper.
///
/// Every variant is a pure function of the current pose and the target
/// position. Only the position part (`pose[..3]`) of the pose is used by the
/// built-in variants.
#[derive(Debug, Clone, Serialize, Deserialize, Display)]
pub enum QuadReward {
    /// `bonus - scale * sum(|pose_xyz - target|)`
    Manhattan { bonus: f64, scale: f64 },
    /// `bonus - scale * ||pose_xyz - target||`
    Euclidean { bonus: f64, scale: f64 },
    /// `tanh(bonus - scale * sum(|pose_xyz - target|))`, bounded to `[-1, 1]`.
    Tanh { bonus: f64, scale: f64 },
    /// A typed callback. Cannot be written to or read from a config file.
    #[serde(skip)]
    Custom(RewardCallback),
}
impl Default for QuadReward {
    fn default() -> Self {
        QuadReward::Manhattan { bonus: 1.0, scale: 0.3 }
    }
}
impl PartialEq for QuadReward {
    fn eq(&self, other: &Self) -> bool {
        use QuadReward::*;
        match (self, other) {
            (Manhattan { bonus: b1, scale: s1 }, Manhattan { bonus: b2, scale: s2 })
            | (Euclidean { bonus: b1, scale: s1 }, Euclidean { bonus: b2, scale: s2 })
            | (Tanh { bonus: b1, scale: s1 }, Tanh { bonus: b2, scale: s2 }) => b1 == b2 && s1 == s2,
            (Custom(f1), Custom(f2)) => Arc::ptr_eq(&f1.0, &f2.0),
            _ => false,
        }
    }
}
impl QuadReward {
    pub fn compute(
        &self,
        pose: &[f64; 6],
        target: &[f64; 3],
    ) -> f64 {
        let offsets = pose[..3].iter().zip(target).map(|(p, t)| p - t);
        match self {
            QuadReward::Manhattan { bonus, scale } => {
                bonus - scale * offsets.map(f64::abs).sum::<f64>()
            }
            QuadReward::Euclidean { bonus, scale } => {
                bonus - scale * offsets.map(|d| d * d).sum::<f64>().sqrt()
            }
            QuadReward::Tanh { bonus, scale } => {
                (bonus - scale * offsets.map(f64::abs).sum::<f64>()).tanh()
            }
            QuadReward::Custom(RewardCallback(f)) => f(pose, target),
        }
    }
}
