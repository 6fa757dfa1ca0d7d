use {
    crate::RunMode,
    clap::ValueEnum,
    serde::{
        Deserialize,
        Serialize,
    },
    strum::{
        Display,
        EnumIter,
    },
};

/// How many log records one call to [`Task::step`](crate::envs::Task::step)
/// produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter, ValueEnum)]
pub enum LogGranularity {
    /// One record per simulator timestep, with that timestep's reward.
    Tick,
    /// One record per agent step: the state after the last repeated
    /// timestep and the reward summed over all of them.
    Step,
}


#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    // The total number of episodes.
    pub max_episodes: usize,
    // The granularity of the per-step log records.
    pub granularity: LogGranularity,
    // Explore with noise and learn (Train), or act greedily (Test).
    pub run_mode: RunMode,
}
impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            max_episodes: 50,
            granularity: LogGranularity::Tick,
            run_mode: RunMode::Train,
        }
    }
}
impl TrainConfig {
    pub fn new(
        max_episodes: usize,
        granularity: LogGranularity,
    ) -> Self {
        Self {
            max_episodes,
            granularity,
            ..Default::default()
        }
    }
}
