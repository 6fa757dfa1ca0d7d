mod ddpg;
mod task;
mod train;

pub use ddpg::DDPG_Config;
pub use task::TaskConfig;
pub use train::{
    LogGranularity,
    TrainConfig,
};

use {
    crate::error::Result,
    serde::{
        Deserialize,
        Serialize,
    },
};


/// Everything needed to start a training run, as stored in a RON file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    pub task: TaskConfig,
    pub agent: DDPG_Config,
    pub train: TrainConfig,
}
impl ExperimentConfig {
    pub fn validate(&self) -> Result<()> {
        self.task.validate()?;
        self.agent.validate()
    }
}


#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::envs::QuadReward,
    };

    #[test]
    fn ron_round_trip() {
        let config = ExperimentConfig {
            task: TaskConfig {
                reward: QuadReward::Euclidean { bonus: 2.0, scale: 0.5 },
                ..TaskConfig::takeoff()
            },
            agent: DDPG_Config::default().with_seed(3),
            train: TrainConfig::new(7, LogGranularity::Step),
        };
        let text = ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::default()).unwrap();
        let back: ExperimentConfig = ron::from_str(&text).unwrap();

        assert_eq!(back.task.init_pose, [0.0; 6]);
        assert_eq!(back.task.reward, config.task.reward);
        assert_eq!(back.agent, config.agent);
        assert_eq!(back.train.max_episodes, 7);
        assert_eq!(back.train.granularity, LogGranularity::Step);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let back: ExperimentConfig = ron::from_str("(train: (max_episodes: 3))").unwrap();
        assert_eq!(back.train.max_episodes, 3);
        assert_eq!(back.agent, DDPG_Config::default());
        back.validate().unwrap();
    }
}
