use {
    candle_core::Device,
    quadcopter_ddpg::{
        configs::{
            DDPG_Config,
            ExperimentConfig,
            LogGranularity,
            TaskConfig,
            TrainConfig,
        },
        engines::{
            run_experiment_in,
            LABELS,
        },
        util::read_config,
    },
    std::fs::read_to_string,
    tempdir::TempDir,
};

fn small_experiment(granularity: LogGranularity) -> ExperimentConfig {
    ExperimentConfig {
        task: TaskConfig {
            runtime: 0.3,
            ..TaskConfig::hover()
        },
        agent: DDPG_Config {
            actor_hidden: vec![8],
            critic_hidden: vec![8],
            replay_buffer_capacity: 1000,
            training_batch_size: 4,
            ..DDPG_Config::quadcopter().with_seed(1)
        },
        train: TrainConfig::new(2, granularity),
    }
}

#[test]
fn experiment_writes_configs_and_data() {
    let dir = TempDir::new("experiment").unwrap();
    let path = dir.path().join("run");
    let config = small_experiment(LogGranularity::Tick);
    let log = run_experiment_in(path.clone(), &config, &Device::Cpu).unwrap();

    assert_eq!(log.episode_returns.len(), 2);
    assert!(!log.records.is_empty());
    // one record per simulator timestep
    assert!(log.records.len() >= 2 * 15);

    let csv = read_to_string(path.join("data.csv")).unwrap();
    let lines = csv.lines().collect::<Vec<_>>();
    assert_eq!(lines[0], LABELS.join(","));
    assert_eq!(lines.len(), log.records.len() + 1);
    assert!(lines[1..].iter().all(|line| line.split(',').count() == LABELS.len()));
    assert!(path.join("data.parquet").exists());

    let task: TaskConfig = read_config(path.join("config_task.ron")).unwrap();
    assert_eq!(task.runtime, 0.3);
    let agent: DDPG_Config = read_config(path.join("config_algorithm.ron")).unwrap();
    assert_eq!(agent, config.agent);
    let train: TrainConfig = read_config(path.join("config_training.ron")).unwrap();
    assert_eq!(train.max_episodes, 2);

    // the cumulative reward of each episode's last record is its return
    for (episode, ret) in log.episode_returns.iter().enumerate() {
        let last = log
            .records
            .iter()
            .filter(|r| r.episode == episode + 1)
            .last()
            .unwrap();
        assert!((last.cumulative_reward - ret).abs() < 1e-9);
    }
}

#[test]
fn step_granularity_logs_one_record_per_step() {
    let dir = TempDir::new("experiment").unwrap();
    let tick = run_experiment_in(dir.path().join("tick"), &small_experiment(LogGranularity::Tick), &Device::Cpu).unwrap();
    let step = run_experiment_in(dir.path().join("step"), &small_experiment(LogGranularity::Step), &Device::Cpu).unwrap();

    let repeat = TaskConfig::hover().action_repeat;
    assert_eq!(tick.records.len(), repeat * step.records.len());
    assert_eq!(step.to_dataframe().unwrap().width(), 20);
}

#[test]
fn existing_configs_are_not_overwritten() {
    let dir = TempDir::new("experiment").unwrap();
    let path = dir.path().join("run");
    let config = small_experiment(LogGranularity::Step);
    run_experiment_in(path.clone(), &config, &Device::Cpu).unwrap();
    assert!(run_experiment_in(path, &config, &Device::Cpu).is_err());
}
