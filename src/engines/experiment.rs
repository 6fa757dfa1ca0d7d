use {
    super::{
        record::write_csv_header,
        train,
        TrainingLog,
    },
    crate::{
        agents::DDPG,
        configs::ExperimentConfig,
        envs::Task,
        util::write_config,
    },
    anyhow::{
        anyhow,
        Result,
    },
    candle_core::Device,
    polars::prelude::ParquetWriter,
    std::{
        fs::{
            create_dir_all,
            File,
        },
        path::{
            Path,
            PathBuf,
        },
    },
    tracing::warn,
};

/// Run a full training experiment and store everything under `data/<path>`.
///
/// The directory receives the three configuration files, the streamed
/// `data.csv` log and the same log as `data.parquet`.
///
/// # Arguments
///
/// * `path` - The name of the directory under `data/` to write to.
/// * `config` - The task, agent and training configuration.
/// * `device` - The device to run the experiment on.
pub fn run_experiment(
    path: &dyn AsRef<Path>,
    config: &ExperimentConfig,
    device: &Device,
) -> Result<TrainingLog> {
    run_experiment_in(Path::new("data/").join(path), config, device)
}

/// Like [`run_experiment`], but write to `path` as given.
pub fn run_experiment_in(
    path: PathBuf,
    config: &ExperimentConfig,
    device: &Device,
) -> Result<TrainingLog> {
    config.validate()?;

    for name in ["config_task.ron", "config_algorithm.ron", "config_training.ron"] {
        if path.join(name).try_exists()? {
            Err(anyhow!(concat!(
                "Config files already exist in this directory!\n",
                "I am assuming I would be overwriting existing data!",
            )))?
        }
    }

    let mut task = Task::from_config(config.task.clone())?;
    let mut agent = DDPG::for_task(device, &config.agent, &task)?;

    create_dir_all(path.as_path())?;
    write_config(task.config(), path.join("config_task.ron"))?;
    write_config(agent.config(), path.join("config_algorithm.ron"))?;
    write_config(&config.train, path.join("config_training.ron"))?;

    let mut writer = csv::Writer::from_path(path.join("data.csv"))?;
    write_csv_header(&mut writer)?;

    warn!("Collecting data into {}", path.display());
    let log = train(&mut task, &mut agent, &config.train, Some(&mut writer))?;
    writer.flush()?;

    let mut df = log.to_dataframe()?;
    ParquetWriter::new(File::create(path.join("data.parquet"))?).finish(&mut df)?;

    warn!(
        "Finished {} episodes, best return {:?}",
        log.episode_returns.len(),
        log.best_return(),
    );
    Ok(log)
}
