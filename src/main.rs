use {
    anyhow::Result,
    candle_core::Device,
    clap::Parser,
    quadcopter_ddpg::{
        cli::Args,
        configs::ExperimentConfig,
        engines::run_experiment,
        logging::setup_logging,
        util::read_config,
    },
};

// LATER

// >- Add Cuda as a Device behind a cargo feature


fn main() -> Result<()> {
    let args = Args::parse();
    if args.log.level().is_some() {
        setup_logging(
            &format!("{}.log", args.output),
            args.log.level(),
            args.log.level(),
        )?;
    }

    let mut config: ExperimentConfig = match &args.config {
        Some(path) => read_config(path)?,
        None => Default::default(),
    };
    if let Some(episodes) = args.episodes {
        config.train.max_episodes = episodes;
    }
    if let Some(seed) = args.seed {
        config.agent.seed = Some(seed);
    }
    if let Some(granularity) = args.granularity {
        config.train.granularity = granularity;
    }

    let device = Device::Cpu;
    let log = run_experiment(&args.output, &config, &device)?;
    println!(
        "Trained for {} episodes, best return {:.3}",
        log.episode_returns.len(),
        log.best_return().unwrap_or(f64::NAN),
    );
    Ok(())
}
