use {
    super::{
        LogRecord,
        TrainingLog,
    },
    crate::{
        agents::DDPG,
        configs::{
            LogGranularity,
            TrainConfig,
        },
        envs::{
            Simulator,
            Task,
        },
        RunMode,
    },
    anyhow::Result,
    candle_core::Tensor,
    std::io::Write,
    tracing::warn,
};


/// Train a single run of `agent` on `task`.
///
/// # Arguments
///
/// * `task` - The task to train on.
/// * `agent` - The agent to train, its run mode is set from `config`.
/// * `config` - The number of episodes, log granularity and run mode.
/// * `sink` - Where to stream the log records as CSV rows, if anywhere.
pub fn train<S, W>(
    task: &mut Task<S>,
    agent: &mut DDPG,
    config: &TrainConfig,
    mut sink: Option<&mut csv::Writer<W>>,
) -> Result<TrainingLog>
where
    S: Simulator,
    W: Write,
{
    warn!("state size: {}", task.state_size());
    warn!("action size: {}", task.action_size());

    agent.run_mode = config.run_mode;
    let mut log = TrainingLog::default();

    for episode in 1..=config.max_episodes {
        let mut state = agent.reset_episode(task)?;
        let mut cumulative_reward = 0.0;

        loop {
            let action = agent.act(&state)?;
            let rotor_speeds = task.rotor_speeds(&action.to_vec1::<f64>()?)?;
            let step = task.step(&rotor_speeds)?;
            let next_state = Tensor::new(step.next_state.as_slice(), state.device())?;

            if let RunMode::Train = agent.run_mode {
                agent.step(&action, step.reward, &next_state, step.done)?;
            }

            let records = match config.granularity {
                LogGranularity::Tick => step
                    .ticks
                    .iter()
                    .map(|tick| {
                        cumulative_reward += tick.reward;
                        LogRecord::new(episode, tick, rotor_speeds, tick.reward, cumulative_reward)
                    })
                    .collect::<Vec<_>>(),
                LogGranularity::Step => {
                    cumulative_reward += step.reward;
                    step.ticks
                        .last()
                        .map(|tick| LogRecord::new(episode, tick, rotor_speeds, step.reward, cumulative_reward))
                        .into_iter()
                        .collect::<Vec<_>>()
                },
            };
            if let Some(writer) = sink.as_deref_mut() {
                for record in &records {
                    record.write_csv(writer)?;
                }
            }
            log.records.extend(records);

            state = next_state;
            if step.done {
                break;
            }
        }

        if let Some(writer) = sink.as_deref_mut() {
            writer.flush()?;
        }
        log.episode_returns.push(cumulative_reward);
        warn!(
            "episode {episode} with total reward of {cumulative_reward}, best so far {}",
            log.best_return().unwrap_or(cumulative_reward),
        );
    }
    Ok(log)
}
