use {
    crate::configs::LogGranularity,
    clap::{
        Parser,
        ValueEnum,
    },
    std::path::PathBuf,
    tracing::Level,
};


#[derive(ValueEnum, Debug, Clone)]
pub enum Loglevel {
    Error, // put these only during active debugging and then downgrade later
    Warn,  // main events in the program
    Info,  // all the little details
    None,  // don't log anything
}
impl Loglevel {
    pub fn level(&self) -> Option<Level> {
        match self {
            Loglevel::Error => Some(Level::ERROR),
            Loglevel::Warn => Some(Level::WARN),
            Loglevel::Info => Some(Level::INFO),
            Loglevel::None => None,
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Experiment config (RON) to start from, defaults are used otherwise.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override the number of episodes.
    #[arg(long)]
    pub episodes: Option<usize>,

    /// Seed the exploration noise and the replay buffer.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Name of the directory under data/ to write the results to.
    #[arg(long, default_value = "quadcopter")]
    pub output: String,

    /// Override the log record granularity.
    #[arg(long, value_enum)]
    pub granularity: Option<LogGranularity>,

    /// Setup logging
    #[arg(long, value_enum, default_value_t=Loglevel::None)]
    pub log: Loglevel,
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::parse_from(["quadcopter_ddpg"]);
        assert!(args.config.is_none());
        assert_eq!(args.output, "quadcopter");
        assert!(args.log.level().is_none());
    }

    #[test]
    fn overrides() {
        let args = Args::parse_from([
            "quadcopter_ddpg",
            "--episodes",
            "3",
            "--seed",
            "42",
            "--granularity",
            "step",
            "--log",
            "warn",
        ]);
        assert_eq!(args.episodes, Some(3));
        assert_eq!(args.seed, Some(42));
        assert_eq!(args.granularity, Some(LogGranularity::Step));
        assert_eq!(args.log.level(), Some(Level::WARN));
    }
}
