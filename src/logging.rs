use {
    anyhow::Result,
    std::{
        fs::File,
        path::Path,
        sync::Arc,
    },
    tracing::Level,
    tracing_subscriber::{
        fmt::{
            layer,
            writer::MakeWriterExt,
        },
        layer::SubscriberExt,
        util::SubscriberInitExt,
    },
};

/// Install the global subscriber: a plain log file at `path` and a pretty
/// stdout layer. A missing level falls back to `INFO`.
///
/// Training at `INFO` logs every transition pushed to the replay buffer and
/// every task step, so the file grows quickly. `WARN` keeps it to one line
/// per episode.
pub fn setup_logging(
    path: &dyn AsRef<Path>,
    min_level_file: Option<Level>,
    min_level_stdout: Option<Level>,
) -> Result<()> {
    let log_file = Arc::new(File::create(path)?);

    tracing_subscriber::registry()
        .with(
            layer()
                .with_writer(log_file.with_max_level(min_level_file.unwrap_or(Level::INFO)))
                .with_ansi(false),
        )
        .with(
            layer()
                .with_writer(std::io::stdout.with_max_level(min_level_stdout.unwrap_or(Level::INFO)))
                .compact()
                .pretty()
                .with_line_number(true)
                .with_thread_ids(false)
                .with_target(false),
        )
        .try_init()?;

    Ok(())
}
