use tracing_subscriber::{
    filter::{
        EnvFilter,
        ParseError,
    },
    fmt,
    layer::SubscriberExt as _,
    registry,
    util::{
        SubscriberInitExt as _,
        TryInitError,
    },
};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid log directive")]
    InvalidLogDirective(#[from] ParseError),
    #[error("failed to initialize subscriber")]
    TryInitError(#[from] TryInitError),
}

/// Installs a global subscriber writing human readable events to stderr.
///
/// Stdout is reserved for command output.
///
/// # Errors
/// Returns an error if `log` is not a valid filter directive or if a global subscriber was
/// already set.
pub fn init(log: &str) -> Result<(), Error> {
    let env_filter = EnvFilter::try_new(log)?;
    registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .try_init()?;
    Ok(())
}
