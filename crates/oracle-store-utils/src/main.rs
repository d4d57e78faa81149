use std::process::ExitCode;

use eyre::WrapErr as _;
use oracle_store_utils::{
    cli::{
        self,
        Command,
    },
    config::Config,
    decode_pair,
    encode,
    simulation_log,
    telemetry,
};

fn main() -> ExitCode {
    let command = match cli::try_get() {
        Ok(command) => command,
        Err(error) => {
            let _ = error.print();
            return if error.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    if let Err(error) = run(command) {
        eprintln!("{error:?}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(command: Command) -> eyre::Result<()> {
    let config = Config::get().wrap_err("failed reading config from the environment")?;
    telemetry::init(&config.log).wrap_err("failed to setup telemetry")?;
    tracing::debug!(?config, "initialized telemetry");
    match command {
        Command::DecodePair(args) => {
            let decoder = config.decoder().wrap_err("failed to construct decoder")?;
            decode_pair::run(args, &decoder)
        }
        Command::SimulationLog(args) => {
            let decoder = config.decoder().wrap_err("failed to construct decoder")?;
            simulation_log::run(args, decoder)
        }
        Command::Encode(command) => encode::run(command),
    }
}
