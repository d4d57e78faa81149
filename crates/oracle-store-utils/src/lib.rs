pub mod cli;
pub mod config;
pub mod decode_pair;
pub mod encode;
pub mod simulation_log;
pub mod telemetry;
