use std::path::Path;

use livelibs_registry::RegistryConfig;

use super::args::*;
use crate::exit_codes;

pub mod check_name;
pub mod run;

pub fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        Command::Run(args) => run::run(args, cli.config.as_deref()),
        Command::CheckName(args) => Ok(check_name::run(args)),
        Command::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(exit_codes::SUCCESS)
        }
    }
}

/// Explicit config file first, then `LIVELIBS_*` environment variables.
pub(crate) fn load_registry_config(path: Option<&Path>) -> anyhow::Result<RegistryConfig> {
    let config = match path {
        Some(path) => RegistryConfig::load(path)?,
        None => RegistryConfig::from_env()?,
    };
    tracing::debug!(resolution = ?config.version_resolution, "loaded registry config");
    Ok(config)
}
