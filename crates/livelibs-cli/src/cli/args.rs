use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "livelibs",
    version,
    about = "Versioned library registry with funding-gated visibility"
)]
pub struct Cli {
    /// Registry config file (YAML). Defaults to LIVELIBS_* environment variables.
    #[arg(long, global = true, env = "LIVELIBS_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run a scenario of registry operations against a fresh registry
    Run(RunArgs),
    /// Check whether a library name is accepted
    CheckName(CheckNameArgs),
    Version,
}

#[derive(clap::Args, Debug, Clone)]
pub struct RunArgs {
    /// Scenario file (YAML)
    pub scenario: PathBuf,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Write the final registry snapshot (JSON) to this path
    #[arg(long)]
    pub dump: Option<PathBuf>,
}

#[derive(clap::Args, Debug, Clone)]
pub struct CheckNameArgs {
    pub name: String,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_args() {
        let cli = Cli::try_parse_from([
            "livelibs",
            "run",
            "suite.yaml",
            "--format",
            "json",
            "--dump",
            "out.json",
        ])
        .unwrap();
        match cli.cmd {
            Command::Run(args) => {
                assert_eq!(args.scenario, PathBuf::from("suite.yaml"));
                assert_eq!(args.format, OutputFormat::Json);
                assert_eq!(args.dump, Some(PathBuf::from("out.json")));
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_global_config_flag() {
        let cli =
            Cli::try_parse_from(["livelibs", "check-name", "foo", "--config", "r.yaml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("r.yaml")));
    }
}
