use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "cs-cli")]
#[command(about = "Patch a LightBurn flyer stack template from a parameter table")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Mode,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Mode {
    Run(RunArgs),
    Inspect(InspectArgs),
}

#[derive(Debug, Args)]
pub(crate) struct RunArgs {
    /// Parameter table (.csv, .xlsx, .xls, .xlsm, .ods), columns A:E.
    pub(crate) dataset: String,
    /// Run config JSON.
    pub(crate) config: String,
    #[arg(long = "dry-run")]
    pub(crate) dry_run: bool,
}

#[derive(Debug, Args)]
pub(crate) struct InspectArgs {
    pub(crate) template: String,
    #[arg(long = "prefix", default_value = "F")]
    pub(crate) prefix: String,
    #[arg(long = "start", default_value_t = 1)]
    pub(crate) start: i64,
}
