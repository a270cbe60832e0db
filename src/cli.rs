use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct FormArgs {
    /// Parser description of the tool (TOML)
    pub description: PathBuf,

    /// TOML file of `option = value` pairs used instead of the declared defaults
    #[clap(short, long)]
    pub initial: Option<PathBuf>,

    /// Number of grid columns per option group
    #[clap(short, long, env = "ARGFORM_COLUMNS", default_value_t = 3)]
    pub columns: usize,

    /// Print the parsed result and arguments as JSON instead of a command line
    #[clap(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactively assembles a command line for the described tool
    Form(FormArgs),
    /// Prints the command line implied by the defaults and initial values
    Preview(FormArgs),
    /// Prints the layout of the form without showing it
    Inspect(FormArgs),
}

#[derive(Parser, Debug)]
#[clap(author, version, about)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}
