use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "drs-filer",
    about = "DRS object registry: serve the API and inspect its configuration",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the DRS server
    Serve(ServeArgs),
    /// Generate random identifiers from a charset expression
    GenId(GenIdArgs),
    /// Parse and validate a configuration file
    CheckConfig(CheckConfigArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// TOML configuration file; built-in defaults when omitted
    #[arg(short, long)]
    pub config: Option<String>,
}

#[derive(Args)]
pub struct GenIdArgs {
    /// Charset expression, e.g. "string.ascii_letters + string.digits"
    #[arg(long, default_value = "string.ascii_letters + string.digits")]
    pub charset: String,
    #[arg(short, long, default_value_t = 6)]
    pub length: usize,
    #[arg(short = 'n', long, default_value_t = 1)]
    pub count: usize,
}

#[derive(Args)]
pub struct CheckConfigArgs {
    #[arg(short, long)]
    pub config: String,
}
