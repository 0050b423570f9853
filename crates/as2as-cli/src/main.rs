use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;
mod config;
mod report;

use commands::convert::ConvertOptions;
use config::{Config, FailurePolicy, OutputFormat};

#[derive(Parser)]
#[command(
    name = "as2as",
    about = "Migrate PCF autoscaler configuration to OCF autoscaler policies",
    version,
    propagate_version = true,
)]
struct Cli {
    /// Config file (default: as2as.toml in the working directory, if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a dump document from raw autoscaler API records
    Assemble {
        /// Scrape document, or `-` for stdin
        #[arg(short, long, default_value = "-")]
        input: String,
        /// Write here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Convert a dump document into target policies.
    ///
    /// Flags override values from the config file.
    Convert {
        /// Dump document, or `-` for stdin
        #[arg(short, long, default_value = "-")]
        input: String,
        /// Write here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
        /// What to do with an app that can't be converted
        #[arg(long, value_enum)]
        on_error: Option<FailurePolicy>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("as2as=info".parse()?)
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Assemble { input, output } => {
            commands::assemble::run(&input, output.as_deref())
        }
        Commands::Convert { input, output, format, on_error } => {
            let options = ConvertOptions {
                on_error: on_error.or(config.on_error()).unwrap_or_default(),
                cool_down_secs: config.cool_down_secs(),
                breach_duration_secs: config.breach_duration_secs(),
            };
            let format = format.or(config.format()).unwrap_or_default();
            commands::convert::run(&input, output.as_deref(), format, &options)
        }
    }
}
