//! Point d'entrée CLI pour hk-parcels

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};

use hk_parcels::cli::{self, Commands};

/// Convertir les parcelles cadastrales de Hong Kong (EPSG:2326) vers WGS84
#[derive(Parser)]
#[command(name = "hk-parcels")]
#[command(version)]
#[command(about = "Convertir un GeoJSON de parcelles EPSG:2326 vers WGS84")]
struct Cli {
    /// Augmenter la verbosité (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Mode silencieux
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Convert(args) => {
            info!(
                input = %args.input.display(),
                output = %args.output.display(),
                "Conversion vers WGS84"
            );
            cli::cmd_convert(&args)?;
        }
        Commands::Inspect { input } => {
            cli::cmd_inspect(&input)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::WARN,
        (_, 0) => Level::INFO,
        (_, 1) => Level::DEBUG,
        (_, _) => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .init();
}
