mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "avc")]
#[command(version, about = "Asset Valuation Checker CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate an asset sheet and export it with flagged cells highlighted
    Validate {
        /// Path to the sheet (xlsx, xls, xlsb, ods or csv)
        file: String,

        /// Validation profile: all, final_value_only, mandatory_only, dates_only
        #[arg(short, long, default_value = "all")]
        profile: String,

        /// Output file (xlsx or csv); defaults to the configured output name
        #[arg(short, long)]
        output: Option<String>,

        /// Export configuration file (YAML or TOML)
        #[arg(short, long)]
        config: Option<String>,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Check that a sheet has every expected column
    Check {
        /// Path to the sheet (xlsx, xls, xlsb, ods or csv)
        file: String,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Sum the final_value column
    Sum {
        /// Path to the sheet (xlsx, xls, xlsb, ods or csv)
        file: String,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    // Execute command
    match cli.command {
        Commands::Validate {
            file,
            profile,
            output,
            config,
            format,
        } => commands::validate::execute(
            &file,
            &profile,
            output.as_deref(),
            config.as_deref(),
            &format,
        ),

        Commands::Check { file, format } => commands::check::execute(&file, &format),

        Commands::Sum { file, format } => commands::sum::execute(&file, &format),
    }
}
