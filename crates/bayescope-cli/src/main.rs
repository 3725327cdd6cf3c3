//! bayescope CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod chart;
mod commands;

#[derive(Parser)]
#[command(name = "bayescope", version, about = "Bayesian diagnostic evidence fusion")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a diagnostic session and print the posterior trajectory
    Run {
        /// Path to a .toml session file
        #[arg(long)]
        session: PathBuf,

        /// Write a JSON report to this path
        #[arg(long)]
        output: Option<PathBuf>,

        /// Only print the final posterior
        #[arg(long)]
        quiet: bool,
    },

    /// Render a saved session report
    Show {
        /// Report JSON produced by `run --output`
        #[arg(long)]
        report: PathBuf,
    },

    /// Validate session TOML files
    Validate {
        /// Path to a session file or directory
        #[arg(long)]
        session: PathBuf,
    },

    /// Create an example session file
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("bayescope_core=info".parse().unwrap())
                .add_directive("bayescope_cli=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            session,
            output,
            quiet,
        } => commands::run::execute(session, output, quiet),
        Commands::Show { report } => commands::show::execute(report),
        Commands::Validate { session } => commands::validate::execute(session),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
