use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "cupmate", version, about = "CupMate hydration tracker CLI")]
struct Cli {
    /// Use this config file instead of ~/.config/cupmate/config.toml
    #[arg(long, global = true, env = "CUPMATE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the progress ring for given intake amounts
    Ring(commands::ring::RingArgs),
    /// Preview today's reminder times
    Remind(commands::remind::RemindArgs),
    /// Interactive in-memory session read from stdin
    Session,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("CUPMATE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();

    let cli = Cli::parse();
    let config_path = cli.config.as_deref();
    let result = match cli.command {
        Commands::Ring(args) => commands::ring::run(args, config_path),
        Commands::Remind(args) => commands::remind::run(args, config_path),
        Commands::Session => commands::session::run(config_path),
        Commands::Config { action } => commands::config::run(action, config_path),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "cupmate", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
