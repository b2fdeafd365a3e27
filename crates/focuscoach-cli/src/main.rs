use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "focuscoach", version, about = "Focuscoach procrastination risk CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Behavior event recording
    Event {
        #[command(subcommand)]
        action: commands::event::EventAction,
    },
    /// Task snapshot recording
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Analyze the current procrastination risk
    Analyze(commands::analyze::AnalyzeArgs),
    /// Pattern score management
    Patterns {
        #[command(subcommand)]
        action: commands::patterns::PatternsAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        shell: clap_complete::Shell,
    },
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("FOCUSCOACH_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Event { action } => commands::event::run(action),
        Commands::Task { action } => commands::task::run(action),
        Commands::Analyze(args) => commands::analyze::run(args),
        Commands::Patterns { action } => commands::patterns::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            commands::completions::run::<Cli>(shell);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
