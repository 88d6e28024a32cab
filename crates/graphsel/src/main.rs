mod commands;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// graphsel — type-safe GraphQL selections for Rust
#[derive(Debug, Parser)]
#[command(name = "graphsel", version, about)]
struct Cli {
    /// Output format for listings. Auto-detected if not specified (human for terminal, json for pipe).
    #[arg(long, global = true)]
    format: Option<output::Format>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate Rust selection code from a schema.
    Generate(commands::generate::GenerateCmd),
    /// List the named types of a schema and where they are generated.
    Types(commands::types::TypesCmd),
    /// Print a compact command reference.
    Usage,
}

fn main() {
    // Generation warnings go to stderr so generated code can be piped from stdout.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let format = output::Format::resolve(cli.format);

    let result = match cli.command {
        Command::Generate(cmd) => commands::generate::run(cmd),
        Command::Types(cmd) => commands::types::run(cmd, format),
        Command::Usage => {
            commands::usage::run();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
