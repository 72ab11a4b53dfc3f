use clap::{Parser, Subcommand};

mod commands;
mod logging;
mod terminal;

#[derive(Parser)]
#[command(
    name = "nudger",
    version,
    about = "Randomized productivity reminders",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Options for the default `run` command
    #[command(flatten)]
    run: commands::run::RunArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the reminder loop until Ctrl-C (default)
    Run(commands::run::RunArgs),
    /// Validate a configuration file
    Check(commands::check::CheckArgs),
    /// Write an example configuration file
    Init(commands::init::InitArgs),
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command.unwrap_or(Commands::Run(cli.run)) {
        Commands::Run(args) => commands::run::run(args),
        Commands::Check(args) => commands::check::run(args),
        Commands::Init(args) => commands::init::run(args),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
