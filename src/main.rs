//! recipe-reader - jump from recipe pages to their print-friendly variant and back

use clap::Parser;
use tracing_subscriber::EnvFilter;

use recipe_reader::cli::{Cli, Commands};
use recipe_reader::error::Result;

mod commands;
mod utils;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        if let Some(hint) = e.hint() {
            eprintln!("\n{}", hint);
        }
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("recipe_reader=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::CheckUrl { url } => commands::cmd_check_url(&url),
        Commands::Classify { html, json } => commands::cmd_classify(&html, json),
        Commands::Locate { url, html, json } => commands::cmd_locate(&url, &html, json),
        Commands::Replay { scenario, json } => commands::cmd_replay(&scenario, json),
        Commands::Completions { shell } => commands::cmd_completions(shell),
    }
}
