use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Shell types for completion generation
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

#[derive(Parser)]
#[command(name = "recipe-reader")]
#[command(author, version, about = "Jump from recipe pages to their print-friendly variant and back", long_about = None)]
#[command(after_help = r#"Examples:
  recipe-reader check-url "https://example.com/pancakes/print/"   Is this a print page?
  recipe-reader classify pancakes.html                             Does this read like a recipe?
  recipe-reader locate "https://example.com/pancakes/" pancakes.html
                                                                   Find the print link
  recipe-reader replay session.toml                                Replay a browsing session
"#)]
pub struct Cli {
    /// Log decisions to stderr (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check whether a URL already points at a print variant
    CheckUrl {
        /// Absolute URL
        url: String,
    },

    /// Classify saved page markup against the recipe keyword model
    Classify {
        /// Saved HTML file
        #[arg(value_name = "HTML_FILE")]
        html: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Find the print-variant control in saved page markup
    #[command(after_help = r#"Examples:
  recipe-reader locate "https://example.com/pancakes/" pancakes.html
  recipe-reader locate "https://example.com/pancakes/" pancakes.html --json
"#)]
    Locate {
        /// URL the markup was loaded from (relative links resolve against it)
        url: String,

        /// Saved HTML file
        #[arg(value_name = "HTML_FILE")]
        html: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Replay a scripted browsing session
    #[command(after_help = r#"Scenario format (TOML, paths relative to the scenario file):

  [[load]]
  url = "https://example.com/pancakes/"
  html = "pancakes.html"
  renders = ["pancakes-late.html"]   # later renderings (optional)
  render_interval_ms = 250           # delay before each rendering (optional)

  [[load]]
  url = "https://example.com/pancakes/print/"
  html = "pancakes-print.html"
  activate_back = true               # click the back control afterwards
"#)]
    Replay {
        /// Scenario file
        #[arg(value_name = "SCENARIO")]
        scenario: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    #[command(after_help = r#"Examples:
  recipe-reader completions bash > ~/.local/share/bash-completion/completions/recipe-reader
  recipe-reader completions zsh > ~/.zfunc/_recipe-reader
  recipe-reader completions fish > ~/.config/fish/completions/recipe-reader.fish
"#)]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}
