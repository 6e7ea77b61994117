//! Command-line interface.
//!
//! With no subcommand the terminal browser opens; the subcommands run once
//! and print to stdout.

mod commands;
mod output;

use clap::{Parser, Subcommand};
use promoshelf_core::Config;

pub use output::OutputFormat;

/// Promoshelf - browse promotional offers, online or off
#[derive(Parser, Debug)]
#[command(name = "promoshelf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Site root (http(s) URL or local directory); overrides the config file
    #[arg(long, global = true)]
    pub site: Option<String>,

    /// Serve only from the offline cache
    #[arg(long, global = true)]
    pub offline: bool,

    /// Start on the saved-items view
    #[arg(long, global = true)]
    pub saved: bool,

    /// Items per page
    #[arg(long, global = true)]
    pub page_size: Option<usize>,

    /// Output in JSON format (for machine parsing)
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    pub fn format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }

    /// Flags win over the config file and the environment.
    pub fn apply(&self, config: &mut Config) {
        if let Some(site) = &self.site {
            config.site = site.clone();
        }
        if let Some(size) = self.page_size.filter(|n| *n > 0) {
            config.page_size = size;
        }
        config.offline_mode |= self.offline;
        config.show_saved_promos |= self.saved;
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render the page as HTML
    Render(commands::render::RenderArgs),

    /// Saved items
    Saved {
        #[command(subcommand)]
        command: commands::saved::SavedCommands,
    },

    /// Offline cache worker
    Cache {
        #[command(subcommand)]
        command: commands::cache::CacheCommands,
    },
}

/// Run a subcommand
pub async fn run(command: Commands, config: &Config, format: OutputFormat) -> anyhow::Result<()> {
    match command {
        Commands::Render(args) => commands::render::run(args, config).await,
        Commands::Saved { command } => commands::saved::run(command, config, format).await,
        Commands::Cache { command } => commands::cache::run(command, config, format).await,
    }
}
