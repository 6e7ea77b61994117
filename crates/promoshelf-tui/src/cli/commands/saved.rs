//! Saved items commands

use anyhow::Result;
use clap::Subcommand;
use promoshelf_core::store::{self, KeyValueStore};
use promoshelf_core::Config;
use serde::Serialize;

use crate::cli::output::{print_formatted, OutputFormat};
use crate::site;

#[derive(Subcommand, Debug)]
pub enum SavedCommands {
    /// List saved promotion ids
    List,

    /// Save a promotion, or remove it if already saved
    Toggle {
        /// Promotion id
        id: String,
    },

    /// Remove every saved promotion
    Clear,
}

#[derive(Serialize)]
struct ToggleResult {
    id: String,
    saved: bool,
}

pub async fn run(command: SavedCommands, config: &Config, format: OutputFormat) -> Result<()> {
    let mut store = site::open_store(config)?;
    execute(command, &mut store, format)
}

fn execute<S: KeyValueStore>(command: SavedCommands, kv: &mut S, format: OutputFormat) -> Result<()> {
    match command {
        SavedCommands::List => {
            let ids = store::saved_ids(&*kv);
            print_formatted(&ids, format, |ids| {
                if ids.is_empty() {
                    "No saved items".to_string()
                } else {
                    ids.join("\n")
                }
            });
        }
        SavedCommands::Toggle { id } => {
            let saved = store::toggle_saved(kv, &id)?;
            print_formatted(&ToggleResult { id, saved }, format, |r| {
                if r.saved {
                    format!("Saved {}", r.id)
                } else {
                    format!("Removed {}", r.id)
                }
            });
        }
        SavedCommands::Clear => {
            store::clear_saved(kv)?;
            print_formatted(&Vec::<String>::new(), format, |_| "Cleared saved items".to_string());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use promoshelf_core::MemoryStore;

    #[test]
    fn test_toggle_then_clear() {
        let mut store = MemoryStore::new();
        execute(SavedCommands::Toggle { id: "p1".into() }, &mut store, OutputFormat::Text).unwrap();
        execute(SavedCommands::Toggle { id: "p2".into() }, &mut store, OutputFormat::Json).unwrap();
        assert_eq!(store::saved_ids(&store), vec!["p1", "p2"]);

        execute(SavedCommands::Toggle { id: "p1".into() }, &mut store, OutputFormat::Text).unwrap();
        assert_eq!(store::saved_ids(&store), vec!["p2"]);

        execute(SavedCommands::Clear, &mut store, OutputFormat::Text).unwrap();
        execute(SavedCommands::List, &mut store, OutputFormat::Text).unwrap();
        assert!(store::saved_ids(&store).is_empty());
    }
}
