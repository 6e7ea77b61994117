//! HTML snapshot of the page

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use promoshelf_core::platform::HeadlessPlatform;
use promoshelf_core::worker::WorkerClient;
use promoshelf_core::{Config, DataLoader, Page, TagFilter, UiEvent};
use tracing::info;

use crate::site;

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Only promotions with this tag
    #[arg(long)]
    pub tag: Option<String>,

    /// Search text
    #[arg(long)]
    pub search: Option<String>,

    /// Page number (clamped to the last page)
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Open the details of this promotion id
    #[arg(long)]
    pub open: Option<String>,
}

impl RenderArgs {
    fn events(self) -> Vec<UiEvent> {
        let mut events = Vec::new();
        if let Some(tag) = self.tag {
            events.push(UiEvent::ChipSelected(TagFilter::Tag(tag)));
        }
        if let Some(search) = self.search {
            events.push(UiEvent::SearchInput(search));
        }
        if self.page > 1 {
            events.push(UiEvent::PageSelected(self.page));
        }
        if let Some(id) = self.open {
            events.push(UiEvent::OpenPromo(id));
        }
        events
    }
}

pub async fn run(args: RenderArgs, config: &Config) -> Result<()> {
    let site = site::connect(config)?;
    let client = WorkerClient::new(site::open_worker(config, &site)?);
    let store = site::open_store(config)?;
    let mut page = Page::new(
        store,
        HeadlessPlatform,
        config.locale,
        config.page_size,
        config.show_saved_promos,
    );

    let loader = DataLoader::new(&client, site.origin.clone());
    page.load(&loader).await.context("Failed to load promotions")?;

    let output = args.output.clone();
    for event in args.events() {
        page.handle(event).await;
    }

    let html = page.document().to_html();
    match output {
        Some(path) => {
            std::fs::write(&path, &html)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), "Rendered page");
        }
        None => println!("{}", html),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_to_events() {
        let args = RenderArgs {
            output: None,
            tag: Some("food".into()),
            search: None,
            page: 2,
            open: Some("p1".into()),
        };
        assert_eq!(
            args.events(),
            vec![
                UiEvent::ChipSelected(TagFilter::Tag("food".into())),
                UiEvent::PageSelected(2),
                UiEvent::OpenPromo("p1".into()),
            ]
        );
    }
}
