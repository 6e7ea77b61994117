//! Application state for the terminal browser.
//!
//! `App` wraps the core `Page` and adds what only a terminal needs: a list
//! selection, a search line being typed, overlays and a status message.
//! Every change to the page itself goes through `Page::handle`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use promoshelf_core::config::Config;
use promoshelf_core::models::{collect_tags, Promotion};
use promoshelf_core::net::{SiteNetwork, Url};
use promoshelf_core::platform::DeferredInstall;
use promoshelf_core::render;
use promoshelf_core::worker::{WorkerClient, WorkerState};
use promoshelf_core::{DataLoader, FileStore, Page, TagFilter, UiEvent};
use tracing::{info, warn};

use crate::platform::{ManualCopy, TerminalPlatform};
use crate::site;

/// File name for the HTML snapshot written by the export key.
pub const EXPORT_FILE: &str = "promoshelf.html";

/// Current overlay or input mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppState {
    Normal,
    Searching,
    ShowingFaq,
    ShowingHelp,
    ShowingCopy(ManualCopy),
    Quitting,
}

pub struct App {
    pub page: Page<FileStore, TerminalPlatform>,
    pub state: AppState,
    /// Index into the cards on the current page.
    pub selection: usize,
    pub search_input: String,
    pub status_message: Option<String>,
    pub faq_scroll: u16,
    pub offline: bool,
    worker: WorkerClient<SiteNetwork>,
    origin: Url,
    export_dir: PathBuf,
}

impl App {
    pub fn new(config: &Config) -> Result<Self> {
        let site = site::connect(config)?;
        let store = site::open_store(config)?;
        let worker = WorkerClient::new(site::open_worker(config, &site)?);
        let page = Page::new(
            store,
            TerminalPlatform::default(),
            config.locale,
            config.page_size,
            config.show_saved_promos,
        );

        Ok(Self {
            page,
            state: AppState::Normal,
            selection: 0,
            search_input: String::new(),
            status_message: None,
            faq_scroll: 0,
            offline: config.offline_mode,
            worker,
            origin: site.origin,
            export_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        })
    }

    /// Load the catalog through the cache worker and offer an install if the
    /// app is not cached yet.
    pub async fn load(&mut self) -> Result<()> {
        let loader = DataLoader::new(&self.worker, self.origin.clone());
        self.page.load(&loader).await.context("Failed to load promotions")?;

        let installed = self.worker.worker().lock().await.state() != WorkerState::NotInstalled;
        if !installed && !self.offline {
            self.dispatch(UiEvent::InstallAvailable(DeferredInstall::default())).await;
        }
        Ok(())
    }

    /// Run one event through the page, then pick up what the platform
    /// recorded while handling it.
    pub async fn dispatch(&mut self, event: UiEvent) {
        self.page.handle(event).await;
        self.after_event().await;
    }

    async fn after_event(&mut self) {
        let count = self.visible().len();
        self.selection = self.selection.min(count.saturating_sub(1));

        let platform = self.page.platform_mut();
        let notice = platform.take_notice();
        let manual_copy = platform.take_manual_copy();
        let install = platform.take_install_request();

        if let Some(notice) = notice {
            self.status_message = Some(notice);
        }
        if let Some(copy) = manual_copy {
            self.state = AppState::ShowingCopy(copy);
        }
        if install {
            self.install().await;
        }
    }

    async fn install(&mut self) {
        let mut worker = self.worker.worker().lock().await;
        let result = match worker.install().await {
            Ok(()) => worker.activate().map(|_| ()),
            Err(e) => Err(e),
        };
        self.status_message = Some(match result {
            Ok(()) => {
                info!("Cached for offline use");
                "Cached for offline use".to_string()
            }
            Err(e) => {
                warn!(error = %e, "Offline install failed");
                format!("Offline install failed: {}", e)
            }
        });
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Promotions on the current page, in display order.
    pub fn visible(&self) -> Vec<&Promotion> {
        let state = self.page.state();
        self.page
            .visible_ids()
            .iter()
            .filter_map(|id| state.find_promo(id))
            .collect()
    }

    /// Current page, total pages and total matching items.
    pub fn page_info(&self) -> (usize, usize, usize) {
        let saved = self.page.saved_ids();
        let slice = self.page.state().visible(&saved);
        (slice.page, slice.total_pages, slice.total_items)
    }

    pub fn selected_id(&self) -> Option<String> {
        self.visible().get(self.selection).map(|p| p.id.clone())
    }

    pub fn modal_open(&self) -> bool {
        render::is_modal_open(self.page.document())
    }

    /// Chip labels in display order, with the active one's index.
    pub fn chips(&self) -> (Vec<String>, usize) {
        let state = self.page.state();
        let tags = collect_tags(&state.promos);
        let active = match &state.selected_tag {
            TagFilter::All => 0,
            TagFilter::Tag(t) => tags.iter().position(|x| x == t).map(|i| i + 1).unwrap_or(0),
        };
        let mut labels = vec![self.page.strings().all_tags.to_string()];
        labels.extend(tags);
        (labels, active)
    }

    // =========================================================================
    // Actions
    // =========================================================================

    pub fn select_next(&mut self) {
        let count = self.visible().len();
        if count > 0 && self.selection + 1 < count {
            self.selection += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selection = self.selection.saturating_sub(1);
    }

    /// Event selecting the next (or previous) chip, wrapping around.
    pub fn cycle_chip(&self, forward: bool) -> UiEvent {
        let state = self.page.state();
        let tags = collect_tags(&state.promos);
        let (_, active) = self.chips();
        let len = tags.len() + 1;
        let next = if forward { (active + 1) % len } else { (active + len - 1) % len };
        if next == 0 {
            UiEvent::ChipSelected(TagFilter::All)
        } else {
            UiEvent::ChipSelected(TagFilter::Tag(tags[next - 1].clone()))
        }
    }

    pub fn toggle_saved_view(&mut self) {
        let saved_only = !self.page.state().saved_only;
        self.page.set_saved_only(saved_only);
        self.selection = 0;
    }

    pub fn start_search(&mut self) {
        self.search_input = self.page.state().search.clone();
        self.state = AppState::Searching;
    }

    /// Write the current page as HTML. Returns the file written.
    pub fn export_html(&mut self) -> Result<PathBuf> {
        let path = self.export_dir.join(EXPORT_FILE);
        std::fs::write(&path, self.page.document().to_html())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        self.status_message = Some(format!("Exported to {}", path.display()));
        Ok(path)
    }
}
