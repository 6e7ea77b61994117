//! Event dispatch for the promotion page.
//!
//! `Page` owns the state, the document, the store and the platform. Each
//! `UiEvent` is one state transition followed by the re-render it needs.
//! Handlers are the only place state changes.

use tracing::{debug, error, info, warn};

use crate::api::{Catalog, DataLoader, LoadError};
use crate::dom::{ClickTarget, Document};
use crate::filter::TagFilter;
use crate::i18n::{Locale, Strings};
use crate::net::Network;
use crate::platform::{DeferredInstall, InstallOutcome, Platform};
use crate::render::{self, TRANSITION_PROPERTY};
use crate::state::{AppState, Theme};
use crate::store::{self, KeyValueStore};

/// Transition duration when motion is allowed.
const DEFAULT_TRANSITION: &str = "200ms";
/// Transition duration with reduced motion.
const REDUCED_TRANSITION: &str = "0ms";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// A click anywhere in the document; resolved by the delegated handler.
    Click(ClickTarget),
    SearchInput(String),
    ChipSelected(TagFilter),
    PageSelected(usize),
    PrevPage,
    NextPage,
    OpenPromo(String),
    CloseModal,
    ToggleSave,
    CopyLink,
    ToggleTheme,
    ToggleReducedMotion,
    ToggleMenu,
    /// The platform offered an install prompt.
    InstallAvailable(DeferredInstall),
    InstallClicked,
}

pub struct Page<S, P> {
    state: AppState,
    doc: Document,
    store: S,
    platform: P,
    strings: &'static Strings,
    deferred_install: Option<DeferredInstall>,
}

impl<S: KeyValueStore, P: Platform> Page<S, P> {
    /// Build the page around the host's markup and apply the stored theme.
    pub fn new(store: S, platform: P, locale: Locale, per_page: usize, saved_only: bool) -> Self {
        let mut page = Self {
            state: AppState::new(per_page, saved_only),
            doc: render::page_skeleton(),
            store,
            platform,
            strings: locale.strings(),
            deferred_install: None,
        };
        let theme = Theme::from_attr(store::load_theme(&page.store).as_deref());
        page.apply_theme(theme);
        page
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    pub fn strings(&self) -> &'static Strings {
        self.strings
    }

    pub fn has_deferred_install(&self) -> bool {
        self.deferred_install.is_some()
    }

    /// Saved ids, read fresh from the store.
    pub fn saved_ids(&self) -> Vec<String> {
        store::saved_ids(&self.store)
    }

    pub fn is_saved(&self, id: &str) -> bool {
        store::is_saved(&self.store, id)
    }

    // =========================================================================
    // Startup
    // =========================================================================

    /// Fetch the catalog and render every section. On failure nothing is
    /// rendered and the page stays empty.
    pub async fn load<N: Network>(&mut self, loader: &DataLoader<'_, N>) -> Result<(), LoadError> {
        match loader.load().await {
            Ok(catalog) => {
                self.init(catalog);
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Error loading data");
                Err(e)
            }
        }
    }

    /// Install an already-loaded catalog and do the first render.
    pub fn init(&mut self, catalog: Catalog) {
        self.state.promos = catalog.promos;
        self.state.faq = catalog.faq;
        render::render_chips(&mut self.doc, &self.state.promos, &self.state.selected_tag, self.strings);
        self.render_grid();
        render::render_faq(&mut self.doc, &self.state.faq);
    }

    /// Filter, clamp the page and redraw the grid and pagination.
    pub fn render_grid(&mut self) {
        let saved = self.saved_ids();
        let slice = self.state.visible(&saved);
        render::render_grid(&mut self.doc, &slice, self.state.saved_only, self.strings);
        let page = slice.page;
        self.state.page = page;
    }

    /// Switch between the full catalog and the saved-items view.
    pub fn set_saved_only(&mut self, saved_only: bool) {
        self.state.saved_only = saved_only;
        self.state.page = 1;
        self.render_grid();
    }

    /// Ids on the page currently shown.
    pub fn visible_ids(&self) -> Vec<String> {
        let saved = self.saved_ids();
        let slice = self.state.visible(&saved);
        slice.items.iter().map(|p| p.id.clone()).collect()
    }

    // =========================================================================
    // Events
    // =========================================================================

    pub async fn handle(&mut self, event: UiEvent) {
        let event = match event {
            UiEvent::Click(target) => match self.on_click(&target) {
                Some(resolved) => resolved,
                None => return,
            },
            other => other,
        };
        debug!(?event, "Dispatching");

        match event {
            UiEvent::Click(_) => {}
            UiEvent::SearchInput(text) => {
                if let Some(input) = self.doc.get_mut(render::SEARCH) {
                    input.set_attr("value", &text);
                }
                self.state.search = text;
                self.state.page = 1;
                self.render_grid();
            }
            UiEvent::ChipSelected(tag) => {
                render::set_active_chip(&mut self.doc, &tag);
                self.state.selected_tag = tag;
                self.state.page = 1;
                self.render_grid();
            }
            UiEvent::PageSelected(page) => {
                self.state.page = page.max(1);
                self.render_grid();
            }
            UiEvent::PrevPage => {
                self.state.page = self.state.page.saturating_sub(1).max(1);
                self.render_grid();
            }
            UiEvent::NextPage => {
                self.state.page += 1;
                self.render_grid();
            }
            UiEvent::OpenPromo(id) => self.open_modal(&id),
            UiEvent::CloseModal => self.close_modal(),
            UiEvent::ToggleSave => self.toggle_save(),
            UiEvent::CopyLink => self.copy_link().await,
            UiEvent::ToggleTheme => self.toggle_theme(),
            UiEvent::ToggleReducedMotion => self.toggle_reduced_motion(),
            UiEvent::ToggleMenu => self.set_menu_open(!self.state.menu_open),
            UiEvent::InstallAvailable(prompt) => self.defer_install(prompt),
            UiEvent::InstallClicked => self.replay_install().await,
        }
    }

    /// The single delegated click listener. Side effects that apply to every
    /// click (closing the menu) happen here; the rest resolves to an event.
    fn on_click(&mut self, target: &ClickTarget) -> Option<UiEvent> {
        let in_menu = self.doc.contains(render::MENU_PANEL, target)
            || self.doc.contains(render::MENU_BTN, target);
        if !in_menu && self.state.menu_open {
            self.set_menu_open(false);
        }

        if target.id == render::MODAL && target.path.is_empty() {
            return Some(UiEvent::CloseModal);
        }

        if let Some(card) = self.doc.closest(target, |e| e.has_class("card")) {
            return card.attr("data-id").map(|id| UiEvent::OpenPromo(id.to_string()));
        }

        if self.doc.contains(render::CHIPS, target) {
            return self
                .doc
                .closest(target, |e| e.has_class("chip"))
                .map(|chip| UiEvent::ChipSelected(render::chip_filter(chip)));
        }

        if self.doc.contains(render::PAGINATION, target) {
            return self
                .doc
                .closest(target, |e| e.has_attr("data-page"))
                .and_then(|b| b.attr("data-page"))
                .and_then(|p| p.parse().ok())
                .map(UiEvent::PageSelected);
        }

        match target.id.as_str() {
            render::MODAL_SAVE => Some(UiEvent::ToggleSave),
            render::MODAL_COPY => Some(UiEvent::CopyLink),
            render::THEME_TOGGLE => Some(UiEvent::ToggleTheme),
            render::REDUCE_MOTION_BTN => Some(UiEvent::ToggleReducedMotion),
            render::MENU_BTN => Some(UiEvent::ToggleMenu),
            render::INSTALL_BTN => Some(UiEvent::InstallClicked),
            _ => None,
        }
    }

    fn open_modal(&mut self, id: &str) {
        let Some(promo) = self.state.find_promo(id) else {
            debug!(id, "Card has no matching promotion");
            return;
        };
        let saved = store::is_saved(&self.store, id);
        render::render_modal(&mut self.doc, promo, saved, self.strings);
        render::set_modal_open(&mut self.doc, true);
        self.state.current_promo = Some(id.to_string());
    }

    fn close_modal(&mut self) {
        render::set_modal_open(&mut self.doc, false);
        self.state.current_promo = None;
    }

    fn toggle_save(&mut self) {
        let Some(id) = self.state.current_promo.clone() else { return };
        // The saved-set is re-read inside toggle_saved, so a change made
        // since the modal opened is respected
        let now_saved = match store::toggle_saved(&mut self.store, &id) {
            Ok(saved) => saved,
            Err(e) => {
                warn!(error = %e, id, "Failed to update saved list");
                return;
            }
        };
        render::render_save_button(&mut self.doc, now_saved, self.strings);
        if self.state.saved_only {
            self.render_grid();
        }
    }

    async fn copy_link(&mut self) {
        let Some(link) = self.state.current().map(|p| p.link.clone()) else { return };
        match self.platform.write_clipboard(&link).await {
            Ok(()) => self.platform.notify(self.strings.link_copied),
            Err(e) => {
                debug!(error = %e, "Clipboard write failed, asking for manual copy");
                self.platform.prompt_manual_copy(self.strings.copy_manually, &link);
            }
        }
    }

    fn apply_theme(&mut self, theme: Theme) {
        let root = self.doc.root_mut();
        match theme.attr_value() {
            Some(value) => root.set_attr("data-theme", value),
            None => root.remove_attr("data-theme"),
        }
        self.state.theme = theme;
    }

    fn toggle_theme(&mut self) {
        let next = Theme::from_attr(self.doc.root().attr("data-theme")).toggled();
        self.apply_theme(next);
        if let Err(e) = store::save_theme(&mut self.store, next.attr_value()) {
            warn!(error = %e, "Failed to persist theme");
        }
    }

    fn toggle_reduced_motion(&mut self) {
        let pressed = self
            .doc
            .get(render::REDUCE_MOTION_BTN)
            .and_then(|b| b.attr("aria-pressed"))
            == Some("true");
        let next = !pressed;
        if let Some(btn) = self.doc.get_mut(render::REDUCE_MOTION_BTN) {
            btn.set_attr("aria-pressed", if next { "true" } else { "false" });
        }
        let duration = if next { REDUCED_TRANSITION } else { DEFAULT_TRANSITION };
        self.doc.root_mut().set_style_property(TRANSITION_PROPERTY, duration);
        self.state.reduced_motion = next;
    }

    fn set_menu_open(&mut self, open: bool) {
        if let Some(btn) = self.doc.get_mut(render::MENU_BTN) {
            btn.set_attr("aria-expanded", if open { "true" } else { "false" });
        }
        if let Some(panel) = self.doc.get_mut(render::MENU_PANEL) {
            panel.set_hidden(!open);
        }
        self.state.menu_open = open;
    }

    fn set_install_visible(&mut self, visible: bool) {
        if let Some(btn) = self.doc.get_mut(render::INSTALL_BTN) {
            btn.set_style_property("display", if visible { "inline-flex" } else { "none" });
        }
    }

    fn defer_install(&mut self, prompt: DeferredInstall) {
        self.deferred_install = Some(prompt);
        self.set_install_visible(true);
    }

    async fn replay_install(&mut self) {
        let Some(prompt) = self.deferred_install.take() else { return };
        let outcome = self.platform.show_install_prompt(&prompt).await;
        if outcome == InstallOutcome::Accepted {
            info!("App installed");
        }
        // A prompt can only be used once, whatever the answer
        self.set_install_visible(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FaqEntry, Promotion};
    use crate::platform::PlatformError;
    use crate::store::{MemoryStore, SAVED_KEY, THEME_KEY};

    #[derive(Default)]
    struct FakePlatform {
        clipboard_works: bool,
        clipboard: Option<String>,
        notices: Vec<String>,
        manual_copies: Vec<String>,
        install_answer: Option<InstallOutcome>,
        install_prompts: usize,
    }

    impl Platform for FakePlatform {
        async fn write_clipboard(&mut self, text: &str) -> Result<(), PlatformError> {
            if self.clipboard_works {
                self.clipboard = Some(text.to_string());
                Ok(())
            } else {
                Err(PlatformError::ClipboardRejected("denied".into()))
            }
        }

        fn notify(&mut self, message: &str) {
            self.notices.push(message.to_string());
        }

        fn prompt_manual_copy(&mut self, _message: &str, text: &str) {
            self.manual_copies.push(text.to_string());
        }

        async fn show_install_prompt(&mut self, _prompt: &DeferredInstall) -> InstallOutcome {
            self.install_prompts += 1;
            self.install_answer.unwrap_or(InstallOutcome::Dismissed)
        }
    }

    fn promo(id: &str, title: &str, brand: Option<&str>, tags: &[&str]) -> Promotion {
        Promotion {
            id: id.to_string(),
            title: title.to_string(),
            subtitle: None,
            brand: brand.map(str::to_string),
            image: format!("/img/{}.webp", id),
            link: format!("https://go.example/{}", id),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            terms: None,
        }
    }

    fn catalog(n: usize) -> Catalog {
        Catalog {
            promos: (0..n)
                .map(|i| {
                    let tag = if i % 2 == 0 { "even" } else { "odd" };
                    promo(&format!("p{}", i), &format!("Deal {}", i), None, &[tag])
                })
                .collect(),
            faq: vec![FaqEntry { question: "Q".into(), answer: "A".into() }],
        }
    }

    fn page(n: usize, per_page: usize, saved_only: bool) -> Page<MemoryStore, FakePlatform> {
        let mut page = Page::new(
            MemoryStore::new(),
            FakePlatform::default(),
            Locale::English,
            per_page,
            saved_only,
        );
        page.init(catalog(n));
        page
    }

    fn grid_text(page: &Page<MemoryStore, FakePlatform>) -> String {
        page.document().get(render::GRID).unwrap().text_content()
    }

    #[tokio::test]
    async fn test_init_renders_every_section() {
        let page = page(5, 2, false);
        let doc = page.document();
        assert_eq!(doc.get(render::CHIPS).unwrap().child_elements().count(), 3);
        assert_eq!(doc.get(render::GRID).unwrap().child_elements().count(), 2);
        assert_eq!(doc.get(render::FAQ).unwrap().child_elements().count(), 1);
        assert!(!doc.get(render::PAGINATION).unwrap().is_hidden());
    }

    #[tokio::test]
    async fn test_card_click_opens_modal() {
        let mut page = page(3, 30, false);
        // Click on the image inside the second card
        page.handle(UiEvent::Click(ClickTarget::within(render::GRID, &[1, 0]))).await;

        assert_eq!(page.state().current_promo.as_deref(), Some("p1"));
        assert!(render::is_modal_open(page.document()));
        assert_eq!(
            page.document().get(render::MODAL_TITLE).unwrap().text_content(),
            "Title: Deal 1"
        );
    }

    #[tokio::test]
    async fn test_click_on_unknown_card_is_ignored() {
        let mut page = page(3, 30, false);
        page.handle(UiEvent::OpenPromo("missing".into())).await;
        assert!(page.state().current_promo.is_none());
        assert!(!render::is_modal_open(page.document()));
    }

    #[tokio::test]
    async fn test_backdrop_click_closes_modal() {
        let mut page = page(3, 30, false);
        page.handle(UiEvent::OpenPromo("p0".into())).await;
        page.handle(UiEvent::Click(ClickTarget::element(render::MODAL))).await;
        assert!(!render::is_modal_open(page.document()));
        assert!(page.state().current_promo.is_none());
    }

    #[tokio::test]
    async fn test_search_resets_page() {
        let mut page = page(10, 3, false);
        page.handle(UiEvent::PageSelected(3)).await;
        assert_eq!(page.state().page, 3);

        page.handle(UiEvent::SearchInput("DEAL 1".into())).await;
        assert_eq!(page.state().page, 1);
        assert_eq!(page.visible_ids(), vec!["p1"]);
    }

    #[tokio::test]
    async fn test_chip_click_filters_and_resets_page() {
        let mut page = page(10, 3, false);
        page.handle(UiEvent::PageSelected(2)).await;

        // Chips are: All, even, odd
        page.handle(UiEvent::Click(ClickTarget::within(render::CHIPS, &[2]))).await;
        assert_eq!(page.state().selected_tag, TagFilter::Tag("odd".into()));
        assert_eq!(page.state().page, 1);
        assert_eq!(page.visible_ids(), vec!["p1", "p3", "p5"]);

        let chips = page.document().get(render::CHIPS).unwrap();
        let active: Vec<String> = chips
            .child_elements()
            .filter(|c| c.attr("aria-selected") == Some("true"))
            .map(|c| c.text_content())
            .collect();
        assert_eq!(active, vec!["odd"]);
    }

    #[tokio::test]
    async fn test_page_clamps_after_filter_change() {
        let mut page = page(10, 3, false);
        page.handle(UiEvent::PageSelected(5)).await;
        assert_eq!(page.state().page, 4);

        page.handle(UiEvent::PageSelected(9)).await;
        assert_eq!(page.state().page, 4);
        assert_eq!(page.visible_ids(), vec!["p9"]);
    }

    #[tokio::test]
    async fn test_pagination_button_click() {
        let mut page = page(10, 3, false);
        // Page 1 buttons: 1, 2, 3, 4, Next
        page.handle(UiEvent::Click(ClickTarget::within(render::PAGINATION, &[4]))).await;
        assert_eq!(page.state().page, 2);
        page.handle(UiEvent::PrevPage).await;
        assert_eq!(page.state().page, 1);
        page.handle(UiEvent::PrevPage).await;
        assert_eq!(page.state().page, 1);
        page.handle(UiEvent::NextPage).await;
        assert_eq!(page.state().page, 2);
    }

    #[tokio::test]
    async fn test_toggle_save_updates_store_and_button() {
        let mut page = page(3, 30, false);
        page.handle(UiEvent::OpenPromo("p2".into())).await;
        page.handle(UiEvent::Click(ClickTarget::element(render::MODAL_SAVE))).await;

        assert_eq!(page.saved_ids(), vec!["p2"]);
        assert_eq!(page.document().get(render::MODAL_SAVE).unwrap().text_content(), "Remove");

        page.handle(UiEvent::ToggleSave).await;
        assert!(page.saved_ids().is_empty());
        assert_eq!(page.document().get(render::MODAL_SAVE).unwrap().text_content(), "Save");
    }

    #[tokio::test]
    async fn test_saved_only_view_rerenders_on_unsave() {
        let mut page = page(3, 30, true);
        assert_eq!(grid_text(&page), "No saved items");

        page.store_mut().set(SAVED_KEY, r#"["p0","p2"]"#).unwrap();
        page.render_grid();
        assert_eq!(page.visible_ids(), vec!["p0", "p2"]);

        page.handle(UiEvent::OpenPromo("p0".into())).await;
        page.handle(UiEvent::ToggleSave).await;
        let cards: Vec<String> = page
            .document()
            .get(render::GRID)
            .unwrap()
            .child_elements()
            .filter_map(|c| c.attr("data-id").map(str::to_string))
            .collect();
        assert_eq!(cards, vec!["p2"]);
    }

    #[tokio::test]
    async fn test_switch_to_saved_view() {
        let mut page = page(10, 3, false);
        page.handle(UiEvent::PageSelected(3)).await;
        page.store_mut().set(SAVED_KEY, r#"["p4"]"#).unwrap();

        page.set_saved_only(true);
        assert_eq!(page.state().page, 1);
        assert_eq!(page.visible_ids(), vec!["p4"]);
        assert!(page.document().get(render::PAGINATION).unwrap().is_hidden());
    }

    #[tokio::test]
    async fn test_save_respects_changes_made_while_modal_open() {
        let mut page = page(3, 30, false);
        page.handle(UiEvent::OpenPromo("p1".into())).await;
        // Saved from somewhere else after the modal opened
        page.store_mut().set(SAVED_KEY, r#"["p1"]"#).unwrap();
        page.handle(UiEvent::ToggleSave).await;
        assert!(page.saved_ids().is_empty());
    }

    #[tokio::test]
    async fn test_copy_link_success_and_fallback() {
        let mut page = page(3, 30, false);
        page.handle(UiEvent::OpenPromo("p1".into())).await;

        page.platform_mut().clipboard_works = true;
        page.handle(UiEvent::CopyLink).await;
        assert_eq!(page.platform().clipboard.as_deref(), Some("https://go.example/p1"));
        assert_eq!(page.platform().notices, vec!["Link copied"]);

        page.platform_mut().clipboard_works = false;
        page.handle(UiEvent::Click(ClickTarget::element(render::MODAL_COPY))).await;
        assert_eq!(page.platform().manual_copies, vec!["https://go.example/p1"]);
    }

    #[tokio::test]
    async fn test_theme_toggle_persists() {
        let mut page = page(1, 30, false);
        page.handle(UiEvent::ToggleTheme).await;
        assert_eq!(page.document().root().attr("data-theme"), Some("light"));
        assert_eq!(page.store().get(THEME_KEY).unwrap().as_deref(), Some("light"));

        page.handle(UiEvent::ToggleTheme).await;
        assert_eq!(page.document().root().attr("data-theme"), None);
        assert_eq!(page.store().get(THEME_KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn test_stored_theme_applied_at_startup() {
        let mut store = MemoryStore::new();
        store.set(THEME_KEY, "light").unwrap();
        let page = Page::new(store, FakePlatform::default(), Locale::Thai, 30, false);
        assert_eq!(page.document().root().attr("data-theme"), Some("light"));
        assert_eq!(page.state().theme, Theme::Light);
    }

    #[tokio::test]
    async fn test_reduced_motion_toggle() {
        let mut page = page(1, 30, false);
        page.handle(UiEvent::Click(ClickTarget::element(render::REDUCE_MOTION_BTN))).await;
        let btn = page.document().get(render::REDUCE_MOTION_BTN).unwrap();
        assert_eq!(btn.attr("aria-pressed"), Some("true"));
        assert_eq!(page.document().root().style_property(TRANSITION_PROPERTY), Some("0ms"));

        page.handle(UiEvent::ToggleReducedMotion).await;
        assert_eq!(page.document().root().style_property(TRANSITION_PROPERTY), Some("200ms"));
        assert!(!page.state().reduced_motion);
    }

    #[tokio::test]
    async fn test_menu_toggle_and_outside_click() {
        let mut page = page(3, 30, false);
        page.handle(UiEvent::Click(ClickTarget::element(render::MENU_BTN))).await;
        assert!(page.state().menu_open);
        assert!(!page.document().get(render::MENU_PANEL).unwrap().is_hidden());

        page.handle(UiEvent::Click(ClickTarget::element(render::MENU_PANEL))).await;
        assert!(page.state().menu_open);

        page.handle(UiEvent::Click(ClickTarget::element(render::FAQ))).await;
        assert!(!page.state().menu_open);
        let btn = page.document().get(render::MENU_BTN).unwrap();
        assert_eq!(btn.attr("aria-expanded"), Some("false"));
    }

    #[tokio::test]
    async fn test_install_prompt_used_once() {
        let mut page = page(1, 30, false);
        let install_display = |p: &Page<MemoryStore, FakePlatform>| {
            p.document()
                .get(render::INSTALL_BTN)
                .and_then(|b| b.style_property("display"))
                .map(str::to_string)
        };
        assert_eq!(install_display(&page).as_deref(), Some("none"));

        // Clicking with nothing deferred does nothing
        page.handle(UiEvent::InstallClicked).await;
        assert_eq!(page.platform().install_prompts, 0);

        page.handle(UiEvent::InstallAvailable(DeferredInstall::default())).await;
        assert!(page.has_deferred_install());
        assert_eq!(install_display(&page).as_deref(), Some("inline-flex"));

        page.platform_mut().install_answer = Some(InstallOutcome::Accepted);
        page.handle(UiEvent::Click(ClickTarget::element(render::INSTALL_BTN))).await;
        assert_eq!(page.platform().install_prompts, 1);
        assert!(!page.has_deferred_install());
        assert_eq!(install_display(&page).as_deref(), Some("none"));

        page.handle(UiEvent::InstallClicked).await;
        assert_eq!(page.platform().install_prompts, 1);
    }

    #[tokio::test]
    async fn test_search_matches_brand() {
        let mut page = Page::new(
            MemoryStore::new(),
            FakePlatform::default(),
            Locale::English,
            30,
            false,
        );
        page.init(Catalog {
            promos: vec![
                promo("a", "Summer drinks", Some("Soda Co"), &[]),
                promo("b", "Flights", None, &[]),
            ],
            faq: Vec::new(),
        });
        page.handle(UiEvent::SearchInput("soda".into())).await;
        assert_eq!(page.visible_ids(), vec!["a"]);

        page.handle(UiEvent::SearchInput("nothing".into())).await;
        assert_eq!(grid_text(&page), "No matches found");
    }
}
