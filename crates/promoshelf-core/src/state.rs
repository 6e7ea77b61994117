//! Application state for the promotion page.
//!
//! One `AppState` exists per page. It is created at startup, mutated only by
//! the dispatcher's event handlers, and thrown away on navigation. The
//! saved-set is deliberately absent: it lives in the key-value store.

use crate::filter::{filter_promos, paginate, Criteria, PageSlice, TagFilter};
use crate::models::{FaqEntry, Promotion};

/// Default number of cards per page.
pub const DEFAULT_PAGE_SIZE: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Value of the root `data-theme` attribute; the default theme has none.
    pub fn attr_value(self) -> Option<&'static str> {
        match self {
            Theme::Dark => None,
            Theme::Light => Some("light"),
        }
    }

    pub fn from_attr(value: Option<&str>) -> Self {
        match value {
            Some("light") => Theme::Light,
            _ => Theme::Dark,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub promos: Vec<Promotion>,
    pub faq: Vec<FaqEntry>,
    pub selected_tag: TagFilter,
    pub search: String,
    pub page: usize,
    pub per_page: usize,
    pub saved_only: bool,
    /// Id of the promotion shown in the modal.
    pub current_promo: Option<String>,

    pub theme: Theme,
    pub reduced_motion: bool,
    pub menu_open: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, false)
    }
}

impl AppState {
    pub fn new(per_page: usize, saved_only: bool) -> Self {
        Self {
            promos: Vec::new(),
            faq: Vec::new(),
            selected_tag: TagFilter::All,
            search: String::new(),
            page: 1,
            per_page: per_page.max(1),
            saved_only,
            current_promo: None,
            theme: Theme::default(),
            reduced_motion: false,
            menu_open: false,
        }
    }

    pub fn find_promo(&self, id: &str) -> Option<&Promotion> {
        self.promos.iter().find(|p| p.id == id)
    }

    pub fn current(&self) -> Option<&Promotion> {
        self.current_promo.as_deref().and_then(|id| self.find_promo(id))
    }

    /// Run the filter for the current state against `saved` and return the
    /// visible page. `slice.page` is the clamped page; the caller writes it
    /// back into `self.page`.
    pub fn visible<'a>(&'a self, saved: &'a [String]) -> PageSlice<'a> {
        let criteria = Criteria {
            tag: &self.selected_tag,
            search: &self.search,
            saved_only: self.saved_only,
            saved,
        };
        let filtered = filter_promos(&self.promos, &criteria);
        paginate(&filtered, self.page, self.per_page)
    }
}
