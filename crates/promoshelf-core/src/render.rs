//! Renders state into the document.
//!
//! Every function here fully replaces the content of the region it owns,
//! so rendering the same state twice yields the same tree.

use crate::dom::{escape_html, Document, Element, Node};
use crate::filter::{PageSlice, TagFilter};
use crate::i18n::Strings;
use crate::models::{collect_tags, FaqEntry, Promotion};

// Element ids bound by the renderer and dispatcher
pub const CHIPS: &str = "chips";
pub const GRID: &str = "grid";
pub const FAQ: &str = "faq";
pub const PAGINATION: &str = "pagination";
pub const MODAL: &str = "modal";
pub const MODAL_IMG: &str = "modalImg";
pub const MODAL_TITLE: &str = "modalTitle";
pub const MODAL_DETAILS: &str = "modalDetails";
pub const MODAL_APPLY: &str = "modalApply";
pub const MODAL_COPY: &str = "modalCopy";
pub const MODAL_SAVE: &str = "modalSave";
pub const SEARCH: &str = "search";
pub const THEME_TOGGLE: &str = "themeToggle";
pub const REDUCE_MOTION_BTN: &str = "reduceMotionBtn";
pub const MENU_BTN: &str = "menuBtn";
pub const MENU_PANEL: &str = "menuPanel";
pub const INSTALL_BTN: &str = "installBtn";

/// Root style property driven by the reduced-motion toggle.
pub const TRANSITION_PROPERTY: &str = "--transition-duration";

/// The host page's markup, reduced to the elements this layer binds to.
pub fn page_skeleton() -> Document {
    let header = Element::new("header")
        .with_child(
            Element::new("button")
                .with_id(MENU_BTN)
                .with_attr("aria-expanded", "false")
                .with_attr("aria-controls", MENU_PANEL),
        )
        .with_child({
            let mut panel = Element::new("div").with_id(MENU_PANEL);
            panel.set_hidden(true);
            panel
        })
        .with_child(
            Element::new("input")
                .with_id(SEARCH)
                .with_attr("type", "search"),
        )
        .with_child(Element::new("button").with_id(THEME_TOGGLE))
        .with_child(
            Element::new("button")
                .with_id(REDUCE_MOTION_BTN)
                .with_attr("aria-pressed", "false"),
        )
        .with_child({
            let mut install = Element::new("button").with_id(INSTALL_BTN);
            install.set_style_property("display", "none");
            install
        });

    let modal = Element::new("dialog")
        .with_id(MODAL)
        .with_child(Element::new("img").with_id(MODAL_IMG).with_attr("alt", ""))
        .with_child(Element::new("h2").with_id(MODAL_TITLE))
        .with_child(Element::new("div").with_id(MODAL_DETAILS))
        .with_child(
            Element::new("a")
                .with_id(MODAL_APPLY)
                .with_attr("target", "_blank")
                .with_attr("rel", "noopener"),
        )
        .with_child(Element::new("button").with_id(MODAL_COPY).with_class("btn"))
        .with_child(
            Element::new("button")
                .with_id(MODAL_SAVE)
                .with_class("btn")
                .with_class("btn-quiet"),
        );

    let body = Element::new("body")
        .with_child(header)
        .with_child(Element::new("div").with_id(CHIPS).with_attr("role", "tablist"))
        .with_child(Element::new("div").with_id(GRID))
        .with_child(Element::new("nav").with_id(PAGINATION))
        .with_child(Element::new("section").with_id(FAQ))
        .with_child(modal);

    Document::new(body)
}

fn region<'a>(doc: &'a mut Document, id: &str) -> Option<&'a mut Element> {
    // Missing regions are skipped, the same way the page tolerates absent markup
    doc.get_mut(id)
}

// ============================================================================
// Chips
// ============================================================================

fn chip(label: &str, tag: Option<&str>, active: bool) -> Element {
    let mut btn = Element::new("button")
        .with_class("chip")
        .with_attr("role", "tab")
        .with_text(label);
    if let Some(tag) = tag {
        btn.set_attr("data-tag", tag);
    }
    mark_chip(&mut btn, active);
    btn
}

fn mark_chip(chip: &mut Element, active: bool) {
    chip.set_attr("aria-selected", if active { "true" } else { "false" });
    chip.toggle_class("is-active", active);
}

/// One chip per distinct tag, sorted, behind the "all" chip.
pub fn render_chips(doc: &mut Document, promos: &[Promotion], selected: &TagFilter, strings: &Strings) {
    let Some(el) = region(doc, CHIPS) else { return };

    let mut chips = vec![Node::from(chip(strings.all_tags, None, *selected == TagFilter::All))];
    for tag in collect_tags(promos) {
        let active = matches!(selected, TagFilter::Tag(t) if *t == tag);
        chips.push(chip(&tag, Some(tag.as_str()), active).into());
    }
    el.replace_children(chips);
}

/// Move the active marker without rebuilding the chips.
pub fn set_active_chip(doc: &mut Document, selected: &TagFilter) {
    let Some(el) = region(doc, CHIPS) else { return };
    for node in el.children.iter_mut() {
        if let Node::Element(chip) = node {
            let active = match selected {
                TagFilter::All => !chip.has_attr("data-tag"),
                TagFilter::Tag(t) => chip.attr("data-tag") == Some(t.as_str()),
            };
            mark_chip(chip, active);
        }
    }
}

/// The tag a chip stands for.
pub fn chip_filter(chip: &Element) -> TagFilter {
    match chip.attr("data-tag") {
        Some(tag) => TagFilter::Tag(tag.to_string()),
        None => TagFilter::All,
    }
}

// ============================================================================
// Grid and pagination
// ============================================================================

fn card(promo: &Promotion) -> Element {
    Element::new("article")
        .with_class("card")
        .with_attr("data-id", &promo.id)
        .with_child(
            Element::new("img")
                .with_attr("src", &promo.image)
                .with_attr("alt", "")
                .with_attr("loading", "lazy"),
        )
}

pub fn render_grid(doc: &mut Document, slice: &PageSlice<'_>, saved_only: bool, strings: &Strings) {
    if let Some(el) = region(doc, GRID) {
        if slice.is_empty() {
            let msg = if saved_only { strings.no_saved } else { strings.no_matches };
            el.replace_children(vec![Element::new("p").with_class("muted").with_text(msg).into()]);
        } else {
            el.replace_children(slice.items.iter().map(|p| card(p).into()).collect());
        }
    }
    render_pagination(doc, slice, strings);
}

fn page_button(label: &str, target: usize) -> Element {
    Element::new("button")
        .with_class("btn")
        .with_class("btn-quiet")
        .with_attr("data-page", &target.to_string())
        .with_text(label)
}

pub fn render_pagination(doc: &mut Document, slice: &PageSlice<'_>, strings: &Strings) {
    let Some(nav) = region(doc, PAGINATION) else { return };

    if slice.total_pages <= 1 {
        nav.replace_children(Vec::new());
        nav.set_hidden(true);
        return;
    }
    nav.set_hidden(false);

    let mut buttons: Vec<Node> = Vec::new();
    if slice.has_prev() {
        buttons.push(page_button(strings.prev_page, slice.page - 1).into());
    }
    for i in 1..=slice.total_pages {
        let mut btn = page_button(&i.to_string(), i);
        if i == slice.page {
            btn.set_attr("aria-current", "page");
        }
        buttons.push(btn.into());
    }
    if slice.has_next() {
        buttons.push(page_button(strings.next_page, slice.page + 1).into());
    }
    nav.replace_children(buttons);
}

// ============================================================================
// FAQ
// ============================================================================

pub fn render_faq(doc: &mut Document, faq: &[FaqEntry]) {
    let Some(el) = region(doc, FAQ) else { return };
    el.replace_children(
        faq.iter()
            .map(|entry| {
                Element::new("details")
                    .with_child(Element::new("summary").with_text(&entry.question))
                    .with_child(Element::new("p").with_text(&entry.answer))
                    .into()
            })
            .collect(),
    );
}

// ============================================================================
// Modal
// ============================================================================

/// Subtitle then terms, each escaped, joined by `<br>`.
pub fn modal_details_html(promo: &Promotion, strings: &Strings) -> String {
    let parts: Vec<String> = promo
        .subtitle
        .iter()
        .filter(|s| !s.is_empty())
        .chain(promo.terms().iter())
        .map(|s| escape_html(s))
        .collect();
    format!(
        "<strong>{}:</strong> {}",
        escape_html(strings.details_label),
        parts.join("<br>")
    )
}

pub fn render_modal(doc: &mut Document, promo: &Promotion, saved: bool, strings: &Strings) {
    if let Some(img) = region(doc, MODAL_IMG) {
        img.set_attr("src", &promo.image);
    }
    if let Some(title) = region(doc, MODAL_TITLE) {
        title.set_text(format!("{}: {}", strings.title_label, promo.title));
    }
    if let Some(details) = region(doc, MODAL_DETAILS) {
        details.replace_children(vec![Node::Raw(modal_details_html(promo, strings))]);
    }
    if let Some(apply) = region(doc, MODAL_APPLY) {
        apply.set_attr("href", &promo.link);
    }
    render_save_button(doc, saved, strings);
}

pub fn render_save_button(doc: &mut Document, saved: bool, strings: &Strings) {
    let Some(btn) = region(doc, MODAL_SAVE) else { return };
    if saved {
        btn.set_text(strings.unsave);
        btn.remove_class("btn-quiet");
        btn.add_class("btn-danger");
    } else {
        btn.set_text(strings.save);
        btn.remove_class("btn-danger");
        btn.add_class("btn-quiet");
    }
}

pub fn set_modal_open(doc: &mut Document, open: bool) {
    let Some(modal) = region(doc, MODAL) else { return };
    if open {
        modal.set_attr("open", "");
    } else {
        modal.remove_attr("open");
    }
}

pub fn is_modal_open(doc: &Document) -> bool {
    doc.get(MODAL).map(|m| m.has_attr("open")).unwrap_or(false)
}
