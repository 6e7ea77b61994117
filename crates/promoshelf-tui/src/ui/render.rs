use promoshelf_core::state::Theme;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, AppState};
use crate::platform::ManualCopy;

use super::styles;

pub fn render(frame: &mut Frame, app: &App) {
    let theme = app.page.state().theme;
    frame.render_widget(Block::default().style(styles::base_style(theme)), frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title bar
            Constraint::Length(2), // Chips
            Constraint::Length(3), // Search
            Constraint::Min(5),    // Cards
            Constraint::Length(1), // Pager
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, app, chunks[0]);
    render_chips(frame, app, chunks[1]);
    render_search(frame, app, chunks[2]);
    render_cards(frame, app, chunks[3]);
    render_pager(frame, app, chunks[4]);
    render_status_bar(frame, app, chunks[5]);

    // Overlays
    if app.modal_open() {
        render_modal(frame, app);
    }
    match &app.state {
        AppState::ShowingFaq => render_faq_overlay(frame, app),
        AppState::ShowingHelp => render_help_overlay(frame, theme),
        AppState::ShowingCopy(copy) => render_copy_overlay(frame, copy),
        _ => {}
    }
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title = "  Promoshelf";
    let help_hint = "[?] Help";

    let mut spans = vec![Span::styled(title, styles::title_style())];
    if app.page.state().saved_only {
        spans.push(Span::styled("  [saved]", styles::success_style()));
    }
    if app.offline {
        spans.push(Span::styled("  [offline]", styles::error_style()));
    }
    if app.page.has_deferred_install() {
        spans.push(Span::styled("  [i] cache for offline", styles::highlight_style()));
    }
    let used: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    spans.push(Span::raw(" ".repeat(
        (area.width as usize).saturating_sub(used + help_hint.len() + 2),
    )));
    spans.push(Span::styled(help_hint, styles::muted_style()));

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_chips(frame: &mut Frame, app: &App, area: Rect) {
    let (labels, active) = app.chips();
    let mut spans = vec![Span::raw(" ")];
    for (i, label) in labels.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", styles::muted_style()));
        }
        spans.push(Span::styled(label.clone(), styles::chip_style(i == active)));
    }

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_search(frame: &mut Frame, app: &App, area: Rect) {
    let searching = app.state == AppState::Searching;
    let text = if searching {
        format!("{}▌", app.search_input)
    } else {
        app.page.state().search.clone()
    };
    let line = if text.is_empty() {
        Line::from(Span::styled("Press / to search", styles::muted_style()))
    } else {
        Line::from(Span::styled(text, styles::search_style()))
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(searching))
        .title(" Search ");
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_cards(frame: &mut Frame, app: &App, area: Rect) {
    let theme = app.page.state().theme;
    let strings = app.page.strings();
    let visible = app.visible();

    let lines: Vec<Line> = if visible.is_empty() {
        let msg = if app.page.state().saved_only { strings.no_saved } else { strings.no_matches };
        vec![Line::from(Span::styled(format!(" {}", msg), styles::muted_style()))]
    } else {
        visible
            .iter()
            .enumerate()
            .map(|(i, promo)| {
                let marker = if app.page.is_saved(&promo.id) { "★ " } else { "  " };
                let brand = promo.brand.as_deref().map(|b| format!("  {}", b)).unwrap_or_default();
                let tags = if promo.tags.is_empty() {
                    String::new()
                } else {
                    format!("  #{}", promo.tags.join(" #"))
                };
                let style = if i == app.selection {
                    styles::selected_style(theme)
                } else {
                    styles::list_item_style(theme)
                };
                Line::from(vec![
                    Span::styled(marker, styles::success_style()),
                    Span::styled(promo.title.clone(), style),
                    Span::styled(brand, styles::muted_style()),
                    Span::styled(tags, styles::highlight_style()),
                ])
            })
            .collect()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(!app.modal_open()));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_pager(frame: &mut Frame, app: &App, area: Rect) {
    let (page, total_pages, total_items) = app.page_info();
    if total_pages <= 1 {
        return;
    }
    let strings = app.page.strings();
    let mut spans = vec![Span::raw(" ")];
    if page > 1 {
        spans.push(Span::styled(format!("← {}  ", strings.prev_page), styles::help_key_style()));
    }
    spans.push(Span::styled(
        format!("{}/{} ({})", page, total_pages, total_items),
        styles::muted_style(),
    ));
    if page < total_pages {
        spans.push(Span::styled(format!("  {} →", strings.next_page), styles::help_key_style()));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let theme = app.page.state().theme;
    let shortcuts = "[s]ave [c]opy [v]iew saved [f]aq [q]uit";
    let left_text = match &app.status_message {
        Some(msg) => format!(" {} ", msg),
        None if app.page.state().reduced_motion => " Reduced motion ".to_string(),
        None => String::new(),
    };
    let right_text = format!(" {} ", shortcuts);

    let width = area.width as usize;
    let padding_len = width
        .saturating_sub(left_text.chars().count())
        .saturating_sub(right_text.len());
    let status_line = Line::from(vec![
        Span::styled(left_text, styles::muted_style()),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(right_text, styles::muted_style()),
    ]);
    frame.render_widget(
        Paragraph::new(status_line).style(styles::status_bar_style(theme)),
        area,
    );
}

fn render_modal(frame: &mut Frame, app: &App) {
    let Some(promo) = app.page.state().current() else { return };
    let theme = app.page.state().theme;
    let strings = app.page.strings();
    let area = centered_rect_fixed(72, 18, frame.area());
    frame.render_widget(Clear, area);

    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!("{}: ", strings.title_label), styles::muted_style()),
            Span::styled(promo.title.clone(), styles::title_style()),
        ]),
        Line::from(""),
        Line::from(Span::styled(format!("{}:", strings.details_label), styles::highlight_style())),
    ];
    if let Some(subtitle) = promo.subtitle.as_deref().filter(|s| !s.is_empty()) {
        lines.push(Line::from(Span::styled(subtitle.to_string(), styles::list_item_style(theme))));
    }
    for term in promo.terms() {
        lines.push(Line::from(Span::styled(format!("• {}", term), styles::list_item_style(theme))));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(promo.link.clone(), styles::search_style())));
    lines.push(Line::from(""));

    let save_label = if app.page.is_saved(&promo.id) { strings.unsave } else { strings.save };
    lines.push(Line::from(vec![
        Span::styled(" [s] ", styles::help_key_style()),
        Span::styled(save_label, styles::help_desc_style(theme)),
        Span::styled("   [c] ", styles::help_key_style()),
        Span::styled("Copy link", styles::help_desc_style(theme)),
        Span::styled("   [Esc] ", styles::help_key_style()),
        Span::styled("Close", styles::help_desc_style(theme)),
    ]));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(styles::base_style(theme));
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

fn render_faq_overlay(frame: &mut Frame, app: &App) {
    let theme = app.page.state().theme;
    let area = centered_rect_fixed(72, 22, frame.area());
    frame.render_widget(Clear, area);

    let mut lines = Vec::new();
    for entry in &app.page.state().faq {
        lines.push(Line::from(Span::styled(entry.question.clone(), styles::highlight_style())));
        lines.push(Line::from(Span::styled(entry.answer.clone(), styles::list_item_style(theme))));
        lines.push(Line::from(""));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .title(" FAQ ")
        .style(styles::base_style(theme));
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true })
            .scroll((app.faq_scroll, 0)),
        area,
    );
}

fn render_copy_overlay(frame: &mut Frame, copy: &ManualCopy) {
    let area = centered_rect_fixed(72, 7, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(Span::styled(copy.message.clone(), styles::highlight_style())),
        Line::from(""),
        Line::from(Span::styled(copy.text.clone(), styles::search_style())),
        Line::from(""),
        Line::from(Span::styled("Press any key to close", styles::muted_style())),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn help_line(key: &'static str, desc: &'static str, theme: Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<10}", key), styles::help_key_style()),
        Span::styled(desc, styles::help_desc_style(theme)),
    ])
}

fn render_help_overlay(frame: &mut Frame, theme: Theme) {
    let area = centered_rect_fixed(52, 24, frame.area());
    frame.render_widget(Clear, area);

    let version = env!("CARGO_PKG_VERSION");
    let help_text = vec![
        Line::from(Span::styled("  Promoshelf", styles::title_style())),
        Line::from(Span::styled(format!("  version {}", version), styles::muted_style())),
        Line::from(""),
        Line::from(Span::styled(" Browse", styles::highlight_style())),
        help_line("↑/↓", "Select card", theme),
        help_line("←/→", "Previous/next page", theme),
        help_line("Tab", "Next tag (Shift-Tab: previous)", theme),
        help_line("/", "Search", theme),
        help_line("Enter", "Open details", theme),
        help_line("v", "Saved items only", theme),
        help_line("f", "FAQ", theme),
        Line::from(""),
        Line::from(Span::styled(" Actions", styles::highlight_style())),
        help_line("s", "Save / remove", theme),
        help_line("c", "Copy link", theme),
        help_line("t", "Toggle theme", theme),
        help_line("m", "Reduce motion", theme),
        help_line("e", "Export page as HTML", theme),
        help_line("i", "Cache for offline use", theme),
        help_line("q", "Quit", theme),
        Line::from(""),
        Line::from(vec![
            Span::styled("       Press ", styles::muted_style()),
            Span::styled("?", styles::help_key_style()),
            Span::styled(" or ", styles::muted_style()),
            Span::styled("Esc", styles::help_key_style()),
            Span::styled(" to close", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(styles::base_style(theme));
    frame.render_widget(Paragraph::new(help_text).block(block), area);
}

/// Create a centered rectangle with fixed dimensions
fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}
