use promoshelf_core::state::Theme;
use ratatui::style::{Color, Modifier, Style};

// Color palette
pub const PRIMARY: Color = Color::Rgb(64, 128, 192);
pub const SECONDARY: Color = Color::Rgb(96, 160, 96);
pub const ACCENT: Color = Color::Rgb(192, 160, 64);
pub const ERROR: Color = Color::Rgb(192, 64, 64);
pub const MUTED: Color = Color::Rgb(128, 128, 128);

fn text(theme: Theme) -> Color {
    match theme {
        Theme::Dark => Color::White,
        Theme::Light => Color::Rgb(24, 24, 32),
    }
}

fn highlight_bg(theme: Theme) -> Color {
    match theme {
        Theme::Dark => Color::Rgb(48, 48, 64),
        Theme::Light => Color::Rgb(214, 222, 236),
    }
}

pub fn base_style(theme: Theme) -> Style {
    match theme {
        Theme::Dark => Style::default().fg(text(theme)),
        Theme::Light => Style::default().fg(text(theme)).bg(Color::Rgb(244, 244, 240)),
    }
}

pub fn title_style() -> Style {
    Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
}

pub fn selected_style(theme: Theme) -> Style {
    Style::default()
        .bg(highlight_bg(theme))
        .add_modifier(Modifier::BOLD)
}

pub fn list_item_style(theme: Theme) -> Style {
    Style::default().fg(text(theme))
}

pub fn muted_style() -> Style {
    Style::default().fg(MUTED)
}

pub fn highlight_style() -> Style {
    Style::default().fg(ACCENT)
}

pub fn success_style() -> Style {
    Style::default().fg(SECONDARY)
}

pub fn error_style() -> Style {
    Style::default().fg(ERROR)
}

pub fn chip_style(active: bool) -> Style {
    if active {
        Style::default()
            .fg(PRIMARY)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    } else {
        Style::default().fg(MUTED)
    }
}

pub fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(PRIMARY)
    } else {
        Style::default().fg(MUTED)
    }
}

pub fn search_style() -> Style {
    Style::default().fg(ACCENT)
}

pub fn status_bar_style(theme: Theme) -> Style {
    match theme {
        Theme::Dark => Style::default().bg(Color::Rgb(32, 32, 40)).fg(Color::White),
        Theme::Light => Style::default().bg(Color::Rgb(220, 220, 214)).fg(text(theme)),
    }
}

pub fn help_key_style() -> Style {
    Style::default()
        .fg(ACCENT)
        .add_modifier(Modifier::BOLD)
}

pub fn help_desc_style(theme: Theme) -> Style {
    Style::default().fg(text(theme))
}
