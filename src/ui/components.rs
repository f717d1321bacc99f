//! Reusable UI component helpers
//!
//! Terminal stand-ins for the site's slider, checkbox, result card and tree
//! icon grid.

use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::calculator::IconGrid;

pub const TREE_ICON: &str = "♣";

/// Width of the slider track in cells
const TRACK_WIDTH: usize = 20;

pub struct Palette {
    pub accent: Color,
    pub text: Color,
    pub text_dim: Color,
    pub bg_selected: Color,
}

/// `Label: value` followed by a track with a knob at the value's position
pub fn slider_line<'a>(label: &str, value: u8, min: u8, max: u8, focused: bool, p: &Palette) -> Line<'a> {
    let span = max.saturating_sub(min).max(1) as usize;
    let knob = (value.clamp(min, max) - min) as usize * (TRACK_WIDTH - 1) / span;

    let filled = "━".repeat(knob);
    let empty = "─".repeat(TRACK_WIDTH - 1 - knob);
    let track_color = if focused { p.accent } else { p.text_dim };

    let mut line = Line::from(vec![
        Span::styled(format!(" {:<26}", format!("{}: {}", label, value)), Style::default().fg(p.text)),
        Span::styled(filled, Style::default().fg(track_color)),
        Span::styled("●", Style::default().fg(track_color).add_modifier(Modifier::BOLD)),
        Span::styled(empty, Style::default().fg(p.text_dim)),
        Span::styled(format!(" {}..{}", min, max), Style::default().fg(p.text_dim)),
    ]);
    if focused {
        line = line.style(Style::default().bg(p.bg_selected));
    }
    line
}

pub fn checkbox_line<'a>(label: &str, checked: bool, focused: bool, p: &Palette) -> Line<'a> {
    let mark = if checked { "[x]" } else { "[ ]" };
    let mark_color = if checked { p.accent } else { p.text_dim };

    let mut line = Line::from(vec![
        Span::styled(" ", Style::default()),
        Span::styled(mark, Style::default().fg(mark_color).add_modifier(Modifier::BOLD)),
        Span::styled(format!(" {}", label), Style::default().fg(p.text)),
    ]);
    if focused {
        line = line.style(Style::default().bg(p.bg_selected));
    }
    line
}

/// Boxed figure with a dim title above a bold value
pub fn stat_card<'a>(title: &'a str, value: String, color: Color, border: Color) -> Paragraph<'a> {
    Paragraph::new(vec![
        Line::from(Span::styled(value, Style::default().fg(color).add_modifier(Modifier::BOLD))),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .title(Span::styled(format!(" {} ", title), Style::default().fg(border)))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border)),
    )
}

/// One line per grid row
pub fn tree_rows<'a>(grid: &IconGrid, color: Color) -> Vec<Line<'a>> {
    grid.rows()
        .into_iter()
        .map(|n| {
            let icons = vec![TREE_ICON; n].join(" ");
            Line::from(Span::styled(format!(" {}", icons), Style::default().fg(color)))
        })
        .collect()
}

/// Pagination dots, the current page filled
pub fn page_dots<'a>(pages: usize, current: usize, active: Color, idle: Color) -> Line<'a> {
    let spans: Vec<Span> = (0..pages)
        .map(|i| {
            if i == current {
                Span::styled("● ", Style::default().fg(active))
            } else {
                Span::styled("○ ", Style::default().fg(idle))
            }
        })
        .collect();
    Line::from(spans).alignment(Alignment::Center)
}
