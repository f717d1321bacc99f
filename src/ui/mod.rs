mod components;

use std::sync::OnceLock;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Popup, Section};
use crate::calculator::{CalculatorState, Control};
use crate::savings::{SavingsResult, MAX_CATS, MAX_CHANGES, MIN_CATS, MIN_CHANGES};
use crate::testimonials::{SlideDirection, PER_VIEW};
use crate::theme::Theme;
use components::Palette;

// Palette chosen once at startup (config overrides applied in main)
static THEME: OnceLock<Theme> = OnceLock::new();

/// Install the palette; only the first call has any effect
pub fn init_theme(theme: Theme) {
    if THEME.set(theme).is_err() {
        tracing::debug!("Theme already initialized");
    }
}

fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::default)
}

// Helper functions to get theme colors
fn accent() -> Color { theme().accent }
fn accent_bright() -> Color { theme().accent_bright }
fn inactive() -> Color { theme().inactive }
fn warning() -> Color { theme().warning }
fn text() -> Color { theme().text }
fn text_dim() -> Color { theme().text_dim }
fn header() -> Color { theme().header }

fn palette() -> Palette {
    Palette {
        accent: accent(),
        text: text(),
        text_dim: text_dim(),
        bg_selected: theme().bg_selected,
    }
}

/// Text shown for each result, shared by the widget and `--print`
pub fn format_result(result: &SavingsResult) -> [(&'static str, String); 3] {
    [
        ("Yearly Savings", format!("${:.2}", result.money_saved)),
        ("Cat Food Months", format!("{:.1}", result.cat_food_months)),
        ("Trees Saved", format!("{:.1}", result.trees_saved)),
    ]
}

pub fn draw(f: &mut Frame, app: &App) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(1),               // Info line
            Constraint::Min(10),                 // Calculator + testimonials
            Constraint::Length(1),               // Footer
        ])
        .split(area);

    // Side by side on wide terminals, stacked otherwise
    let body = if chunks[1].width >= 110 {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(58), Constraint::Percentage(42)])
            .split(chunks[1])
    } else {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(20), Constraint::Length(14)])
            .split(chunks[1])
    };

    draw_info_line(f, app, chunks[0]);
    draw_calculator(f, app, body[0]);
    draw_testimonials(f, app, body[1]);
    draw_footer(f, app, chunks[2]);

    // Draw popups on top
    match app.popup {
        Popup::None => {}
        Popup::Help => draw_help_popup(f),
    }
}

fn section_block(title: &str, is_active: bool) -> Block<'static> {
    let border_color = if is_active { accent() } else { inactive() };
    let title_style = if is_active {
        Style::default().fg(accent()).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(inactive())
    };

    Block::default()
        .title(Span::styled(format!(" {} ", title), title_style))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
}

fn draw_info_line(f: &mut Frame, app: &App, area: Rect) {
    // Priority: status message > current inputs summary
    let line = if let Some(ref status) = app.status_message {
        Line::from(vec![
            Span::styled(status.as_str(), Style::default().fg(warning())),
        ])
    } else {
        let inputs = app.calculator.inputs();
        Line::from(vec![
            Span::styled("󰄛 ", Style::default().fg(accent())),
            Span::styled(
                format!(
                    "{} cat{} │ {} litter │ {} changes/month │ baseline ${:.2}/month",
                    inputs.cats_count,
                    if inputs.cats_count == 1 { "" } else { "s" },
                    inputs.tier().label(),
                    inputs.litter_changes_per_month,
                    app.calculator.baseline_cost(),
                ),
                Style::default().fg(text_dim()),
            ),
        ])
    };

    let info = Paragraph::new(line).alignment(Alignment::Center);
    f.render_widget(info, area);
}

fn draw_calculator(f: &mut Frame, app: &App, area: Rect) {
    let is_active = app.section == Section::Calculator;
    let block = section_block("Savings Calculator", is_active);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let state = &app.calculator;
    let grid_rows = state.icon_grid().rows().len() as u16;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),               // Heading
            Constraint::Length(4),               // Controls
            Constraint::Length(3),               // Result cards
            Constraint::Length(grid_rows + 1),   // Tree icons
            Constraint::Min(0),
            Constraint::Length(1),               // Call to action
        ])
        .split(inner);

    let heading = Paragraph::new(vec![
        Line::from(Span::styled(
            "Calculate Your Savings with Purrify",
            Style::default().fg(header()).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "See how much you can save while helping the environment",
            Style::default().fg(text_dim()),
        )),
    ])
    .alignment(Alignment::Center);
    f.render_widget(heading, chunks[0]);

    f.render_widget(Paragraph::new(control_lines(state, is_active)), chunks[1]);
    draw_result_cards(f, state.result(), chunks[2]);

    let mut trees = vec![Line::from(Span::styled(
        " Trees saved this year",
        Style::default().fg(text_dim()),
    ))];
    trees.extend(components::tree_rows(&state.icon_grid(), theme().trees));
    f.render_widget(Paragraph::new(trees), chunks[3]);

    let cta = Paragraph::new(Line::from(Span::styled(
        "Start Saving with Purrify Today",
        Style::default().fg(accent_bright()).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    f.render_widget(cta, chunks[5]);
}

fn control_lines(state: &CalculatorState, is_active: bool) -> Vec<Line<'static>> {
    let p = palette();
    let inputs = state.inputs();
    let focused = |c: Control| is_active && state.focus() == c;

    vec![
        components::slider_line("Number of Cats", inputs.cats_count, MIN_CATS, MAX_CATS, focused(Control::Cats), &p),
        components::checkbox_line("Premium litter", inputs.is_premium_litter, focused(Control::Premium), &p),
        components::slider_line(
            "Litter Changes Per Month",
            inputs.litter_changes_per_month,
            MIN_CHANGES,
            MAX_CHANGES,
            focused(Control::Changes),
            &p,
        ),
        Line::from(Span::styled(
            format!(" Baseline litter cost: ${:.2}/month", state.baseline_cost()),
            Style::default().fg(text_dim()),
        )),
    ]
}

fn draw_result_cards(f: &mut Frame, result: &SavingsResult, area: Rect) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(area);

    let colors = [theme().money, theme().food, theme().trees];
    for (i, (title, value)) in format_result(result).into_iter().enumerate() {
        f.render_widget(components::stat_card(title, value, colors[i], inactive()), cards[i]);
    }
}

fn draw_testimonials(f: &mut Frame, app: &App, area: Rect) {
    let is_active = app.section == Section::Testimonials;
    let carousel = &app.carousel;

    let arrow = match carousel.direction() {
        SlideDirection::Forward => "›",
        SlideDirection::Backward => "‹",
        SlideDirection::None => " ",
    };
    let first = carousel.index() + 1;
    let last = (carousel.index() + PER_VIEW).min(carousel.len());
    let block = section_block(
        &format!("What Our Customers Say {} {}-{} of {}", arrow, first, last, carousel.len()),
        is_active,
    );
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    let mut lines = Vec::new();
    for testimonial in carousel.visible() {
        lines.push(Line::from(vec![
            Span::styled(testimonial.author, Style::default().fg(text()).add_modifier(Modifier::BOLD)),
            Span::styled(format!(" · {}", testimonial.location), Style::default().fg(text_dim())),
        ]));
        lines.push(Line::from(Span::styled(
            format!("“{}”", testimonial.quote),
            Style::default().fg(text()).add_modifier(Modifier::ITALIC),
        )));
        lines.push(Line::from(""));
    }

    let quotes = Paragraph::new(lines).wrap(Wrap { trim: true });
    f.render_widget(quotes, chunks[0]);

    let active_dot = if is_active { accent() } else { text() };
    f.render_widget(
        Paragraph::new(components::page_dots(carousel.page_count(), carousel.index(), active_dot, inactive())),
        chunks[1],
    );
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let hints: Vec<(&str, &str)> = match app.section {
        Section::Calculator => vec![
            ("↑↓", "Control"),
            ("←→", "Adjust"),
            ("Space", "Premium"),
            ("0-9", "Set"),
            ("r", "Reset"),
            ("Tab", "Next"),
            ("?", "Help"),
            ("q", "Quit"),
        ],
        Section::Testimonials => vec![
            ("←→", "Slide"),
            ("1-9", "Page"),
            ("Tab", "Next"),
            ("?", "Help"),
            ("q", "Quit"),
        ],
    };

    // Responsive: show fewer hints on narrow terminals
    let max_hints = if area.width < 60 { 4 } else if area.width < 80 { 5 } else { hints.len() };

    let hint_spans: Vec<Span> = hints
        .iter()
        .take(max_hints)
        .flat_map(|(key, action)| {
            vec![
                Span::styled(*key, Style::default().fg(accent())),
                Span::styled(format!(" {} │ ", action), Style::default().fg(text_dim())),
            ]
        })
        .collect();

    let footer = Paragraph::new(Line::from(hint_spans))
        .alignment(Alignment::Center);

    f.render_widget(footer, area);
}

fn draw_help_popup(f: &mut Frame) {
    let area = f.area();
    let popup_area = centered_rect(
        if area.width < 80 { 95 } else { 60 },
        if area.height < 30 { 95 } else { 70 },
        area
    );

    f.render_widget(Clear, popup_area);

    let key_line = |key: &'static str, what: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<10}", key), Style::default().fg(accent())),
            Span::raw(what),
        ])
    };
    let heading = |title: &'static str| {
        Line::from(Span::styled(title, Style::default().fg(header()).add_modifier(Modifier::BOLD)))
    };

    let help_text = vec![
        heading("═══ Navigation ═══"),
        key_line("Tab", "Switch between calculator and testimonials"),
        key_line("?", "Toggle this help"),
        key_line("q/Ctrl-C", "Quit"),
        Line::from(""),
        heading("═══ Calculator ═══"),
        key_line("↑/↓ k/j", "Move between controls"),
        key_line("←/→ h/l", "Adjust slider (or toggle premium)"),
        key_line("-/+", "Adjust slider"),
        key_line("Space", "Toggle premium litter"),
        key_line("0-9", "Set the focused control (0 = 10 changes, off)"),
        key_line("r", "Reset to defaults"),
        Line::from(""),
        heading("═══ Testimonials ═══"),
        key_line("←/→", "Previous / next"),
        key_line("1-9", "Jump to page"),
        Line::from(vec![Span::raw("            Slides advance on their own every few seconds")]),
        Line::from(""),
        heading("═══ Command Line ═══"),
        key_line("--print", "Print savings for --cats/--changes/--premium"),
        key_line("--json", "Same, as JSON"),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Press ", Style::default().fg(text_dim())),
            Span::styled("?", Style::default().fg(accent())),
            Span::styled("/", Style::default().fg(text_dim())),
            Span::styled("Esc", Style::default().fg(accent())),
            Span::styled(" to close", Style::default().fg(text_dim())),
        ]),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(Span::styled(" 󰋖 purrify Help ", Style::default().fg(accent())))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(accent())),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
