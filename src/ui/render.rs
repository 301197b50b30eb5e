use crate::catalog::ALL_CATEGORIES;
use crate::ui::app::App;
use crate::ui::theme::Theme;
use crate::usage::FREQUENTLY_USED_TITLE;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

pub fn render(frame: &mut Frame, app: &App) {
    let theme = app.theme();

    frame.render_widget(
        Block::default().style(Style::default().bg(theme.bg).fg(theme.fg)),
        frame.area(),
    );

    // The header collapses to a single line once the list is scrolled
    let header_height = if app.view.scroll.header_scrolled { 1 } else { 3 };

    // Main layout: Header + Search/Categories + Body + Footer
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(header_height),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, app, theme, main_chunks[0]);

    let bar_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(main_chunks[1]);

    render_search(frame, app, theme, bar_chunks[0]);
    render_categories(frame, app, theme, bar_chunks[1]);

    let body_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(main_chunks[2]);

    render_tool_list(frame, app, theme, body_chunks[0]);

    if app.frequent.is_empty() {
        render_details(frame, app, theme, body_chunks[1]);
    } else {
        let right_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(7)])
            .split(body_chunks[1]);

        render_details(frame, app, theme, right_chunks[0]);
        render_frequent(frame, app, theme, right_chunks[1]);
    }

    render_footer(frame, app, theme, main_chunks[3]);
    render_notification(frame, app, theme);
}

fn render_header(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let mut spans = vec![Span::styled(
        "  🧰 ToolDeck - Handy tools in one place  ",
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    )];
    if !app.view.online {
        spans.push(Span::styled("[offline]", Style::default().fg(theme.warning)));
    }

    let header = Paragraph::new(Line::from(spans));
    let header = if app.view.scroll.header_scrolled {
        header
    } else {
        header.block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.accent)),
        )
    };

    frame.render_widget(header, area);
}

fn render_search(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let border_color = if app.search_mode {
        theme.accent
    } else {
        theme.fg_dim
    };

    let text = if app.search_input.is_empty() && !app.search_mode {
        Line::from(Span::styled(
            "Press / or Ctrl+K to search",
            Style::default().fg(theme.fg_dim),
        ))
    } else {
        let cursor = if app.search_mode { "█" } else { "" };
        Line::from(format!("{}{}", app.search_input, cursor))
    };

    let paragraph = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .title("🔍 Search")
            .border_style(Style::default().fg(border_color)),
    );

    frame.render_widget(paragraph, area);
}

fn render_categories(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let active = app.view.active_category.as_deref();

    let entry = |number: usize, key: &str, title: &str| {
        let is_active = active == Some(key) || (active.is_none() && key == ALL_CATEGORIES);
        let style = if is_active {
            Style::default()
                .fg(theme.bg)
                .bg(theme.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.fg)
        };
        vec![
            Span::styled(format!("[{}] {}", number, title), style),
            Span::raw(" "),
        ]
    };

    let mut spans = entry(0, ALL_CATEGORIES, "All");
    for (i, key) in app.catalog.category_keys().into_iter().enumerate().take(9) {
        spans.extend(entry(i + 1, key, app.catalog.category_title(key)));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Categories")
                .border_style(Style::default().fg(theme.fg_dim)),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

fn render_tool_list(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("🧰 Tools ({})", app.view.visible.len()))
        .border_style(Style::default().fg(theme.accent));

    if app.view.no_results {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "No tools found",
                Style::default()
                    .fg(theme.warning)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Try a different search term",
                Style::default().fg(theme.fg_dim),
            )),
        ];
        frame.render_widget(Paragraph::new(text).block(block), area);
        return;
    }

    let items: Vec<ListItem> = app
        .visible_tools()
        .iter()
        .map(|tool| {
            ListItem::new(Line::from(vec![
                Span::raw(tool.title.clone()),
                Span::styled(
                    format!("  {}", app.catalog.category_title(&tool.category)),
                    Style::default().fg(theme.fg_dim),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .style(Style::default().fg(theme.fg))
        .highlight_style(
            Style::default()
                .fg(theme.bg)
                .bg(theme.accent)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default();
    if !app.view.visible.is_empty() {
        state.select(Some(app.selected_index));
    }

    frame.render_stateful_widget(list, area, &mut state);
}

fn render_details(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let text = match app.selected_tool() {
        Some(tool) => {
            let mut lines = vec![
                Line::from(Span::styled(
                    tool.title.clone(),
                    Style::default()
                        .fg(theme.secondary)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(vec![
                    Span::styled("Category: ", Style::default().fg(theme.fg_dim)),
                    Span::raw(app.catalog.category_title(&tool.category).to_string()),
                ]),
            ];
            if let Some(url) = &tool.url {
                lines.push(Line::from(vec![
                    Span::styled("Link: ", Style::default().fg(theme.fg_dim)),
                    Span::styled(url.clone(), Style::default().fg(theme.info)),
                ]));
            }
            lines.extend([
                Line::from(""),
                Line::from(Span::styled(
                    "Description:",
                    Style::default().fg(theme.fg_dim),
                )),
                Line::from(tool.description.clone()),
                Line::from(""),
                Line::from("────────────────────────────────────────"),
                Line::from(""),
                Line::from("[Enter] Open  [y] Copy link  [s] Share"),
            ]);
            lines
        }
        None => vec![
            Line::from("No tool selected"),
            Line::from(""),
            Line::from("Use ↑↓ or j/k to navigate"),
        ],
    };

    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Details")
                .border_style(Style::default().fg(theme.fg_dim)),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

fn render_frequent(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let items: Vec<ListItem> = app
        .frequent_tools()
        .iter()
        .map(|tool| ListItem::new(format!("  {}", tool.title)))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(FREQUENTLY_USED_TITLE)
                .border_style(Style::default().fg(theme.secondary)),
        )
        .style(Style::default().fg(theme.fg));

    frame.render_widget(list, area);
}

fn render_footer(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let mut help_text = if app.search_mode {
        "[Enter] Apply  [Esc] Clear/Back  [↑↓] Navigate".to_string()
    } else {
        "[↑↓/jk] Navigate  [/] Search  [0-9] Category  [Enter] Open  [e] Export  [t] Theme  [Q] Quit"
            .to_string()
    };
    if app.view.scroll.back_to_top_visible {
        help_text.push_str("  [g] ↑ Back to top");
    }

    let footer = Paragraph::new(help_text).style(Style::default().fg(theme.fg_dim));

    frame.render_widget(footer, area);
}

fn render_notification(frame: &mut Frame, app: &App, theme: &Theme) {
    let Some(notification) = app.notifications.current() else {
        return;
    };

    let toast = toast_area(frame.area(), &notification.message);
    let color = theme.notification_color(notification.kind);
    let paragraph = Paragraph::new(notification.message.clone())
        .style(Style::default().fg(theme.fg).bg(theme.bg))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );

    frame.render_widget(Clear, toast);
    frame.render_widget(paragraph, toast);
}

/// Top-right box sized to `message`, never larger than `area`.
fn toast_area(area: Rect, message: &str) -> Rect {
    let width = u16::try_from(message.chars().count())
        .unwrap_or(u16::MAX)
        .saturating_add(4)
        .min(area.width)
        .max(10.min(area.width));
    let height = 3.min(area.height);
    Rect {
        x: area.x + area.width.saturating_sub(width.saturating_add(1)),
        y: area.y + 1.min(area.height.saturating_sub(height)),
        width,
        height,
    }
}
