use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::config::ColorConfig;
use crate::domain::VideoItem;
use crate::gateway::ApiEndpoint;
use crate::tui::app::{ActivePane, TuiApp};

pub fn render(frame: &mut Frame, app: &mut TuiApp, colors: &ColorConfig, endpoint: &ApiEndpoint) {
    if app.maximized {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(10),   // Details pane (full height)
                Constraint::Length(1), // Status bar
            ])
            .split(frame.area());

        render_details_pane(frame, app, chunks[0], colors, endpoint);
        render_status_bar(frame, app, chunks[1], colors);
    } else {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(10),   // Panes
                Constraint::Length(1), // Status bar
            ])
            .split(frame.area());
        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(rows[0]);

        render_feed_pane(frame, app, panes[0], colors);
        render_details_pane(frame, app, panes[1], colors, endpoint);
        render_status_bar(frame, app, rows[1], colors);
    }
}

fn border_style(app: &TuiApp, pane: ActivePane, colors: &ColorConfig) -> Style {
    if app.active_pane == pane {
        Style::default().fg(colors.active_border)
    } else {
        Style::default().fg(colors.inactive_border)
    }
}

fn render_feed_pane(frame: &mut Frame, app: &mut TuiApp, area: Rect, colors: &ColorConfig) {
    let items: Vec<ListItem> = app
        .snapshot
        .items
        .iter()
        .map(|item| {
            let date = item
                .published_at
                .map(|d| d.format("%m/%d").to_string())
                .unwrap_or_else(|| "     ".to_string());

            let content = format!(
                "{} {:>7} {}",
                date,
                item.display_duration(),
                item.display_title()
            );

            if is_locked(item) {
                ListItem::new(content).style(Style::default().fg(colors.locked_item))
            } else {
                ListItem::new(content)
            }
        })
        .collect();

    let position = app.selected_index().map(|i| i + 1).unwrap_or(0);
    let title = format!(
        " Feed [{}/{}] next offset {} ",
        position,
        app.snapshot.len(),
        app.snapshot.next_offset
    );

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style(app, ActivePane::Feed, colors));

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(colors.selection_bg)
                .fg(colors.selection_fg)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn render_details_pane(
    frame: &mut Frame,
    app: &TuiApp,
    area: Rect,
    colors: &ColorConfig,
    endpoint: &ApiEndpoint,
) {
    let (title, content) = match app.selected_item() {
        Some(item) => (
            format!(" #{} ", item.id),
            Text::from(detail_lines(item, colors, endpoint)),
        ),
        None if app.snapshot.is_loading => (" Details ".to_string(), Text::from("Loading...")),
        None => (" Details ".to_string(), Text::from("Nothing to show")),
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style(app, ActivePane::Details, colors));

    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.details_scroll, 0));

    frame.render_widget(paragraph, area);
}

fn detail_lines(item: &VideoItem, colors: &ColorConfig, endpoint: &ApiEndpoint) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            item.display_title().to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("Channel: {}", item.channel_name),
            Style::default().fg(colors.metadata_channel),
        )),
    ];

    if let Some(date) = item.published_at {
        lines.push(Line::from(Span::styled(
            format!("Published: {}", date.format("%Y-%m-%d %H:%M UTC")),
            Style::default().fg(colors.metadata_date),
        )));
    }

    lines.push(Line::from(format!(
        "Views: {}  Duration: {}",
        item.view_count,
        item.display_duration()
    )));

    let mut flags = Vec::new();
    if item.is_free {
        flags.push("free");
    }
    if !item.has_access {
        flags.push("no access");
    }
    flags.push(if item.is_vertical { "vertical" } else { "horizontal" });
    lines.push(Line::from(format!("{}  [{}]", item.content_type, flags.join(", "))));

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("Stream: {}", item.stream_url(endpoint)),
        Style::default().fg(colors.metadata_link),
    )));
    if let Some(preview) = &item.preview_image_url {
        lines.push(Line::from(Span::styled(
            format!("Preview: {}", preview),
            Style::default().fg(colors.metadata_link),
        )));
    }

    lines
}

fn is_locked(item: &VideoItem) -> bool {
    !item.is_free && !item.has_access
}

fn render_status_bar(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    if let Some(error) = &app.snapshot.last_error {
        let paragraph = Paragraph::new(format!("Error: {}  (x:Dismiss  j:Retry)", error))
            .style(Style::default().fg(colors.error_fg).bg(colors.error_bg));
        frame.render_widget(paragraph, area);
        return;
    }

    let status = if app.snapshot.is_loading {
        "Loading...".to_string()
    } else if let Some(ref msg) = app.status_message {
        msg.clone()
    } else if !app.snapshot.has_more {
        "End of feed  R:Reload  q:Quit".to_string()
    } else if app.maximized {
        "j/k:Scroll  o:Open  m:Exit maximize  q:Quit".to_string()
    } else {
        "j/k:Nav  Tab:Pane  o:Open  R:Reload  x:Dismiss  m:Max  q:Quit".to_string()
    };

    let paragraph =
        Paragraph::new(status).style(Style::default().fg(colors.status_fg).bg(colors.status_bg));

    frame.render_widget(paragraph, area);
}
