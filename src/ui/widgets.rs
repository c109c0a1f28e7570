use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::models::{TableStatus, ZoneColor};

use super::app::{Field, SettingsApp};

fn zone_color(color: ZoneColor) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

/// Render the editable threshold and system fields
pub fn render_fields(area: Rect, buf: &mut Buffer, app: &SettingsApp) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Athlete Settings ")
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    block.render(area, buf);

    let mut lines = Vec::new();
    for (i, field) in Field::ALL.iter().enumerate() {
        let selected = i == app.selected;

        let value = match field {
            Field::Ftp => display_value(&app.ftp_input),
            Field::MaxHr => display_value(&app.max_hr_input),
            Field::RestingHr => display_value(&app.resting_hr_input),
            Field::PowerSystem => format!("< {} >", app.power_system),
            Field::HrSystem => format!("< {} >", app.hr_system),
        };

        let marker = if selected { "▶ " } else { "  " };
        let value_style = if selected && app.editing {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else if selected {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };

        lines.push(Line::from(vec![
            Span::raw(marker),
            Span::styled(format!("{:<18}", field.label()), Style::default().fg(Color::Gray)),
            Span::styled(value, value_style),
        ]));
    }

    if app.dirty {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "unsaved changes",
            Style::default().fg(Color::Yellow),
        )));
    }

    Paragraph::new(lines).render(inner, buf);
}

fn display_value(input: &str) -> String {
    if input.is_empty() {
        "(not set)".to_string()
    } else {
        input.to_string()
    }
}

/// Render one calculated zone table, or the prompt explaining its absence
pub fn render_zone_table(
    area: Rect,
    buf: &mut Buffer,
    title: &str,
    unit: &str,
    status: &TableStatus,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", title))
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    block.render(area, buf);

    let lines = match status {
        TableStatus::Unavailable(reason) => vec![
            Line::from(""),
            Line::from(Span::styled(
                reason.clone(),
                Style::default().fg(Color::Yellow),
            )),
        ],
        TableStatus::Ready(table) => table
            .iter()
            .map(|zone| {
                let range = match zone.max_absolute {
                    Some(max) => format!("{:>4}-{:<4} {}", zone.min_absolute, max, unit),
                    None => format!("{:>4}+     {}", zone.min_absolute, unit),
                };

                Line::from(vec![
                    Span::styled(
                        format!("{}. ", zone.index),
                        Style::default().fg(Color::Gray),
                    ),
                    Span::styled(
                        format!("{:<16}", zone.name),
                        Style::default()
                            .fg(zone_color(zone.color))
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(range),
                ])
            })
            .collect(),
    };

    Paragraph::new(lines).render(inner, buf);
}

/// Render the status bar at the bottom of the screen
pub fn render_status_bar(area: Rect, buf: &mut Buffer, app: &SettingsApp) {
    let status = Line::from(vec![
        Span::styled(
            format!(" {} ", app.athlete_id),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw(" "),
        Span::styled(app.status.clone(), Style::default().fg(Color::White)),
    ]);

    Paragraph::new(status)
        .style(Style::default().bg(Color::Black))
        .render(area, buf);
}

/// Render the help overlay
pub fn render_help_overlay(area: Rect, buf: &mut Buffer) {
    Clear.render(area, buf);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    block.render(area, buf);

    let lines = vec![
        Line::from(""),
        Line::from("  Tab / Shift-Tab   move between fields"),
        Line::from("  Enter             edit threshold / cycle system"),
        Line::from("  ← / →             cycle zone system"),
        Line::from("  s                 save changes to RidePro"),
        Line::from("  r                 reload from server"),
        Line::from("  ?                 toggle this help"),
        Line::from("  q                 quit"),
        Line::from(""),
        Line::from("  Edits preview locally; nothing is saved"),
        Line::from("  until you press s."),
    ];

    Paragraph::new(lines).render(inner, buf);
}
