//! UI rendering for the TUI.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Paragraph},
    Frame,
};

use crate::tui::app::{App, Mode, SettingsForm};

/// Render the application UI.
pub fn render(frame: &mut Frame<'_>, app: &App) {
    // Create layout: header, timer body, progress gauge, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(7),    // Timer body
            Constraint::Length(3), // Progress gauge
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, chunks[0]);
    render_timer(frame, app, chunks[1]);
    render_gauge(frame, app, chunks[2]);
    render_status_bar(frame, app, chunks[3]);

    if let Mode::Settings(form) = &app.mode {
        render_settings(frame, form);
        if let Some(error) = &form.error {
            render_error(frame, error);
        }
    }
}

/// Render the header.
fn render_header(frame: &mut Frame<'_>, area: Rect) {
    let header = Paragraph::new(" Pomodoro ")
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

    frame.render_widget(header, area);
}

/// Render the countdown, phase label, and controls.
fn render_timer(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let auto_start = if app.controller.config().auto_start {
        "[x]"
    } else {
        "[ ]"
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            app.view.timer_text.clone(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(app.view.phase_label.clone()),
        Line::from(""),
        Line::from(Span::styled(
            format!("{auto_start} Auto-start sessions (a)"),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!("(space) {}", app.view.start_button_label),
                Style::default().fg(Color::Green),
            ),
            Span::raw("   "),
            Span::styled("(r) Reset", Style::default().fg(Color::Red)),
            Span::raw("   "),
            Span::styled("(o) Settings", Style::default().fg(Color::Blue)),
        ]),
    ];

    let body = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(body, area);
}

/// Render the phase progress gauge.
fn render_gauge(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Yellow))
        .ratio(app.controller.progress().clamp(0.0, 1.0))
        .label(app.view.timer_text.clone());

    frame.render_widget(gauge, area);
}

/// Render the status bar.
fn render_status_bar(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let status_text = app
        .status
        .as_deref()
        .unwrap_or("space:start/pause | r:reset | o:settings | a:auto-start | ?:help | q:quit");

    let status = Paragraph::new(status_text).style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, area);
}

/// Render the settings form popup.
fn render_settings(frame: &mut Frame<'_>, form: &SettingsForm) {
    let area = centered_rect(50, 12, frame.area());
    frame.render_widget(Clear, area);

    let mut lines: Vec<Line<'_>> = form
        .fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let style = if i == form.selected {
                Style::default().bg(Color::DarkGray)
            } else {
                Style::default()
            };
            Line::from(Span::styled(
                format!(" {:<28}{}", field.name, field.value),
                style,
            ))
        })
        .collect();

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " Enter:save   Esc:cancel   Tab:next field",
        Style::default().fg(Color::DarkGray),
    )));

    let popup = Paragraph::new(lines).block(
        Block::default()
            .title(" Settings ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue)),
    );

    frame.render_widget(popup, area);
}

/// Render the validation-error popup over the settings form.
fn render_error(frame: &mut Frame<'_>, error: &str) {
    let area = centered_rect(50, 5, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(error.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            "press any key",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let popup = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title(" Error ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        );

    frame.render_widget(popup, area);
}

/// Center a fixed-height popup of `percent_x` width within `area`.
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(height),
            Constraint::Min(1),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_stays_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_rect(50, 12, area);

        assert!(popup.x >= area.x);
        assert!(popup.y >= area.y);
        assert!(popup.right() <= area.right());
        assert!(popup.bottom() <= area.bottom());
        assert_eq!(popup.height, 12);
    }
}
