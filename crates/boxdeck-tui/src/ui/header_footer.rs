use super::*;

/// Keys shown in the header, in display order
pub(super) const KEY_HELP: &[(&str, &str)] = &[
    ("Left/Right", "change page"),
    ("Enter", "enter session"),
    ("S", "stop session"),
    ("X", "remove session"),
    ("R", "refresh view"),
    ("Q", "quit"),
];

pub(super) fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.view.theme;
    let mut spans = Vec::with_capacity(KEY_HELP.len() * 2 + 1);
    for (key, action) in KEY_HELP {
        spans.push(Span::styled(*key, Style::default().fg(theme.subtle).bold()));
        spans.push(Span::styled(format!(" {}  ", action), theme.base_style()));
    }
    spans.push(Span::styled("?", Style::default().fg(theme.subtle).bold()));
    spans.push(Span::styled(" help", theme.base_style()));

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .title(" boxdeck ")
            .title_style(theme.title_style())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border)),
    );

    frame.render_widget(header, area);
}

/// Footer text for the current page and selection
pub(super) fn footer_text(app: &App) -> String {
    match app.selected_session() {
        Some(session) => format!(
            "Pg. {}/{} - Currently looking at: {}",
            app.page() + 1,
            app.pages(),
            session.name()
        ),
        None => "Pg. 1/1 - No sessions".to_string(),
    }
}

pub(super) fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.view.theme;
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(20)])
        .split(area);

    let line = match app.selected_session() {
        Some(session) => Line::from(vec![
            Span::styled(
                format!(" Pg. {}/{} - Currently looking at: ", app.page() + 1, app.pages()),
                theme.base_style(),
            ),
            Span::styled(
                session.name().to_string(),
                Style::default().fg(theme.footer_name).bold(),
            ),
        ]),
        None => Line::styled(format!(" {}", footer_text(app)), theme.base_style()),
    };
    frame.render_widget(Paragraph::new(line), chunks[0]);

    if let Some(at) = app.last_refreshed {
        let refreshed = Paragraph::new(format!("Refreshed {} ", at.format("%H:%M:%S")))
            .style(Style::default().fg(theme.border))
            .alignment(Alignment::Right);
        frame.render_widget(refreshed, chunks[1]);
    }
}

pub(super) fn draw_status(frame: &mut Frame, app: &App, area: Rect) {
    let Some(status) = &app.status else {
        return;
    };
    let style = match status.severity {
        Severity::Error => Style::default().fg(Color::Red),
        Severity::Info => Style::default().fg(app.view.theme.subtle),
    };
    frame.render_widget(Paragraph::new(format!(" {}", status.text)).style(style), area);
}
