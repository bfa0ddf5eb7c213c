use super::*;

const NAVIGATION_HELP: &[(&str, &str)] = &[
    ("j / Down", "next session"),
    ("k / Up", "previous session"),
    ("g / G", "first / last session"),
    ("X / Delete", "remove session"),
    ("F5", "refresh view"),
];

pub(super) fn draw_help(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.view.theme;
    let key_style = Style::default().fg(theme.subtle).bold();

    let lines: Vec<Line> = KEY_HELP
        .iter()
        .chain(NAVIGATION_HELP)
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(format!("{:<12}", key), key_style),
                Span::styled(*action, theme.base_style()),
            ])
        })
        .chain([
            Line::from(""),
            Line::styled("Press any key to close", theme.base_style().add_modifier(Modifier::DIM)),
        ])
        .collect();

    let help = Paragraph::new(lines).block(
        Block::default()
            .title(" Help ")
            .title_style(theme.title_style())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.title)),
    );

    frame.render_widget(help, area);
}
