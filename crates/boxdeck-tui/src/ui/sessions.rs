use super::*;

pub(super) fn draw_sessions(frame: &mut Frame, app: &mut App, area: Rect) {
    let theme = app.view.theme;
    let block = Block::default()
        .title(" Sessions ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border));

    if app.sessions.is_empty() {
        let empty = Paragraph::new(
            "No distrobox sessions found.\n\n\
             Create one with 'distrobox create', then press R to refresh.",
        )
        .style(theme.base_style().add_modifier(Modifier::DIM))
        .block(block)
        .wrap(Wrap { trim: true });

        frame.render_widget(empty, area);
        return;
    }

    let header = Row::new(app.view.columns.iter().map(|c| Cell::from(c.title)))
        .style(theme.header_style())
        .bottom_margin(1);

    let rows: Vec<Row> = app
        .page_sessions()
        .iter()
        .map(|session| {
            Row::new(app.view.columns.iter().map(|column| {
                let cell = Cell::from(column.field.value(session).to_string());
                match column.field {
                    Field::Id | Field::Image => cell.style(theme.accent_style()),
                    Field::Name | Field::Status => cell,
                }
            }))
        })
        .collect();

    let widths: Vec<Constraint> = app.view.columns.iter().map(|c| c.width).collect();
    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .style(theme.base_style())
        .highlight_style(theme.highlight_style());

    frame.render_stateful_widget(table, area, &mut app.table_state);
}
