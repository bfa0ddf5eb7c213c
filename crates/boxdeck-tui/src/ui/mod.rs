//! UI rendering for the dashboard

mod header_footer;
mod help;
mod sessions;

use crate::app::{App, Field, Severity};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
};

use header_footer::*;
use help::*;
use sessions::*;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.size();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title and key help
            Constraint::Min(0),    // Session table
            Constraint::Length(1), // Page footer
            Constraint::Length(1), // Status line
        ])
        .split(area);

    draw_header(frame, app, chunks[0]);
    draw_sessions(frame, app, chunks[1]);
    draw_footer(frame, app, chunks[2]);
    draw_status(frame, app, chunks[3]);

    if app.show_help {
        let popup = centered_rect(44, 15, area);
        frame.render_widget(Clear, popup);
        draw_help(frame, app, popup);
    }
}

/// A rectangle of the given size centered in `area`, clipped to it
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
