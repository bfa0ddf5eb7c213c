use boxdeck_core::test_support::MockQuery;
use boxdeck_core::{Inventory, LifecycleController, MembershipPolicy, Session};
use boxdeck_tui::{App, ViewConfig};
use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
use std::sync::Arc;

/// App backed by a mock query
#[allow(dead_code)]
pub fn app_with_query(mock: MockQuery) -> (App, Arc<MockQuery>) {
    app_with_wrapper(mock, "distrobox")
}

/// App backed by a mock query whose lifecycle commands run `wrapper`
#[allow(dead_code)]
pub fn app_with_wrapper(mock: MockQuery, wrapper: &str) -> (App, Arc<MockQuery>) {
    let mock = Arc::new(mock);
    let inventory = Inventory::new(mock.clone(), MembershipPolicy::default());
    let app = App::new(inventory, LifecycleController::new(wrapper), ViewConfig::default());
    (app, mock)
}

/// App with a pre-installed snapshot of the given session names
#[allow(dead_code)]
pub fn app_with_sessions(names: &[&str]) -> App {
    let (mut app, _) = app_with_query(MockQuery::with_records(vec![]));
    app.set_sessions(
        names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                Session::new(
                    format!("{:012x}abcd", i + 1),
                    *name,
                    "Up 3 hours",
                    "registry.fedoraproject.org/fedora-toolbox:39",
                )
            })
            .collect(),
    );
    app
}

/// Render the app to a TestBackend and capture output as a string
#[allow(dead_code)]
pub fn render_app(app: &mut App, width: u16, height: u16) -> String {
    buffer_to_string(&render_buffer(app, width, height))
}

/// Render the app to a TestBackend and return the raw buffer
#[allow(dead_code)]
pub fn render_buffer(app: &mut App, width: u16, height: u16) -> Buffer {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| boxdeck_tui::ui::draw(frame, app))
        .unwrap();
    terminal.backend().buffer().clone()
}

/// Convert a ratatui buffer to a string representation
#[allow(dead_code)]
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let mut output = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            let cell = buffer.get(x, y);
            output.push_str(cell.symbol());
        }
        output.push('\n');
    }
    output
}
