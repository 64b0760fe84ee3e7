use ratatui::{prelude::*, widgets::*};

use crate::app::LoadState;
use crate::models::UserRecord;

/// Column titles of the user table
pub const COLUMNS: [&str; 3] = ["Name", "Location", "Username"];

const SPINNER_FRAMES: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

/// Spinner glyph for the given UI tick
pub fn spinner_frame(tick: usize) -> &'static str {
    SPINNER_FRAMES[tick % SPINNER_FRAMES.len()]
}

/// Cells of one table row: name, city, username
pub fn user_row_cells(user: &UserRecord) -> [&str; 3] {
    [&user.name, &user.address.city, &user.username]
}

/// Renders the user table, one row per record
pub fn render_user_table<'a>(users: &'a [UserRecord], title: String) -> Table<'a> {
    let header = Row::new(COLUMNS.iter().map(|c| Cell::from(*c)))
        .style(Style::default().fg(Color::Cyan).bold())
        .bottom_margin(1);

    let rows: Vec<Row> = users
        .iter()
        .map(|user| Row::new(user_row_cells(user).map(Cell::from)))
        .collect();

    Table::new(
        rows,
        [
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title(title))
    .row_highlight_style(Style::default().fg(Color::Black).bg(Color::Yellow))
    .highlight_symbol("> ")
}

/// Color of the status indicator for a load state
pub fn state_color(state: &LoadState) -> Color {
    match state {
        LoadState::Idle => Color::DarkGray,
        LoadState::Loading => Color::Yellow,
        LoadState::Success(_) => Color::Green,
        LoadState::Error(_) => Color::Red,
    }
}

/// Rect of the given percentage size centered in `r`
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
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
