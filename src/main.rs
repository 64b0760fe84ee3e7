//! Roster TUI - Actor-based viewer for a remote user directory
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - data loader state machine processing events
//! - Network Layer (Tokio) - async HTTP execution

use std::io;
use std::time::Duration;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::*,
};
use tokio::sync::mpsc;

use roster_tui::app::{AppActor, LoadState};
use roster_tui::config::Config;
use roster_tui::constants::{APP_NAME, APP_VERSION, DEFAULT_LOG_FILE};
use roster_tui::messages::ui_events::key_to_ui_event;
use roster_tui::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
use roster_tui::network::{HttpUserSource, NetworkActor, UserSource};
use roster_tui::ui::{centered_rect, render_user_table, spinner_frame, state_color};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;

    // Initialize logging to file
    let log_dir = config
        .log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| std::path::Path::new("."));
    let log_name = config
        .log_file
        .file_name()
        .unwrap_or_else(|| std::ffi::OsStr::new(DEFAULT_LOG_FILE));
    let file_appender = tracing_appender::rolling::never(log_dir, log_name);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    tracing::info!(version = APP_VERSION, endpoint = %config.endpoint, "Starting");

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _terminal_guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn network actor
    let source = HttpUserSource::from_config(&config);
    let source_label = source.describe();
    let network_actor = NetworkActor::new(source, net_resp_tx);
    let network_handle = tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(source_label, net_cmd_tx, render_tx);
    let app_handle = tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    // Let the app actor unmount and the network actor cancel in-flight work
    let _ = app_handle.await;
    let _ = network_handle.await;
    tracing::info!("Stopped");

    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::initial();
    let mut table_state = TableState::default();
    let mut tick = 0usize;

    loop {
        // Draw with current state
        terminal.draw(|f| draw_ui(f, &current_state, &mut table_state, tick))?;
        tick = tick.wrapping_add(1);

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(key, current_state.show_help) {
                    let quit = matches!(event, UiEvent::Quit);
                    let _ = ui_tx.send(event);
                    if quit {
                        break;
                    }
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState, table_state: &mut TableState, tick: usize) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Title
            Constraint::Min(5),     // Content
            Constraint::Length(1),  // Status bar
        ])
        .split(area);

    draw_title(f, state, chunks[0]);

    match &state.load_state {
        LoadState::Idle => draw_centered_message(f, chunks[1], "Waiting to start...", Color::DarkGray),
        LoadState::Loading => draw_loading(f, chunks[1], tick),
        LoadState::Error(message) => draw_error(f, chunks[1], message),
        LoadState::Success(users) => {
            table_state.select(if users.is_empty() { None } else { Some(state.selected_row) });
            let title = format!(" Users ({}) ", users.len());
            f.render_stateful_widget(render_user_table(users, title), chunks[1], table_state);
        }
    }

    draw_status_bar(f, state, chunks[2]);

    if state.show_help {
        draw_help_popup(f, area);
    }
}

fn draw_title(f: &mut Frame, state: &RenderState, area: Rect) {
    let title = Line::from(vec![
        Span::styled(format!(" {} ", APP_NAME), Style::default().fg(Color::Cyan).bold()),
        Span::styled(format!("v{} ", APP_VERSION), Style::default().fg(Color::DarkGray)),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue))
        .title(title);

    let source = Paragraph::new(Line::from(vec![
        Span::styled("API call from ", Style::default().fg(Color::Gray)),
        Span::styled(state.source.as_str(), Style::default().fg(Color::White)),
    ]))
    .block(block);

    f.render_widget(source, area);
}

fn draw_loading(f: &mut Frame, area: Rect, tick: usize) {
    let text = format!("{} Loading users...", spinner_frame(tick));
    draw_centered_message(f, area, &text, Color::Yellow);
}

fn draw_error(f: &mut Frame, area: Rect, message: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(" Error ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let text = vec![
        Line::from(Span::styled(message, Style::default().fg(Color::Red).bold())),
        Line::from(""),
        Line::from(vec![
            Span::raw("Press "),
            Span::styled(" r ", Style::default().fg(Color::Black).bg(Color::White).bold()),
            Span::raw(" to refetch"),
        ]),
    ];

    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, vertical_center(inner, 3));
}

fn draw_centered_message(f: &mut Frame, area: Rect, text: &str, color: Color) {
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(color))
        .alignment(Alignment::Center);
    f.render_widget(paragraph, vertical_center(inner, 1));
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let mut spans = vec![Span::styled(
        format!(" {} ", state.load_state.label().to_uppercase()),
        Style::default().fg(Color::Black).bg(state_color(&state.load_state)),
    )];

    if let (Some(at), Some(ms)) = (&state.fetched_at, state.last_fetch_ms) {
        spans.push(Span::styled(
            format!(" fetched {} in {}ms ", at, ms),
            Style::default().fg(Color::DarkGray),
        ));
    }

    spans.push(Span::styled(
        " r:refetch | ↑/↓:select | ?:help | q:quit ",
        Style::default().fg(Color::DarkGray),
    ));

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(50, 50, area);

    let help_text = r#"
 ROSTER TUI - Keyboard Shortcuts

 DATA
   r / F5             Refetch users

 TABLE
   ↑ / k              Previous row
   ↓ / j              Next row
   Home / g           First row
   End / G            Last row

 GENERAL
   ?                  Toggle this help
   q / Esc / Ctrl+C   Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

/// A band of `height` rows vertically centered in `area`
fn vertical_center(area: Rect, height: u16) -> Rect {
    let height = height.min(area.height);
    let y = area.y + (area.height - height) / 2;
    Rect::new(area.x, y, area.width, height)
}
