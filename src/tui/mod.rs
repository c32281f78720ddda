pub mod app;
pub mod event;
pub mod layout;

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::app::{AppContext, Result};
use crate::feed::FeedHandle;

use self::app::TuiApp;
use self::event::{Action, AppEvent, EventHandler};

type Tui = Terminal<CrosstermBackend<Stdout>>;

pub async fn run(ctx: Arc<AppContext>) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, &ctx).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app(terminal: &mut Tui, ctx: &AppContext) -> Result<()> {
    let config = &ctx.config;
    let feed = ctx.spawn_feed();
    let mut tui_app = TuiApp::new();
    let event_handler = EventHandler::new(Duration::from_millis(100));

    feed.refresh()?;

    loop {
        tui_app.apply_snapshot(feed.snapshot());
        terminal.draw(|frame| {
            layout::render(frame, &mut tui_app, &config.colors, &ctx.endpoint)
        })?;

        match event_handler.next()? {
            AppEvent::Key(key) => {
                let action = config.keybindings.get_action(&key);
                handle_action(action, &mut tui_app, &feed, ctx)?;
            }
            AppEvent::Tick => {}
        }

        if tui_app.should_quit {
            break;
        }
    }

    // the controller may already be gone; nothing left to stop then
    let _ = feed.shutdown();
    Ok(())
}

fn handle_action(
    action: Action,
    tui_app: &mut TuiApp,
    feed: &FeedHandle,
    ctx: &AppContext,
) -> Result<()> {
    match action {
        Action::Quit => {
            tui_app.should_quit = true;
        }
        Action::MoveUp => {
            if let Some(index) = tui_app.move_up() {
                report_selection(feed, tui_app, index)?;
            }
        }
        Action::MoveDown => {
            if let Some(index) = tui_app.move_down() {
                report_selection(feed, tui_app, index)?;
            }
        }
        Action::NextPane => {
            tui_app.active_pane = tui_app.active_pane.next();
        }
        Action::PrevPane => {
            tui_app.active_pane = tui_app.active_pane.prev();
        }
        Action::OpenStream => {
            let selected = tui_app.selected_item().map(|item| item.id);
            if let Some(id) = selected {
                let url = ctx.gateway.stream_url(id);
                match open::that(url.as_str()) {
                    Ok(()) => tui_app.set_status(format!("Opened {}", url)),
                    Err(e) => tui_app.set_status(format!("Failed to open stream: {}", e)),
                }
            }
        }
        Action::Refresh => {
            tui_app.clear_selection();
            tui_app.clear_status();
            feed.refresh()?;
        }
        Action::DismissError => {
            feed.dismiss_error()?;
        }
        Action::ToggleMaximize => {
            tui_app.toggle_maximize();
        }
        Action::None => {}
    }

    Ok(())
}

/// The index comes from the snapshot on screen, which may trail the
/// controller; the video id lets it find the item again.
fn report_selection(feed: &FeedHandle, tui_app: &TuiApp, index: usize) -> Result<()> {
    if let Some(video_id) = tui_app.selected_id {
        feed.report_visible(index, video_id)?;
    }
    Ok(())
}
