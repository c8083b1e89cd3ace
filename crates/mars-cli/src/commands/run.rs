use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, MouseButton, MouseEvent, MouseEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::Block,
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, info};

use mars_core::{AppConfig, ContentStore, PageKind};
use mars_tui::{
    app::App,
    event::{AppEvent, ContentResult, EventHandler},
    input::{handle_key_event, Action},
    keymap::Keymap,
    scroll::ScrollConfigExt,
    widgets::{
        HeaderWidget, LoadingWidget, NotFoundWidget, PostListWidget, PostWidget,
        StatusBarWidget, ViewpagerWidget,
    },
};

pub async fn run(config: Arc<AppConfig>, content: Option<PathBuf>, link: String) -> Result<()> {
    // Create keymap from config
    let keymap = Keymap::from_config(&config.keymap);
    let content_path = content.unwrap_or_else(|| config.content_path());
    info!("Starting TUI at {} with content {}", link, content_path.display());

    // Load content in the background while the loading page is shown
    let (content_tx, mut content_rx) = mpsc::channel::<ContentResult>(1);
    tokio::spawn(async move {
        let result = load_content(&content_path).await;
        let _ = content_tx.send(result).await;
    });

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        SetTitle(config.site.title.as_str())
    )?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config.clone());
    app.navigate(&link, Instant::now());

    let events = EventHandler::new(config.ui.tick_rate_ms)
        .with_animation_tick(config.ui.scroll.animation_tick_duration());

    let result = run_loop(&mut terminal, &mut app, &keymap, &events, &mut content_rx).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    keymap: &Keymap,
    events: &EventHandler,
    content_rx: &mut mpsc::Receiver<ContentResult>,
) -> Result<()> {
    let mut title = String::new();

    loop {
        let now = Instant::now();

        if let Ok(result) = content_rx.try_recv() {
            handle_content_result(app, result, now);
        }

        app.tick(now);

        let document_title = app.document_title();
        if document_title != title {
            execute!(terminal.backend_mut(), SetTitle(document_title.as_str()))?;
            title = document_title;
        }

        let size = terminal.size()?;
        let [_, main, _] = split(Rect::new(0, 0, size.width, size.height));
        app.layout(main);

        terminal.draw(|frame| draw(frame, app))?;

        let event = if app.needs_fast_update() {
            events.next_animation()?
        } else {
            events.next()?
        };

        match event {
            Some(AppEvent::Key(key)) => {
                let action = handle_key_event(key, app, keymap);
                handle_action(app, action, Instant::now());
            }
            Some(AppEvent::Mouse(mouse)) => handle_mouse(app, mouse, Instant::now()),
            Some(AppEvent::Resize(w, h)) => debug!("Terminal resized to {}x{}", w, h),
            Some(AppEvent::Tick) => {
                if app.page == PageKind::Loading {
                    app.tick_spinner();
                }
            }
            None => {}
        }

        if app.should_quit {
            break;
        }

        // Let the content loader make progress on the single-threaded runtime
        tokio::task::yield_now().await;
    }

    Ok(())
}

/// Header, page, status bar
fn split(area: Rect) -> [Rect; 3] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2]]
}

fn draw(frame: &mut Frame, app: &App) {
    let [header, main, status] = split(frame.area());

    HeaderWidget::render(frame, header, app);

    match app.page {
        PageKind::Viewpager => ViewpagerWidget::render(frame, main, app),
        PageKind::Post => {
            if let Some(post) = app.data.post() {
                PostWidget::render(frame, main, app, &post.link, 0, app.scroll.current_scroll());
            }
        }
        PageKind::Loading => LoadingWidget::render(frame, main, app),
        PageKind::List => PostListWidget::render(frame, main, app),
        PageKind::NotFound => NotFoundWidget::render(frame, main, app),
        PageKind::Empty => frame.render_widget(
            Block::default().style(Style::default().bg(app.theme.background)),
            main,
        ),
    }

    StatusBarWidget::render(frame, status, app);
}

async fn load_content(path: &Path) -> ContentResult {
    match tokio::fs::read_to_string(path).await {
        Ok(json) => match ContentStore::from_json(&json) {
            Ok(store) => ContentResult::Loaded(store),
            Err(e) => ContentResult::Failed(e.to_string()),
        },
        Err(e) => ContentResult::Failed(format!("{}: {}", path.display(), e)),
    }
}

fn handle_content_result(app: &mut App, result: ContentResult, now: Instant) {
    match result {
        ContentResult::Loaded(store) => app.set_content(store, now),
        ContentResult::Failed(error) => app.content_failed(&error, now),
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent, now: Instant) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => app.pointer_down(mouse.column, mouse.row, now),
        MouseEventKind::Drag(MouseButton::Left) => app.pointer_drag(mouse.column, mouse.row, now),
        MouseEventKind::Up(MouseButton::Left) => app.pointer_up(mouse.column, mouse.row, now),
        MouseEventKind::ScrollDown => app.move_down(),
        MouseEventKind::ScrollUp => app.move_up(),
        _ => {}
    }
}

fn handle_action(app: &mut App, action: Action, now: Instant) {
    // Any key other than the first 'g' breaks a pending sequence
    if action != Action::PendingG {
        app.clear_pending_key();
    }
    if action != Action::None {
        app.clear_status();
    }

    match action {
        Action::Quit => app.should_quit = true,
        Action::NextPost => app.next_post(now),
        Action::PrevPost => app.prev_post(now),
        Action::MoveDown => app.move_down(),
        Action::MoveUp => app.move_up(),
        Action::ScrollHalfPageDown => app.scroll_half_page_down(),
        Action::ScrollHalfPageUp => app.scroll_half_page_up(),
        Action::ScrollPageDown => app.scroll_page_down(),
        Action::ScrollPageUp => app.scroll_page_up(),
        Action::JumpToTop => app.jump_to_top(now),
        Action::JumpToBottom => app.jump_to_bottom(now),
        Action::PendingG => app.pending_key = Some('g'),
        Action::Select => app.select(now),
        Action::Home => app.home(now),
        Action::HistoryBack => app.history_back(now),
        Action::HistoryForward => app.history_forward(now),
        Action::Menu(index) => app.open_menu(index, now),
        Action::None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mars_core::Router;

    const CONTENT: &str = r#"{
        "posts": [
            { "link": "/p0/", "title": "Zero" },
            { "link": "/p1/", "title": "One" }
        ]
    }"#;

    fn temp_file(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("mars-{}-{}", std::process::id(), name));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[tokio::test]
    async fn test_load_content() {
        let path = temp_file("content.json", CONTENT);
        let result = load_content(&path).await;
        std::fs::remove_file(&path).ok();
        match result {
            ContentResult::Loaded(store) => assert_eq!(store.post_count(), 2),
            ContentResult::Failed(e) => panic!("unexpected failure: {}", e),
        }
    }

    #[tokio::test]
    async fn test_load_content_failures() {
        let missing = std::env::temp_dir().join("mars-does-not-exist.json");
        assert!(matches!(load_content(&missing).await, ContentResult::Failed(_)));

        let path = temp_file("broken.json", "{ not json");
        let result = load_content(&path).await;
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, ContentResult::Failed(_)));
    }

    #[tokio::test]
    async fn test_content_arrives_over_channel() {
        let path = temp_file("channel.json", CONTENT);
        let (tx, mut rx) = mpsc::channel(1);
        let load_path = path.clone();
        tokio::spawn(async move {
            let _ = tx.send(load_content(&load_path).await).await;
        });

        let mut app = App::new(Arc::new(AppConfig::default()));
        app.navigate("/p1/", Instant::now());
        assert_eq!(app.page, PageKind::Loading);

        let result = rx.recv().await.unwrap();
        std::fs::remove_file(&path).ok();
        handle_content_result(&mut app, result, Instant::now());
        assert_eq!(app.page, PageKind::Viewpager);
    }

    #[test]
    fn test_handle_action_flow() {
        let mut app = App::new(Arc::new(AppConfig::default()));
        let now = Instant::now();
        let store = ContentStore::from_json(CONTENT).unwrap();
        app.set_content(store, now);

        handle_action(&mut app, Action::Select, now);
        assert_eq!(app.router.link(), "/p0/");

        handle_action(&mut app, Action::NextPost, now);
        assert_eq!(app.router.link(), "/p1/");

        handle_action(&mut app, Action::PendingG, now);
        assert_eq!(app.pending_key, Some('g'));
        handle_action(&mut app, Action::MoveDown, now);
        assert_eq!(app.pending_key, None);

        handle_action(&mut app, Action::HistoryBack, now);
        assert_eq!(app.router.link(), "/p0/");

        handle_action(&mut app, Action::Menu(0), now);
        assert_eq!(app.router.link(), "/");
        assert_eq!(app.page, PageKind::List);

        handle_action(&mut app, Action::Quit, now);
        assert!(app.should_quit);
    }
}
