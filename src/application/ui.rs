use std::io;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::DisableBracketedPaste;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableBracketedPaste;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::Backend;
use ratatui::Terminal;
use tokio::sync::mpsc;
use tui_textarea::Input;
use tui_textarea::Key;

use crate::configuration::Config;
use crate::domain::models::Action;
use crate::domain::models::Effect;
use crate::domain::models::Event;
use crate::domain::models::Intent;
use crate::domain::models::TextArea;
use crate::domain::services::events::EventsService;
use crate::domain::services::render;
use crate::domain::services::AppState;
use crate::domain::services::ViewModel;

async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: &mut AppState,
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let mut textarea = TextArea::default();
    let mut events = EventsService::new(rx);

    #[cfg(feature = "dev")]
    {
        for char in "hablar".chars() {
            textarea.input(Input {
                key: Key::Char(char),
                ctrl: false,
                alt: false,
            });
        }
    }

    loop {
        let view = ViewModel::build(app_state);
        terminal.draw(|frame| {
            render(frame, &view, &textarea, &mut app_state.scroll);
        })?;

        let intent = match events.next().await? {
            Event::BackendResponse(res) => Some(Intent::Backend(res)),
            Event::BackendUnavailable(message) => {
                app_state.notice = Some(message);
                None
            }
            Event::KeyboardCharInput(input) => {
                textarea.input(input);
                None
            }
            Event::KeyboardPaste(text) => {
                for char in text.chars().filter(|char| return !char.is_control()) {
                    textarea.input(Input {
                        key: Key::Char(char),
                        ctrl: false,
                        alt: false,
                    });
                }
                None
            }
            Event::KeyboardCTRLC() => {
                break;
            }
            Event::KeyboardCTRLN() => Some(Intent::GenerateAnother),
            Event::KeyboardCTRLR() => Some(Intent::Retry),
            Event::KeyboardCTRLS() => Some(Intent::Save),
            Event::KeyboardDepth(depth) => Some(Intent::ChooseDepth(depth)),
            Event::KeyboardEnter() => Some(Intent::Submit(textarea.lines().join(" "))),
            Event::UIScrollDown() => {
                app_state.scroll.down();
                None
            }
            Event::UIScrollUp() => {
                app_state.scroll.up();
                None
            }
            Event::UITick() => None,
        };

        if let Some(intent) = intent {
            for effect in app_state.update(intent) {
                match effect {
                    Effect::Dispatch(action) => {
                        tx.send(action)?;
                    }
                    Effect::ResetInput => {
                        textarea = TextArea::default();
                    }
                }
            }
        }
    }

    return Ok(());
}

pub fn destruct_terminal_for_panic() {
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    );
    let _ = crossterm::execute!(io::stdout(), cursor::Show);
}

pub async fn start(
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    enable_raw_mode()?;
    crossterm::execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;
    let mut app_state = AppState::new(Config::flow());

    start_loop(&mut terminal, &mut app_state, tx, rx).await?;

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    return Ok(());
}
