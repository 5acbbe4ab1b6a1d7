#[cfg(test)]
#[path = "events_test.rs"]
mod tests;

use anyhow::Result;
use crossterm::event::Event as CrosstermEvent;
use crossterm::event::EventStream;
use crossterm::event::MouseEventKind;
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::time;
use tui_textarea::Input;
use tui_textarea::Key;

use crate::domain::models::Depth;
use crate::domain::models::Event;

fn handle_crossterm(event: CrosstermEvent) -> Option<Event> {
    match event {
        CrosstermEvent::Paste(text) => {
            return Some(Event::KeyboardPaste(text));
        }
        CrosstermEvent::Mouse(mouseevent) => match mouseevent.kind {
            MouseEventKind::ScrollUp => {
                return Some(Event::UIScrollUp());
            }
            MouseEventKind::ScrollDown => {
                return Some(Event::UIScrollDown());
            }
            _ => {
                return None;
            }
        },
        CrosstermEvent::Key(keyevent) => match keyevent.into() {
            Input { key: Key::Down, .. } => {
                return Some(Event::UIScrollDown());
            }
            Input { key: Key::Up, .. } => {
                return Some(Event::UIScrollUp());
            }
            Input { key: Key::F(1), .. } => {
                return Some(Event::KeyboardDepth(Depth::MeaningOnly));
            }
            Input { key: Key::F(2), .. } => {
                return Some(Event::KeyboardDepth(Depth::Core));
            }
            Input { key: Key::F(3), .. } => {
                return Some(Event::KeyboardDepth(Depth::Full));
            }
            Input {
                key: Key::Char('c'),
                ctrl: true,
                ..
            } => {
                return Some(Event::KeyboardCTRLC());
            }
            Input {
                key: Key::Char('n'),
                ctrl: true,
                ..
            } => {
                return Some(Event::KeyboardCTRLN());
            }
            Input {
                key: Key::Char('r'),
                ctrl: true,
                ..
            } => {
                return Some(Event::KeyboardCTRLR());
            }
            Input {
                key: Key::Char('s'),
                ctrl: true,
                ..
            } => {
                return Some(Event::KeyboardCTRLS());
            }
            Input {
                key: Key::Enter, ..
            } => {
                return Some(Event::KeyboardEnter());
            }
            input => {
                return Some(Event::KeyboardCharInput(input));
            }
        },
        _ => return None,
    }
}

pub struct EventsService {
    crossterm_events: EventStream,
    events: mpsc::UnboundedReceiver<Event>,
}

impl EventsService {
    pub fn new(events: mpsc::UnboundedReceiver<Event>) -> EventsService {
        return EventsService {
            crossterm_events: EventStream::new(),
            events,
        };
    }

    pub async fn next(&mut self) -> Result<Event> {
        loop {
            let evt = tokio::select! {
                event = self.events.recv() => event,
                event = self.crossterm_events.next() => match event {
                    Some(Ok(input)) => handle_crossterm(input),
                    Some(Err(_)) => None,
                    None => None
                },
                _ = time::sleep(time::Duration::from_millis(500)) => Some(Event::UITick())
            };

            if let Some(event) = evt {
                return Ok(event);
            }
        }
    }
}
