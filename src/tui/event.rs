use crossterm::event::{
    Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent,
    MouseEventKind,
};
use futures::StreamExt;
use log::{debug, warn};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use crate::inference::ReplyEvent;

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq)]
pub enum TuiEvent {
    // Session-level
    Quit,
    Submit,
    Resize(u16, u16),

    // Editor
    InputChar(char),
    Paste(String), // Bracketed paste
    Backspace,
    Delete,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    DeleteToStart,  // Ctrl+U
    DeleteToEnd,    // Ctrl+K
    DeleteWordBack, // Ctrl+W

    // Viewport
    ScrollUp,
    ScrollDown,
    ScrollPageUp,
    ScrollPageDown,
}

/// Everything the UI loop can receive. Terminal input and model replies share
/// one channel so they are observed in arrival order.
#[derive(Debug)]
pub enum LoopEvent {
    Input(TuiEvent),
    Reply(ReplyEvent),
}

impl From<ReplyEvent> for LoopEvent {
    fn from(reply: ReplyEvent) -> Self {
        LoopEvent::Reply(reply)
    }
}

impl From<TuiEvent> for LoopEvent {
    fn from(event: TuiEvent) -> Self {
        LoopEvent::Input(event)
    }
}

/// Translate a raw crossterm event into a `TuiEvent`. Unmapped input yields None.
pub fn translate(event: Event) -> Option<TuiEvent> {
    match event {
        Event::Key(key_event) => translate_key(key_event),
        Event::Mouse(mouse_event) => match mouse_event.kind {
            MouseEventKind::ScrollUp => Some(TuiEvent::ScrollUp),
            MouseEventKind::ScrollDown => Some(TuiEvent::ScrollDown),
            _ => None,
        },
        Event::Paste(data) => Some(TuiEvent::Paste(data)),
        Event::Resize(width, height) => Some(TuiEvent::Resize(width, height)),
        _ => None,
    }
}

fn translate_key(key_event: KeyEvent) -> Option<TuiEvent> {
    if key_event.kind != KeyEventKind::Press {
        return None;
    }
    debug!(
        "Key event: {:?} with modifiers {:?}",
        key_event.code, key_event.modifiers
    );
    let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key_event.modifiers.contains(KeyModifiers::ALT);

    match key_event.code {
        KeyCode::Char('c') if ctrl => Some(TuiEvent::Quit),
        KeyCode::Char('u') if ctrl => Some(TuiEvent::DeleteToStart),
        KeyCode::Char('k') if ctrl => Some(TuiEvent::DeleteToEnd),
        KeyCode::Char('w') if ctrl => Some(TuiEvent::DeleteWordBack),
        KeyCode::Char('a') if ctrl => Some(TuiEvent::CursorHome),
        KeyCode::Char('e') if ctrl => Some(TuiEvent::CursorEnd),
        // Other control chords (including Ctrl+J newline) are swallowed
        KeyCode::Char(_) if ctrl || alt => None,
        KeyCode::Char(c) => Some(TuiEvent::InputChar(c)),
        KeyCode::Esc => Some(TuiEvent::Quit),
        KeyCode::Enter => Some(TuiEvent::Submit),
        KeyCode::Backspace => Some(TuiEvent::Backspace),
        KeyCode::Delete => Some(TuiEvent::Delete),
        KeyCode::Left => Some(TuiEvent::CursorLeft),
        KeyCode::Right => Some(TuiEvent::CursorRight),
        KeyCode::Home => Some(TuiEvent::CursorHome),
        KeyCode::End => Some(TuiEvent::CursorEnd),
        KeyCode::Up => Some(TuiEvent::ScrollUp),
        KeyCode::Down => Some(TuiEvent::ScrollDown),
        KeyCode::PageUp => Some(TuiEvent::ScrollPageUp),
        KeyCode::PageDown => Some(TuiEvent::ScrollPageDown),
        _ => None,
    }
}

/// Forwards terminal input into the UI loop's channel until either side closes.
pub fn spawn_input_reader(events: UnboundedSender<LoopEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut stream = EventStream::new();
        while let Some(item) = stream.next().await {
            match item {
                Ok(raw) => {
                    if let Some(event) = translate(raw)
                        && events.send(LoopEvent::Input(event)).is_err()
                    {
                        break;
                    }
                }
                Err(e) => {
                    warn!("Terminal event stream failed: {}", e);
                    break;
                }
            }
        }
        debug!("Input reader stopped");
    })
}
