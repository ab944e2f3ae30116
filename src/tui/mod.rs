//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and feeds terminal input and model replies into the `ChatView`.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Loop
//!
//! Terminal input (read by a background task) and model replies (posted by
//! the invoker) arrive on one unbounded channel. The loop blocks on the
//! channel, applies everything already queued, then redraws once. Nothing
//! animates, so there is no redraw timer.

pub mod chat_view;
pub mod component;
pub mod components;
pub mod event;
pub mod ui;

use std::io::stdout;
use std::sync::Arc;

use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use log::{info, warn};
use tokio::sync::mpsc;

use crate::inference::{AsyncInvoker, TextGenerator};
use crate::tui::chat_view::{ChatView, Flow};
use crate::tui::event::{LoopEvent, TuiEvent, spawn_input_reader};

/// Enables mouse capture and bracketed paste for the lifetime of the guard.
struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            DisableMouseCapture,
            DisableBracketedPaste,
            SetCursorStyle::DefaultUserShape
        );
    }
}

/// Runs the chat until the user quits. Returns the editor's contents at
/// exit so the caller can print them once the terminal is restored.
pub async fn run(generator: Arc<dyn TextGenerator>) -> std::io::Result<String> {
    let (tx, mut rx) = mpsc::unbounded_channel::<LoopEvent>();
    let mut view = ChatView::new(AsyncInvoker::new(generator, tx.clone()));

    let mut terminal = ratatui::init();
    let guard = TerminalModeGuard::new();
    if let Err(e) = &guard {
        warn!("Failed to enable terminal modes: {}", e);
    }

    let result = async {
        let size = terminal.size()?;
        view.handle(LoopEvent::Input(TuiEvent::Resize(size.width, size.height)));
        let reader = spawn_input_reader(tx);

        terminal.draw(|f| ui::draw_ui(f, &mut view))?;
        let mut flow = Flow::Continue;
        while flow == Flow::Continue {
            let Some(event) = rx.recv().await else {
                warn!("Event channel closed");
                break;
            };
            flow = view.handle(event);
            // Apply everything already queued before the next draw
            while flow == Flow::Continue {
                match rx.try_recv() {
                    Ok(event) => flow = view.handle(event),
                    Err(_) => break,
                }
            }
            if flow == Flow::Continue {
                terminal.draw(|f| ui::draw_ui(f, &mut view))?;
            }
        }
        reader.abort();
        Ok::<(), std::io::Error>(())
    }
    .await;

    drop(guard);
    ratatui::restore();
    info!("Terminal restored");

    result.map(|()| view.exit_text().to_string())
}
