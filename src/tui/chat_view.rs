//! # Chat View
//!
//! The session controller. Owns the chat state, the editor and the viewport,
//! and routes every `LoopEvent` to the right place.
//!
//! ```text
//! LoopEvent::Input ─┬─ Quit ─────────────▶ update(Quit) ─▶ Flow::Quit
//!                   ├─ Resize ───────────▶ relayout
//!                   ├─ Scroll* ──────────▶ Viewport
//!                   └─ everything else ──▶ Editor ─ Submit ─▶ update(Submit) ─▶ invoker.dispatch
//! LoopEvent::Reply ───────────────────────▶ update(ReplyReceived) ─▶ refresh viewport
//! ```
//!
//! Drawing is left to `ui::draw_ui`; the view itself performs no terminal I/O,
//! so it can be driven directly in tests.

use log::{debug, info};

use crate::core::action::{Action, Effect, update};
use crate::core::state::App;
use crate::inference::AsyncInvoker;
use crate::tui::component::EventHandler;
use crate::tui::components::transcript::{transcript_lines, welcome_lines};
use crate::tui::components::{Editor, EditorEvent, Viewport};
use crate::tui::event::{LoopEvent, TuiEvent};

/// Blank rows between the viewport and the editor.
pub const GAP_HEIGHT: u16 = 2;

const INITIAL_WIDTH: u16 = 30;
const INITIAL_HEIGHT: u16 = 5;

/// Whether the event loop should keep running after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct ChatView {
    pub app: App,
    pub editor: Editor,
    pub viewport: Viewport,
    invoker: AsyncInvoker<LoopEvent>,
}

impl ChatView {
    pub fn new(invoker: AsyncInvoker<LoopEvent>) -> Self {
        let mut view = Self {
            app: App::new(),
            editor: Editor::new(),
            viewport: Viewport::new(INITIAL_WIDTH, INITIAL_HEIGHT),
            invoker,
        };
        view.editor.set_width(INITIAL_WIDTH);
        view.refresh_viewport();
        view
    }

    /// Applies one event. Must be called from within a tokio runtime, since
    /// a submission spawns the generator call.
    pub fn handle(&mut self, event: LoopEvent) -> Flow {
        match event {
            LoopEvent::Input(TuiEvent::Quit) => {
                if update(&mut self.app, Action::Quit) == Effect::Quit {
                    info!("Quit requested");
                    return Flow::Quit;
                }
            }
            LoopEvent::Input(TuiEvent::Resize(width, height)) => self.resize(width, height),
            LoopEvent::Input(
                event @ (TuiEvent::ScrollUp
                | TuiEvent::ScrollDown
                | TuiEvent::ScrollPageUp
                | TuiEvent::ScrollPageDown),
            ) => {
                self.viewport.handle_event(&event);
            }
            LoopEvent::Input(event) => {
                if let Some(EditorEvent::Submit(text)) = self.editor.handle_event(&event) {
                    self.submit(text);
                }
            }
            LoopEvent::Reply(reply) => {
                if update(&mut self.app, Action::ReplyReceived(reply)) == Effect::TranscriptChanged
                {
                    self.refresh_viewport();
                }
            }
        }
        Flow::Continue
    }

    fn submit(&mut self, text: String) {
        if let Effect::Dispatch(prompt) = update(&mut self.app, Action::Submit(text)) {
            self.refresh_viewport();
            let ticket = self.invoker.dispatch(prompt);
            update(&mut self.app, Action::Dispatched(ticket));
        }
    }

    /// Splits the terminal between viewport, gap and editor, then rewraps the
    /// transcript to the new width.
    ///
    /// A terminal shorter than editor plus gap leaves a zero-height viewport.
    pub fn resize(&mut self, width: u16, height: u16) {
        debug!("Resize to {}x{}", width, height);
        self.viewport.width = width;
        self.viewport.height = height.saturating_sub(self.editor.height() + GAP_HEIGHT);
        self.editor.set_width(width);
        self.refresh_viewport();
    }

    /// Rebuilds viewport content from the transcript and scrolls to the bottom.
    pub fn refresh_viewport(&mut self) {
        let lines = if self.app.transcript.is_empty() {
            welcome_lines(self.viewport.width)
        } else {
            transcript_lines(&self.app.transcript, self.viewport.width)
        };
        self.viewport.set_content(lines);
        self.viewport.goto_bottom();
    }

    /// Editor text to print after the terminal is restored.
    pub fn exit_text(&self) -> &str {
        self.editor.value()
    }
}
