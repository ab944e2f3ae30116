//! # TUI Components
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `Editor`: bounded prompt editor; emits `EditorEvent::Submit`
//! - `Viewport`: scrollable window over pre-wrapped lines
//!
//! ### Stateless Rendering
//!
//! - `transcript`: turns the transcript (or the welcome text) into styled,
//!   wrapped lines for the viewport
//!
//! Components receive external data as parameters rather than reaching into
//! global state, so each can be tested on its own.

pub mod editor;
pub mod transcript;
pub mod viewport;

pub use editor::{Editor, EditorEvent};
pub use viewport::Viewport;
