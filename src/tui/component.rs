use ratatui::Frame;
use ratatui::layout::Rect;

use super::event::TuiEvent;

/// A reusable UI component.
///
/// Components hold their own presentation state and render into a given
/// `Rect`. `render` takes `&mut self` so a component can sync cached
/// dimensions or scroll offsets during the render pass, in the spirit of
/// ratatui's `StatefulWidget`.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that handles terminal events.
pub trait EventHandler {
    /// The type of high-level event this component emits.
    type Event;

    /// Handle a low-level `TuiEvent` and optionally return a high-level event.
    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event>;
}
