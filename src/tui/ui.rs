use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::tui::chat_view::{ChatView, GAP_HEIGHT};
use crate::tui::component::Component;

/// Viewport on top, a blank gap, then the editor.
pub fn draw_ui(frame: &mut Frame, view: &mut ChatView) {
    use Constraint::Length;
    let layout = Layout::vertical([
        Length(view.viewport.height),
        Length(GAP_HEIGHT),
        Length(view.editor.height()),
    ]);
    let [viewport_area, _gap, editor_area] = layout.areas(frame.area());

    view.viewport.render(frame, viewport_area);
    view.editor.render(frame, editor_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use crate::test_support::{EchoGenerator, test_view};

    fn screen_rows(terminal: &Terminal<TestBackend>) -> Vec<String> {
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect()
    }

    #[test]
    fn test_layout_places_editor_at_bottom() {
        let (mut view, _rx) = test_view(Arc::new(EchoGenerator));
        view.resize(40, 10);

        let mut terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();
        terminal.draw(|f| draw_ui(f, &mut view)).unwrap();
        let rows = screen_rows(&terminal);

        assert!(rows[0].starts_with("Welcome to Titan Chat!"), "{rows:?}");
        assert!(rows[5].trim().is_empty());
        assert!(rows[6].trim().is_empty());
        assert!(rows[7].starts_with("┃ Send a message..."), "{rows:?}");
        assert!(rows[9].starts_with("┃"));
    }
}
