//! Renders the transcript (or the welcome text) into word-wrapped, styled lines
//! for the viewport.
//!
//! Only the speaker prefix is styled; message text keeps the terminal's
//! default style.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::core::transcript::{Speaker, Transcript, TranscriptEntry};

pub const WELCOME: &str = "Welcome to Titan Chat!\nEnter a prompt and press Enter to send.";

const USER_COLOR: Color = Color::Rgb(0xf0, 0xaa, 0x8d);
const TITAN_COLOR: Color = Color::Rgb(0x00, 0x97, 0xb2);

pub fn speaker_style(speaker: Speaker) -> Style {
    let color = match speaker {
        Speaker::User => USER_COLOR,
        Speaker::Assistant => TITAN_COLOR,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

/// Build textwrap options for the viewport width. Words longer than the
/// width are broken.
fn wrap_options(width: u16) -> textwrap::Options<'static> {
    textwrap::Options::new((width as usize).max(1))
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
}

pub fn welcome_lines(width: u16) -> Vec<Line<'static>> {
    textwrap::wrap(WELCOME, wrap_options(width))
        .into_iter()
        .map(|line| Line::from(line.into_owned()))
        .collect()
}

/// All entries in order, each wrapped to `width`.
pub fn transcript_lines(transcript: &Transcript, width: u16) -> Vec<Line<'static>> {
    transcript
        .entries()
        .iter()
        .flat_map(|entry| entry_lines(entry, width))
        .collect()
}

fn entry_lines(entry: &TranscriptEntry, width: u16) -> Vec<Line<'static>> {
    let style = speaker_style(entry.speaker);
    let full = entry.display_text();
    // Trailing space of the prefix is not styled; it may be dropped at a wrap point
    let mut styled_remaining = entry.speaker.prefix().trim_end().chars().count();

    textwrap::wrap(&full, wrap_options(width))
        .into_iter()
        .map(|wrapped| {
            if styled_remaining == 0 {
                return Line::from(wrapped.into_owned());
            }
            let split = wrapped
                .char_indices()
                .nth(styled_remaining)
                .map(|(i, _)| i)
                .unwrap_or(wrapped.len());
            styled_remaining -= wrapped[..split].chars().count();

            let mut spans = vec![Span::styled(wrapped[..split].to_string(), style)];
            if split < wrapped.len() {
                spans.push(Span::raw(wrapped[split..].to_string()));
            }
            Line::from(spans)
        })
        .collect()
}
