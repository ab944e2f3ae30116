//! # Transcript
//!
//! The ordered, append-only record of what was said in this session.
//! Entries are never edited or removed; the whole transcript is dropped at exit.

/// Who a transcript line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Assistant,
}

impl Speaker {
    /// The label rendered in front of every line from this speaker.
    pub fn prefix(self) -> &'static str {
        match self {
            Speaker::User => "You: ",
            Speaker::Assistant => "Titan: ",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptEntry {
    pub speaker: Speaker,
    pub text: String,
}

impl TranscriptEntry {
    /// Prefix and text as plain, unstyled text (e.g. `"You: hi"`).
    pub fn display_text(&self) -> String {
        format!("{}{}", self.speaker.prefix(), self.text)
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, speaker: Speaker, text: String) {
        self.entries.push(TranscriptEntry { speaker, text });
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&TranscriptEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries as plain text lines, in order.
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(TranscriptEntry::display_text).collect()
    }
}
