//! # Application State
//!
//! Core chat state. Domain data only; editor and viewport state live in the
//! `tui` module.
//!
//! ```text
//! App
//! ├── transcript: Transcript                 // what was said, append-only
//! ├── pending: VecDeque<RequestId>           // dispatched, unanswered, in dispatch order
//! ├── parked: HashMap<RequestId, Outcome>    // replies that arrived ahead of an earlier ticket
//! └── last_error: Option<GenerateError>      // most recent failed reply
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::collections::{HashMap, VecDeque};

use crate::core::transcript::Transcript;
use crate::inference::{GenerateError, RequestId};

pub type Outcome = Result<String, GenerateError>;

#[derive(Debug, Default)]
pub struct App {
    pub transcript: Transcript,
    pub pending: VecDeque<RequestId>,
    pub parked: HashMap<RequestId, Outcome>,
    pub last_error: Option<GenerateError>,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while at least one dispatched request has not been applied.
    pub fn is_waiting(&self) -> bool {
        !self.pending.is_empty()
    }
}
