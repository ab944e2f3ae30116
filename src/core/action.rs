//! # Actions
//!
//! Everything that can happen to the chat becomes an `Action`.
//! User presses Enter? That's `Action::Submit(text)`.
//! The model answers? That's `Action::ReplyReceived(reply)`.
//!
//! `update()` applies an action to the state and returns the `Effect` the
//! caller must carry out. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  State' + Effect
//! ```
//!
//! Replies are applied in dispatch order: a reply that overtakes an earlier
//! request is parked until every earlier ticket has been answered.

use log::{debug, warn};

use crate::core::state::{App, Outcome};
use crate::core::transcript::Speaker;
use crate::inference::{ReplyEvent, RequestId};

#[derive(Debug)]
pub enum Action {
    /// The user committed the editor contents.
    Submit(String),
    /// The invoker accepted a prompt and issued this ticket.
    Dispatched(RequestId),
    ReplyReceived(ReplyEvent),
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// A user entry was appended; send this prompt.
    Dispatch(String),
    /// One or more assistant entries were appended.
    TranscriptChanged,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Submit(text) => {
            if text.trim().is_empty() {
                debug!("Ignoring blank submission");
                return Effect::None;
            }
            app.transcript.push(Speaker::User, text.clone());
            Effect::Dispatch(text)
        }
        Action::Dispatched(ticket) => {
            app.pending.push_back(ticket);
            Effect::None
        }
        Action::ReplyReceived(reply) => {
            if !app.pending.contains(&reply.ticket) {
                warn!("Dropping reply for unknown request {}", reply.ticket);
                return Effect::None;
            }
            app.parked.insert(reply.ticket, reply.outcome);
            if apply_ready_replies(app) > 0 {
                Effect::TranscriptChanged
            } else {
                debug!(
                    "Parked reply {} behind {} earlier request(s)",
                    reply.ticket,
                    app.pending.len() - 1
                );
                Effect::None
            }
        }
        Action::Quit => Effect::Quit,
    }
}

/// Moves parked replies into the transcript while the oldest pending ticket
/// has an answer. Returns how many entries were appended.
fn apply_ready_replies(app: &mut App) -> usize {
    let mut applied = 0;
    while let Some(ticket) = app.pending.front().copied() {
        let Some(outcome) = app.parked.remove(&ticket) else {
            break;
        };
        app.pending.pop_front();
        append_outcome(app, outcome);
        applied += 1;
    }
    applied
}

fn append_outcome(app: &mut App, outcome: Outcome) {
    match outcome {
        Ok(text) => {
            app.transcript.push(Speaker::Assistant, text);
        }
        Err(err) => {
            app.transcript
                .push(Speaker::Assistant, format!("[error: {}]", err.summary()));
            app.last_error = Some(err);
        }
    }
}
