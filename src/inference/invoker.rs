//! Runs generator calls off the UI task.
//!
//! ```text
//!  UI task                         tokio task (one per prompt)
//!  ───────                         ───────────────────────────
//!  dispatch(prompt) ──spawn──────▶ generator.generate(prompt)
//!        │ returns ticket                    │
//!        ▼                                   ▼
//!  recv() ◀──── same channel as input ── ReplyEvent { ticket, outcome }
//! ```
//!
//! No retry, timeout or cancellation. If the UI has gone away the reply is
//! dropped; the remote call itself may still complete.

use std::sync::Arc;

use log::{debug, info, warn};
use tokio::sync::mpsc::UnboundedSender;

use crate::inference::{ReplyEvent, RequestId, TextGenerator};

/// Dispatches prompts to a [`TextGenerator`] and posts each outcome into the
/// UI's event channel as a single message.
///
/// Generic over the channel's message type so replies travel on the same
/// queue as terminal input.
pub struct AsyncInvoker<E> {
    generator: Arc<dyn TextGenerator>,
    events: UnboundedSender<E>,
    next_ticket: u64,
}

impl<E> AsyncInvoker<E>
where
    E: From<ReplyEvent> + Send + 'static,
{
    pub fn new(generator: Arc<dyn TextGenerator>, events: UnboundedSender<E>) -> Self {
        Self {
            generator,
            events,
            next_ticket: 1,
        }
    }

    /// Spawns the generator call and returns its ticket immediately.
    ///
    /// Must be called from within a tokio runtime.
    pub fn dispatch(&mut self, prompt: String) -> RequestId {
        let ticket = RequestId(self.next_ticket);
        self.next_ticket += 1;

        info!(
            "Dispatching request {} to {} ({} bytes)",
            ticket,
            self.generator.name(),
            prompt.len()
        );

        let generator = self.generator.clone();
        let events = self.events.clone();
        tokio::spawn(async move {
            let outcome = generator.generate(&prompt).await;
            match &outcome {
                Ok(text) => debug!("Request {} completed ({} bytes)", ticket, text.len()),
                Err(e) => warn!("Request {} failed: {}", ticket, e),
            }
            if events.send(ReplyEvent { ticket, outcome }.into()).is_err() {
                warn!("Failed to deliver reply for request {}: receiver dropped", ticket);
            }
        });

        ticket
    }
}
