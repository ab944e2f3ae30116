//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::inference::{AsyncInvoker, GenerateError, TextGenerator};
use crate::tui::chat_view::ChatView;
use crate::tui::event::LoopEvent;

/// Replies with the prompt unchanged.
pub struct EchoGenerator;

#[async_trait]
impl TextGenerator for EchoGenerator {
    fn name(&self) -> &str {
        "echo"
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        Ok(prompt.to_string())
    }
}

/// Always fails with the wrapped error.
pub struct FailingGenerator(pub GenerateError);

#[async_trait]
impl TextGenerator for FailingGenerator {
    fn name(&self) -> &str {
        "failing"
    }

    async fn generate(&self, _prompt: &str) -> Result<String, GenerateError> {
        Err(self.0.clone())
    }
}

/// Creates a ChatView backed by `generator`, plus the receiving end of its event channel.
pub fn test_view(
    generator: Arc<dyn TextGenerator>,
) -> (ChatView, mpsc::UnboundedReceiver<LoopEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let invoker = AsyncInvoker::new(generator, tx);
    (ChatView::new(invoker), rx)
}
