pub mod invoker;
pub mod provider;
pub mod providers;
pub mod types;

pub use invoker::AsyncInvoker;
pub use provider::{GenerateError, TextGenerator};
pub use providers::{BedrockSettings, TitanProvider};
pub use types::{GenerationConfig, ReplyEvent, RequestId};
