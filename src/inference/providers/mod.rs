pub mod titan;

pub use titan::{BedrockSettings, TitanProvider};
