//! # Core Application Logic
//!
//! The chat's business logic. It knows nothing about any specific UI technology
//! and performs no I/O.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (transcript)   │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    └───────────┬─────────────┘
//!                                │
//!                 ┌──────────────┴──────────────┐
//!                 ▼                             ▼
//!          ┌────────────┐                ┌────────────┐
//!          │    TUI     │                │ inference  │
//!          │ (ratatui)  │                │ (Bedrock)  │
//!          └────────────┘                └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct
//! - [`action`]: The `Action` enum and `update()`
//! - [`transcript`]: Speakers and transcript entries
//! - [`config`]: Config file loading and resolution

pub mod action;
pub mod config;
pub mod state;
pub mod transcript;
