//! # Core Application Logic
//!
//! This module contains Parley's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (transcript)   │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • Notice (errors)      │
//!                    └───────────┬─────────────┘
//!                                │
//!                   ┌────────────┴────────────┐
//!                   ▼                         ▼
//!            ┌────────────┐            ┌────────────┐
//!            │    TUI     │            │  One-shot  │
//!            │  Adapter   │            │    CLI     │
//!            │ (ratatui)  │            │ (--prompt) │
//!            └────────────┘            └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all session state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`conversation`]: The awaited completion round trip
//! - [`notice`]: Error classification and user-facing notices
//! - [`config`]: Layered configuration

pub mod action;
pub mod config;
pub mod conversation;
pub mod notice;
pub mod state;
