//! `standup-core` — the daily stand-up relay.
//!
//! A submission is validated, then delivered to two independent sinks:
//!
//! ```text
//! SubmissionInput ──validate──▶ SubmissionRecord
//!                                     │
//!                     ┌───────────────┴───────────────┐
//!                     ▼                               ▼
//!             GoogleChatSink                   AppsScriptSheet
//!        (card, one thread per day)        (append row / last entry)
//!                     │                               │
//!                     └──────────▶ SubmissionResult ◀─┘
//!                          (FullSuccess / Partial* / FullFailure)
//! ```
//!
//! Neither sink can abort the other; each failure is folded into a
//! [`types::SinkOutcome`].

pub mod chat;
pub mod clock;
pub mod config;
pub mod error;
pub mod http;
pub mod orchestrator;
pub mod sheet;
pub mod sink;
pub mod types;

pub use error::{Result, StandupError};
