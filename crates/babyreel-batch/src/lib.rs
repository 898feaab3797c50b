//! Babyreel Batch
//!
//! Runs independent [`WorkItem`](babyreel_config::WorkItem)s through an
//! [`ItemHandler`] with at most `max_workers` in flight.
//!
//! ```text
//!   items ──▶ BatchRunner ──spawn (≤ max_workers)──▶ ItemHandler
//!                 ▲                                      │
//!                 └────────── BatchResult per item ◀─────┘
//! ```
//!
//! Every executed item yields exactly one [`BatchResult`]; handler errors,
//! panics and timeouts become error results instead of escaping. With
//! `continue_on_error` off, the first error stops submission and in-flight
//! items still finish.

mod config;
mod error;
mod handler;
mod report;
mod result;
mod runner;

pub use config::load_batch_config;
pub use error::{BatchError, HandlerError};
pub use handler::{GenerationItemHandler, ItemHandler, ItemOutput};
pub use report::{BatchReport, BatchSummary, ErrorSummary};
pub use result::{BatchResult, BatchStatus};
pub use runner::BatchRunner;
