//! Small demos of concurrent line input and bounded-queue backpressure.
//!
//! - `simple`: read stdin line by line and echo it back
//! - `inc`: a background reader hands lines to a loop through a one-item mailbox
//! - `incsec`: the same, but every wait for a line races a timeout
//! - `chanin` / `chanout`: a producer and a consumer share a bounded queue,
//!   tuned so that either the queue fills up or it keeps running dry
//!
//! Every long-running piece takes a [`CancellationToken`] and stops when it
//! fires, so each demo can also be driven from tests.
//!
//! [`CancellationToken`]: tokio_util::sync::CancellationToken

pub mod bounded_queue;
pub mod cli;
pub mod config;
pub mod countdown;
pub mod dispatcher;
pub mod echo;
pub mod error;
pub mod line_reader;
pub mod logging;
pub mod mailbox;
pub mod producer_consumer;

pub use config::{Command, QueueDemoConfig, TimeoutConfig};
pub use error::{DemoError, Result};
