//! Loops that consume lines from a [`LineFeed`].
//!
//! [`TimeoutDispatcher`] races each line against a timer and reports which
//! came first. [`BlockingDispatcher`] simply waits for the next line.
//!
//! The reader behind the feed keeps reading no matter who wins a round, so a
//! line typed after a timeout sits in the mailbox and wins the next round.

use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::config::TimeoutConfig;
use crate::countdown::countdown;
use crate::error::Result;
use crate::line_reader::LineFeed;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundOutcome {
    Input(String),
    TimedOut,
}

// =============================================================================
// Timed input
// =============================================================================

pub struct TimeoutDispatcher {
    feed: LineFeed,
    config: TimeoutConfig,
    rounds: u64,
}

impl TimeoutDispatcher {
    pub fn new(feed: LineFeed, config: TimeoutConfig) -> Self {
        TimeoutDispatcher {
            feed,
            config,
            rounds: 0,
        }
    }

    pub fn rounds(&self) -> u64 {
        self.rounds
    }

    /// Runs one round: starts a countdown beside the wait, then takes
    /// whichever of "a line arrived" or "the timeout elapsed" happens first.
    ///
    /// A line that is already waiting when the timer fires still wins.
    pub async fn round(&mut self, cancel: &CancellationToken) -> Result<RoundOutcome> {
        self.rounds += 1;
        info!(round = self.rounds, "start.");
        tokio::spawn(countdown(self.config.timeout_secs, cancel.child_token()));

        let outcome = tokio::select! {
            biased;
            line = self.feed.next_line() => RoundOutcome::Input(line?),
            _ = sleep(self.config.timeout()) => RoundOutcome::TimedOut,
        };

        match &outcome {
            RoundOutcome::Input(line) => {
                info!("{}", line);
                info!("this time, user input.");
            }
            RoundOutcome::TimedOut => info!("this time, timed out."),
        }
        Ok(outcome)
    }

    /// Runs rounds back to back until cancelled or the reader fails.
    pub async fn run(&mut self, cancel: CancellationToken) -> Result<()> {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => return Ok(()),
                outcome = self.round(&cancel) => {
                    outcome?;
                }
            }
        }
    }
}

// =============================================================================
// Blocking input
// =============================================================================

pub struct BlockingDispatcher {
    feed: LineFeed,
}

impl BlockingDispatcher {
    pub fn new(feed: LineFeed) -> Self {
        BlockingDispatcher { feed }
    }

    pub async fn next(&mut self) -> Result<String> {
        let line = self.feed.next_line().await?;
        info!("{}", line);
        Ok(line)
    }

    pub async fn run(&mut self, cancel: CancellationToken) -> Result<()> {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => return Ok(()),
                line = self.next() => {
                    line?;
                }
            }
        }
    }
}
