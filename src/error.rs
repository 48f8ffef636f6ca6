use std::io;

use thiserror::Error;
use tokio::task::JoinError;

#[derive(Debug, Error)]
pub enum DemoError {
    #[error("failed to read input: {0}")]
    Input(#[from] io::Error),

    #[error("end of input")]
    EndOfInput,

    #[error("the other side of the mailbox has gone away")]
    Closed,

    #[error("background task failed: {0}")]
    Task(#[from] JoinError),
}

pub type Result<T> = std::result::Result<T, DemoError>;
