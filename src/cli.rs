use colored::Colorize;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::config::Command;
use crate::dispatcher::{BlockingDispatcher, TimeoutDispatcher};
use crate::echo::echo_lines;
use crate::error::Result;
use crate::line_reader::{LineFeed, LineReader};
use crate::producer_consumer::run_queue_demo;

pub fn banner(command: &Command) -> String {
    format!("=== {} ===", command.title()).bold().cyan().to_string()
}

/// Runs `command` against stdin/stdout until it fails or `cancel` fires.
pub async fn run(command: Command, cancel: CancellationToken) -> Result<()> {
    match command {
        Command::Simple => {
            let mut reader = LineReader::stdin();
            echo_lines(&mut reader, &mut tokio::io::stdout(), &cancel).await
        }
        Command::Inc => {
            let feed = LineFeed::spawn(LineReader::stdin(), cancel.clone());
            BlockingDispatcher::new(feed).run(cancel).await
        }
        Command::IncSec(config) => {
            let feed = LineFeed::spawn(LineReader::stdin(), cancel.clone());
            TimeoutDispatcher::new(feed, config).run(cancel).await
        }
        Command::Queue(config) => {
            let report = run_queue_demo(config, cancel).await?;
            info!(
                produced = report.producer.produced,
                consumed = report.consumer.consumed,
                full_warnings = report.producer.full_warnings,
                empty_advisories = report.consumer.empty_advisories,
                "queue demo stopped"
            );
            Ok(())
        }
    }
}

/// Logs a failed run and maps it to the process exit status.
pub fn exit_status(result: &Result<()>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            error!("{}", err);
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::QueueDemoConfig;
    use crate::error::DemoError;
    use std::time::Duration;

    #[test]
    fn test_banner_contains_title() {
        colored::control::set_override(false);
        assert_eq!(banner(&Command::Inc), "=== Blocking line dispatcher ===");
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_status(&Ok(())), 0);
        assert_eq!(exit_status(&Err(DemoError::EndOfInput)), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_queue_command_runs_until_cancelled() {
        let cancel = CancellationToken::new();
        let stopper = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(30)).await;
            stopper.cancel();
        });

        let result = run(Command::Queue(QueueDemoConfig::input_faster()), cancel).await;
        assert!(result.is_ok());
    }
}
