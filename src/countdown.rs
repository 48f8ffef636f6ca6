use std::time::Duration;

use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Logs `seconds`, `seconds - 1`, ... `1`, one value per second, and returns
/// how many values it logged. Zero is never logged.
pub async fn countdown(seconds: u64, cancel: CancellationToken) -> u64 {
    let mut logged = 0;
    for remaining in (1..=seconds).rev() {
        if cancel.is_cancelled() {
            break;
        }
        info!("{}", remaining);
        logged += 1;

        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = sleep(Duration::from_secs(1)) => {}
        }
    }
    logged
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_counts_every_second_down_to_one() {
        let start = Instant::now();
        assert_eq!(countdown(5, CancellationToken::new()).await, 5);
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(5));
        assert!(elapsed < Duration::from_secs(6));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_logs_nothing() {
        let start = Instant::now();
        assert_eq!(countdown(0, CancellationToken::new()).await, 0);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_early() {
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(countdown(10, cancel.clone()));

        sleep(Duration::from_millis(2500)).await;
        cancel.cancel();

        assert_eq!(handle.await.unwrap(), 3);
    }
}
