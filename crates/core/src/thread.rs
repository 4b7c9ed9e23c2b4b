//! Async delay helper on the tokio timer.

use std::time::Duration;

/// Suspend the current task for `milliseconds`. Not cancellable beyond
/// dropping the future.
pub async fn sleep(milliseconds: u64) {
    tokio::time::sleep(Duration::from_millis(milliseconds)).await;
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;

    #[tokio::test]
    async fn waits_at_least_the_requested_time() {
        for ms in [0, 10, 50, 100] {
            let start = Instant::now();
            sleep(ms).await;
            assert!(start.elapsed() >= Duration::from_millis(ms), "ms={ms}");
        }
    }
}
