use std::cell::Cell;
use std::time::{Duration, Instant};

use rsel_core::ExecMonitor;
use rsel_core::filter::fraction;
use tokio_util::sync::CancellationToken;

/// Bridges the filter loop to a [`CancellationToken`] and logs progress at
/// most once per `interval`.
pub struct TokenMonitor {
    cancel: CancellationToken,
    interval: Duration,
    last_report: Cell<Instant>,
}

impl TokenMonitor {
    pub fn new(cancel: CancellationToken, interval: Duration) -> Self {
        Self {
            cancel,
            interval,
            last_report: Cell::new(Instant::now()),
        }
    }
}

impl ExecMonitor for TokenMonitor {
    fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    fn progress(&self, done: u64, total: Option<u64>) {
        let now = Instant::now();
        if now.duration_since(self.last_report.get()) < self.interval {
            return;
        }
        self.last_report.set(now);
        match fraction(done, total) {
            Some(f) => rs_info!(pipe, rows = done, progress = %format!("{:.1}%", f * 100.0), "filtering"),
            None => rs_info!(pipe, rows = done, "filtering"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follows_token() {
        let token = CancellationToken::new();
        let monitor = TokenMonitor::new(token.child_token(), Duration::from_secs(1));
        assert!(!monitor.is_cancelled());
        token.cancel();
        assert!(monitor.is_cancelled());
    }

    #[test]
    fn progress_is_throttled() {
        let monitor = TokenMonitor::new(CancellationToken::new(), Duration::from_secs(3600));
        let before = monitor.last_report.get();
        monitor.progress(1, Some(10));
        assert_eq!(monitor.last_report.get(), before);

        let monitor = TokenMonitor::new(CancellationToken::new(), Duration::ZERO);
        let before = monitor.last_report.get();
        std::thread::sleep(Duration::from_millis(2));
        monitor.progress(1, Some(10));
        assert!(monitor.last_report.get() > before);
    }
}
