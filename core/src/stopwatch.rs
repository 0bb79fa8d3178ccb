use core::time::Duration;

use web_time::Instant;

/// Pausable game clock, queried on demand rather than ticking.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Stopwatch {
    accumulated: Duration,
    running_since: Option<Instant>,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running_since.is_some()
    }

    /// Starts or resumes; no effect while already running.
    pub fn start(&mut self) {
        self.start_at(Instant::now());
    }

    /// Stops accumulating; a later [`Self::start`] resumes from the same total.
    pub fn pause(&mut self) {
        self.pause_at(Instant::now());
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed_at(Instant::now())
    }

    /// Elapsed time as `MM:SS`, the format the scoreboard ranks by.
    pub fn snapshot(&self) -> String {
        format_clock(self.elapsed())
    }

    pub(crate) fn start_at(&mut self, now: Instant) {
        if self.running_since.is_none() {
            self.running_since = Some(now);
        }
    }

    pub(crate) fn pause_at(&mut self, now: Instant) {
        if let Some(since) = self.running_since.take() {
            self.accumulated += now.saturating_duration_since(since);
        }
    }

    pub(crate) fn elapsed_at(&self, now: Instant) -> Duration {
        self.accumulated
            + self
                .running_since
                .map_or(Duration::ZERO, |since| now.saturating_duration_since(since))
    }
}

/// Longest time the clock shows; string order only matches time order at a fixed width.
pub const MAX_CLOCK_SECS: u64 = 99 * 60 + 59;

/// Formats whole seconds as zero-padded `MM:SS`, saturating at `99:59`.
pub fn format_clock(elapsed: Duration) -> String {
    let secs = elapsed.as_secs().min(MAX_CLOCK_SECS);
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::*;

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_clock(Duration::ZERO), "00:00");
        assert_eq!(format_clock(Duration::from_millis(65_900)), "01:05");
        assert_eq!(format_clock(Duration::from_secs(99 * 60 + 59)), "99:59");
        assert_eq!(format_clock(Duration::from_secs(100 * 60 + 1)), "99:59");
    }

    #[test]
    fn very_long_game_does_not_outrank_faster_times() {
        let mut record = ScoreRecord {
            current_difficulty: Difficulty::Hard,
            ..Default::default()
        };
        for (i, entry) in record.hard.iter_mut().enumerate() {
            *entry = ScoreEntry::new(format!("P{i}"), format!("{:02}:00", 90 + i));
        }
        let scoreboard = Scoreboard::new(Some(record));
        let slow = format_clock(Duration::from_secs(100 * 60));

        assert!(!scoreboard.check_time(&slow));
        assert_eq!(scoreboard.compute_insertion(&slow).1, None);
    }

    #[test]
    fn idle_stopwatch_reads_zero() {
        let stopwatch = Stopwatch::new();

        assert!(!stopwatch.is_running());
        assert_eq!(stopwatch.snapshot(), "00:00");
    }

    #[test]
    fn paused_time_is_not_counted() {
        let t0 = Instant::now();
        let mut stopwatch = Stopwatch::new();

        stopwatch.start_at(t0);
        stopwatch.pause_at(t0 + Duration::from_secs(10));
        stopwatch.start_at(t0 + Duration::from_secs(100));

        assert_eq!(stopwatch.elapsed_at(t0 + Duration::from_secs(105)), Duration::from_secs(15));
    }

    #[test]
    fn start_while_running_keeps_origin() {
        let t0 = Instant::now();
        let mut stopwatch = Stopwatch::new();

        stopwatch.start_at(t0);
        stopwatch.start_at(t0 + Duration::from_secs(5));

        assert_eq!(stopwatch.elapsed_at(t0 + Duration::from_secs(7)), Duration::from_secs(7));
    }

    #[test]
    fn reset_clears_everything() {
        let t0 = Instant::now();
        let mut stopwatch = Stopwatch::new();
        stopwatch.start_at(t0);
        stopwatch.pause_at(t0 + Duration::from_secs(3));

        stopwatch.reset();

        assert_eq!(stopwatch, Stopwatch::new());
    }
}
