//! Presentation timer: a count-up stopwatch and a count-down alarm.
//!
//! Both are driven by a one-second `tick()` from the host window's timer.

/// `MM:SS`, or `HH:MM:SS` from one hour on.
pub fn format_time(seconds: u64) -> String {
    let h = seconds / 3600;
    let m = (seconds % 3600) / 60;
    let s = seconds % 60;
    if h > 0 {
        format!("{h:02}:{m:02}:{s:02}")
    } else {
        format!("{m:02}:{s:02}")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stopwatch {
    elapsed: u64,
    running: bool,
}

impl Stopwatch {
    pub fn elapsed(&self) -> u64 {
        self.elapsed
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Start or pause.
    pub fn toggle(&mut self) {
        self.running = !self.running;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn tick(&mut self) {
        if self.running {
            self.elapsed += 1;
        }
    }

    pub fn display(&self) -> String {
        format_time(self.elapsed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownTick {
    Idle,
    Running(u64),
    /// Reached zero on this tick.
    Finished,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Countdown {
    duration: u64,
    remaining: u64,
    running: bool,
}

impl Countdown {
    /// Duration used on the next fresh start.
    pub fn set_duration(&mut self, minutes: u32, seconds: u32) {
        self.duration = u64::from(minutes) * 60 + u64::from(seconds.min(59));
    }

    pub fn duration(&self) -> u64 {
        self.duration
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Paused part-way through; `toggle` resumes.
    pub fn is_paused(&self) -> bool {
        !self.running && self.remaining > 0
    }

    /// Start from the configured duration, pause, or resume.
    pub fn toggle(&mut self) {
        if self.running {
            self.running = false;
            return;
        }
        if self.remaining == 0 {
            self.remaining = self.duration;
        }
        self.running = self.remaining > 0;
    }

    pub fn reset(&mut self) {
        self.running = false;
        self.remaining = 0;
    }

    pub fn tick(&mut self) -> CountdownTick {
        if !self.running {
            return CountdownTick::Idle;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.running = false;
            CountdownTick::Finished
        } else {
            CountdownTick::Running(self.remaining)
        }
    }

    pub fn display(&self) -> String {
        format_time(self.remaining)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_hours() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(75), "01:15");
        assert_eq!(format_time(3600), "01:00:00");
        assert_eq!(format_time(3725), "01:02:05");
    }

    #[test]
    fn stopwatch_counts_only_while_running() {
        let mut w = Stopwatch::default();
        w.tick();
        assert_eq!(w.elapsed(), 0);
        w.toggle();
        w.tick();
        w.tick();
        w.toggle();
        w.tick();
        assert_eq!(w.display(), "00:02");
        w.reset();
        assert_eq!(w.elapsed(), 0);
        assert!(!w.is_running());
    }

    #[test]
    fn countdown_finishes_exactly_once() {
        let mut c = Countdown::default();
        c.set_duration(0, 2);
        c.toggle();
        assert_eq!(c.tick(), CountdownTick::Running(1));
        assert_eq!(c.tick(), CountdownTick::Finished);
        assert_eq!(c.tick(), CountdownTick::Idle);
        assert!(!c.is_running());
    }

    #[test]
    fn countdown_pause_resumes_where_it_left_off() {
        let mut c = Countdown::default();
        c.set_duration(1, 0);
        c.toggle();
        c.tick();
        c.toggle();
        assert!(c.is_paused());
        c.tick();
        assert_eq!(c.remaining(), 59);
        c.toggle();
        c.tick();
        assert_eq!(c.display(), "00:58");
    }

    #[test]
    fn zero_duration_does_not_start() {
        let mut c = Countdown::default();
        c.toggle();
        assert!(!c.is_running());
        assert_eq!(c.tick(), CountdownTick::Idle);
    }
}
