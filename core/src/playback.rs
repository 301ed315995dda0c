//! Pure playback timeline: index, play/pause, speed, and tick advancement.
//!
//! This is deliberately free of clocks and timers. The host drives it by
//! reporting elapsed wall time through [`Playback::tick`]; everything else is
//! plain state transitions, which keeps playback behavior unit-testable.

use std::time::Duration;

/// Default time spent on each step before auto-advancing.
pub const DEFAULT_STEP_INTERVAL: Duration = Duration::from_millis(600);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playback {
    step_count: usize,
    index: usize,
    playing: bool,
    interval: Duration,
    elapsed_in_step: Duration,
}

impl Playback {
    /// A paused timeline at index 0 over `step_count` steps.
    pub fn new(step_count: usize) -> Self {
        Self {
            step_count,
            index: 0,
            playing: false,
            interval: DEFAULT_STEP_INTERVAL,
            elapsed_in_step: Duration::ZERO,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn step_count(&self) -> usize {
        self.step_count
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// True at the final step (or when the timeline is empty).
    pub fn at_end(&self) -> bool {
        self.step_count == 0 || self.index + 1 >= self.step_count
    }

    /// Jumps to `index`, clamped to the final step. Playback state is kept.
    pub fn seek(&mut self, index: usize) {
        self.index = index.min(self.step_count.saturating_sub(1));
        self.elapsed_in_step = Duration::ZERO;
    }

    /// Manual advance; pauses automatic playback.
    pub fn step_forward(&mut self) {
        self.playing = false;
        if !self.at_end() {
            self.index += 1;
        }
        self.elapsed_in_step = Duration::ZERO;
    }

    /// Manual retreat; pauses automatic playback.
    pub fn step_back(&mut self) {
        self.playing = false;
        self.index = self.index.saturating_sub(1);
        self.elapsed_in_step = Duration::ZERO;
    }

    /// Starts playing. Playing from the end restarts at the beginning.
    pub fn play(&mut self) {
        if self.step_count == 0 {
            return;
        }
        if self.at_end() {
            self.index = 0;
        }
        self.playing = true;
        self.elapsed_in_step = Duration::ZERO;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn toggle(&mut self) {
        if self.playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Back to index 0, paused.
    pub fn reset(&mut self) {
        self.index = 0;
        self.playing = false;
        self.elapsed_in_step = Duration::ZERO;
    }

    /// Sets the per-step interval. Zero is coerced to 1ms so a tick always
    /// terminates.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval.max(Duration::from_millis(1));
    }

    /// Advances the timeline by `elapsed` wall time. Returns the number of
    /// steps advanced. Auto-pauses on reaching the final step.
    pub fn tick(&mut self, elapsed: Duration) -> usize {
        if !self.playing {
            return 0;
        }
        self.elapsed_in_step += elapsed;
        let mut advanced = 0;
        while self.elapsed_in_step >= self.interval && !self.at_end() {
            self.elapsed_in_step -= self.interval;
            self.index += 1;
            advanced += 1;
        }
        if self.at_end() {
            self.playing = false;
            self.elapsed_in_step = Duration::ZERO;
        }
        advanced
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_advances_once_per_interval() {
        let mut playback = Playback::new(10);
        playback.play();
        assert_eq!(playback.tick(Duration::from_millis(599)), 0);
        assert_eq!(playback.tick(Duration::from_millis(1)), 1);
        assert_eq!(playback.index(), 1);
    }

    #[test]
    fn long_tick_advances_multiple_steps() {
        let mut playback = Playback::new(10);
        playback.play();
        assert_eq!(playback.tick(Duration::from_millis(1800)), 3);
        assert_eq!(playback.index(), 3);
        assert!(playback.is_playing());
    }

    #[test]
    fn playback_pauses_at_the_final_step() {
        let mut playback = Playback::new(3);
        playback.play();
        playback.tick(Duration::from_secs(60));
        assert_eq!(playback.index(), 2);
        assert!(!playback.is_playing());
    }

    #[test]
    fn play_from_the_end_restarts() {
        let mut playback = Playback::new(3);
        playback.seek(2);
        assert!(playback.at_end());
        playback.play();
        assert_eq!(playback.index(), 0);
        assert!(playback.is_playing());
    }

    #[test]
    fn manual_stepping_pauses_and_clamps() {
        let mut playback = Playback::new(2);
        playback.play();
        playback.step_forward();
        assert!(!playback.is_playing());
        assert_eq!(playback.index(), 1);
        // Already at the end; no further advance.
        playback.step_forward();
        assert_eq!(playback.index(), 1);
        playback.step_back();
        playback.step_back();
        assert_eq!(playback.index(), 0);
    }

    #[test]
    fn seek_clamps_to_the_final_step() {
        let mut playback = Playback::new(5);
        playback.seek(99);
        assert_eq!(playback.index(), 4);
    }

    #[test]
    fn faster_interval_advances_sooner() {
        let mut playback = Playback::new(10);
        playback.set_interval(Duration::from_millis(100));
        playback.play();
        assert_eq!(playback.tick(Duration::from_millis(250)), 2);
    }

    #[test]
    fn empty_timeline_never_plays() {
        let mut playback = Playback::new(0);
        playback.play();
        assert!(!playback.is_playing());
        assert_eq!(playback.tick(Duration::from_secs(1)), 0);
        assert_eq!(playback.index(), 0);
    }

    #[test]
    fn reset_returns_to_a_paused_start() {
        let mut playback = Playback::new(5);
        playback.seek(3);
        playback.play();
        playback.reset();
        assert_eq!(playback.index(), 0);
        assert!(!playback.is_playing());
    }
}
