use std::time::{Duration, Instant};

/// Per-session statistics. Nothing here outlives the process.
pub struct GameMetrics {
    /// Start of the current unpaused stretch, `None` while the clock is stopped
    running_since: Option<Instant>,
    /// Play time banked from earlier stretches
    banked: Duration,
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub best_level: u32,
    pub games_played: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            running_since: Some(Instant::now()),
            banked: Duration::ZERO,
            elapsed_time: Duration::ZERO,
            high_score: 0,
            best_level: 1,
            games_played: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.banked
            + self
                .running_since
                .map(|since| since.elapsed())
                .unwrap_or_default();
    }

    pub fn on_game_start(&mut self) {
        self.running_since = Some(Instant::now());
        self.banked = Duration::ZERO;
        self.elapsed_time = Duration::ZERO;
    }

    /// Stop or restart the play clock
    pub fn on_pause_changed(&mut self, paused: bool) {
        if paused {
            self.stop_clock();
        } else if self.running_since.is_none() {
            self.running_since = Some(Instant::now());
        }
    }

    pub fn on_game_over(&mut self, final_score: u32, final_level: u32) {
        self.stop_clock();
        self.games_played += 1;
        if final_score > self.high_score {
            self.high_score = final_score;
        }
        self.best_level = self.best_level.max(final_level);
    }

    fn stop_clock(&mut self) {
        if let Some(since) = self.running_since.take() {
            self.banked += since.elapsed();
        }
        self.elapsed_time = self.banked;
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
