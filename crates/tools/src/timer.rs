use std::time::Duration;

/// Ring buffer of recent frame durations for on-screen and CLI timing.
#[derive(Debug)]
pub struct FrameTimer {
    history: Vec<Duration>,
    index: usize,
    filled: bool,
}

impl FrameTimer {
    /// Keep the last `capacity` frames (at least one).
    pub fn new(capacity: usize) -> Self {
        Self {
            history: vec![Duration::ZERO; capacity.max(1)],
            index: 0,
            filled: false,
        }
    }

    pub fn record(&mut self, dt: Duration) {
        self.history[self.index] = dt;
        self.index = (self.index + 1) % self.history.len();
        if self.index == 0 {
            self.filled = true;
        }
    }

    fn recorded(&self) -> &[Duration] {
        if self.filled {
            &self.history
        } else {
            &self.history[..self.index]
        }
    }

    /// Most recently recorded duration.
    pub fn last(&self) -> Option<Duration> {
        if self.count() == 0 {
            return None;
        }
        let len = self.history.len();
        Some(self.history[(self.index + len - 1) % len])
    }

    pub fn average(&self) -> Duration {
        let recorded = self.recorded();
        if recorded.is_empty() {
            return Duration::ZERO;
        }
        recorded.iter().sum::<Duration>() / recorded.len() as u32
    }

    pub fn max(&self) -> Duration {
        self.recorded().iter().copied().max().unwrap_or(Duration::ZERO)
    }

    pub fn min(&self) -> Duration {
        self.recorded().iter().copied().min().unwrap_or(Duration::ZERO)
    }

    pub fn count(&self) -> usize {
        self.recorded().len()
    }
}

/// Milliseconds as a float, the unit frame times are displayed in.
pub fn as_millis_f32(d: Duration) -> f32 {
    d.as_secs_f32() * 1000.0
}
