/// Animation time advanced per rendered frame. Not tied to wall-clock units.
pub const TIME_PER_FRAME: f32 = 0.05;

/// Frame counter a fresh clock starts from.
pub const DEFAULT_START_FRAME: u64 = 99;

/// Monotonic frame counter driving the animation time.
///
/// The only render state carried between frames. Advanced exactly once per
/// rendered frame, before the time is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameClock {
    frame: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::starting_at(DEFAULT_START_FRAME)
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(frame: u64) -> Self {
        Self { frame }
    }

    /// Frames counted so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Animation time of the current frame.
    pub fn time(&self) -> f32 {
        self.frame as f32 * TIME_PER_FRAME
    }

    /// Count one more frame and return its animation time.
    pub fn advance(&mut self) -> f32 {
        self.frame += 1;
        self.time()
    }
}
