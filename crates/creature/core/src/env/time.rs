/// Snapshot of the monotonic game clock for one simulation frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GameTime {
    /// Seconds since the session started.
    pub now: f64,
    /// Frame counter, used for modulus-sampled checks.
    pub frame: u64,
    /// Smoothed frame delta in seconds.
    pub delta: f32,
}

impl GameTime {
    pub fn new(now: f64, frame: u64, delta: f32) -> Self {
        Self { now, frame, delta }
    }

    /// True on frames that are a multiple of `period`.
    #[inline]
    pub fn every(&self, period: u64) -> bool {
        period != 0 && self.frame % period == 0
    }
}
