//! Wall-clock timing for the animation loop.

use std::time::Instant;

/// Frame timing snapshot
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameTime {
    /// Seconds since the clock started (drives the `time` uniform)
    pub elapsed_s: f32,

    /// Seconds since the previous tick
    pub dt: f32,

    /// Monotonic frame counter
    pub frame_index: u64,
}

/// Animation clock. Starts on the first tick, so setup time does not
/// count towards the wave phase.
#[derive(Debug, Clone, Default)]
pub struct Clock {
    start: Option<Instant>,
    last: Option<Instant>,
    frame_index: u64,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    /// Advance to `now`. Instants earlier than the previous tick count as no time passing.
    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        let start = *self.start.get_or_insert(now);
        let last = self.last.unwrap_or(now);
        let now = now.max(last);

        let elapsed = now.saturating_duration_since(start);
        let dt = now.saturating_duration_since(last);
        self.last = Some(now);

        let frame = FrameTime {
            elapsed_s: elapsed.as_secs_f32(),
            dt: dt.as_secs_f32(),
            frame_index: self.frame_index,
        };
        self.frame_index = self.frame_index.wrapping_add(1);
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_first_tick_starts_at_zero() {
        let mut clock = Clock::new();
        let frame = clock.tick_at(Instant::now());
        assert_eq!(frame.elapsed_s, 0.0);
        assert_eq!(frame.dt, 0.0);
        assert_eq!(frame.frame_index, 0);
    }

    #[test]
    fn test_elapsed_and_delta() {
        let mut clock = Clock::new();
        let t0 = Instant::now();
        clock.tick_at(t0);

        let frame = clock.tick_at(t0 + Duration::from_millis(16));
        assert!((frame.dt - 0.016).abs() < 1e-6);
        assert!((frame.elapsed_s - 0.016).abs() < 1e-6);

        let frame = clock.tick_at(t0 + Duration::from_millis(50));
        assert!((frame.dt - 0.034).abs() < 1e-6);
        assert!((frame.elapsed_s - 0.050).abs() < 1e-6);
        assert_eq!(frame.frame_index, 2);
    }

    #[test]
    fn test_monotonic_when_time_goes_backwards() {
        let mut clock = Clock::new();
        let t0 = Instant::now();
        clock.tick_at(t0 + Duration::from_millis(100));
        let frame = clock.tick_at(t0);
        assert_eq!(frame.dt, 0.0);
        assert!(frame.elapsed_s >= 0.0);
    }
}
