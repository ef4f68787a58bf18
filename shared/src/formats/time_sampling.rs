//! Uniform time sampling
//!
//! Sample `i` of an archive sits at `start_time + i * time_per_cycle`.

/// Uniform time sampling of an animated object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeSampling {
    /// Seconds between consecutive samples
    pub time_per_cycle: f64,
    /// Time of the first sample in seconds
    pub start_time: f64,
}

impl TimeSampling {
    pub fn new(time_per_cycle: f64, start_time: f64) -> Self {
        Self {
            time_per_cycle,
            start_time,
        }
    }

    /// One sample every `1 / fps` seconds, starting at time 0
    pub fn uniform(fps: f64) -> Self {
        Self::new(1.0 / fps, 0.0)
    }

    /// Time of sample `index` in seconds
    pub fn sample_time(&self, index: usize) -> f64 {
        self.start_time + index as f64 * self.time_per_cycle
    }

    /// Samples per second implied by the cycle length
    pub fn frames_per_second(&self) -> f64 {
        1.0 / self.time_per_cycle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_24fps() {
        let ts = TimeSampling::uniform(24.0);
        assert_eq!(ts.sample_time(0), 0.0);
        assert_eq!(ts.sample_time(1), 1.0 / 24.0);
        assert!((ts.sample_time(24) - 1.0).abs() < 1e-12);
        assert!((ts.frames_per_second() - 24.0).abs() < 1e-9);
    }

    #[test]
    fn test_start_offset() {
        let ts = TimeSampling::new(0.5, 2.0);
        assert_eq!(ts.sample_time(0), 2.0);
        assert_eq!(ts.sample_time(3), 3.5);
    }
}
