use std::collections::VecDeque;

const FPS_WINDOW: usize = 60;

/// CPU-side frame pacing.
#[derive(Debug, Clone, Default)]
pub struct FrameStats {
    frame_count: u64,
    last_frame_start: Option<f64>,
    fps_log: VecDeque<f64>,
}

impl FrameStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_frame(&mut self, now_ms: f64) {
        if let Some(last) = self.last_frame_start {
            let delta = now_ms - last;
            if delta > 0.0 {
                self.fps_log.push_back(1000.0 / delta);
                if self.fps_log.len() > FPS_WINDOW {
                    self.fps_log.pop_front();
                }
            }
        }
        self.last_frame_start = Some(now_ms);
    }

    pub fn end_frame(&mut self) {
        self.frame_count += 1;
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn average_fps(&self) -> f64 {
        if self.fps_log.is_empty() {
            0.0
        } else {
            self.fps_log.iter().sum::<f64>() / self.fps_log.len() as f64
        }
    }
}

/// Wall-clock gate for status pushes, independent of frame rate.
#[derive(Debug, Clone)]
pub struct DisplayThrottle {
    interval_ms: f64,
    last_update: Option<f64>,
}

impl DisplayThrottle {
    pub fn new(interval_ms: f64) -> Self {
        Self { interval_ms, last_update: None }
    }

    pub fn should_update(&self, now_ms: f64) -> bool {
        self.last_update.is_none_or(|last| now_ms - last >= self.interval_ms)
    }

    pub fn mark_updated(&mut self, now_ms: f64) {
        self.last_update = Some(now_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fps_is_averaged_over_recent_deltas() {
        let mut stats = FrameStats::new();
        stats.begin_frame(0.0);
        assert_eq!(stats.average_fps(), 0.0);
        stats.begin_frame(10.0);
        stats.begin_frame(30.0);
        assert!((stats.average_fps() - 75.0).abs() < 1e-9);
    }

    #[test]
    fn fps_window_is_bounded() {
        let mut stats = FrameStats::new();
        for i in 0..200 {
            stats.begin_frame(i as f64 * 20.0);
        }
        assert_eq!(stats.fps_log.len(), FPS_WINDOW);
        assert!((stats.average_fps() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn throttle_fires_once_per_interval() {
        let mut throttle = DisplayThrottle::new(1000.0);
        assert!(throttle.should_update(5.0));
        throttle.mark_updated(5.0);
        assert!(!throttle.should_update(500.0));
        assert!(!throttle.should_update(1004.9));
        assert!(throttle.should_update(1005.0));
    }
}
