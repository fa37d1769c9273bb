use super::MeasurementSink;
use std::collections::BTreeMap;

pub const DEFAULT_WINDOW: usize = 100;

#[derive(Debug, Clone)]
struct PhaseBuffer {
    samples: Vec<f64>,
    recorded: u64,
}

/// Rolling per-phase GPU timings.
///
/// Each label owns a ring of `window` samples that starts out zero-filled.
/// Writes land at `frame % window`, and [`average`](Self::average) divides by
/// the full window, so averages read low until a label has been written for
/// `window` distinct frames.
#[derive(Debug, Clone)]
pub struct MeasurementAggregator {
    window: usize,
    frame: u64,
    buffers: BTreeMap<String, PhaseBuffer>,
}

impl MeasurementAggregator {
    pub fn new(window: usize) -> Self {
        Self { window: window.max(1), frame: 0, buffers: BTreeMap::new() }
    }

    pub fn record(&mut self, label: &str, value_ms: f64) {
        let index = (self.frame % self.window as u64) as usize;
        let window = self.window;
        let buffer = self
            .buffers
            .entry(label.to_string())
            .or_insert_with(|| PhaseBuffer { samples: vec![0.0; window], recorded: 0 });
        buffer.samples[index] = value_ms;
        buffer.recorded += 1;
    }

    /// Mean over the whole ring, unwritten zeros included. Unknown labels
    /// average to zero.
    pub fn average(&self, label: &str) -> f64 {
        self.buffers
            .get(label)
            .map_or(0.0, |buffer| buffer.samples.iter().sum::<f64>() / self.window as f64)
    }

    pub fn snapshot(&self) -> BTreeMap<String, f64> {
        self.buffers.keys().map(|label| (label.clone(), self.average(label))).collect()
    }

    pub fn advance_frame(&mut self) {
        self.frame += 1;
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Number of values ever recorded under `label`.
    pub fn sample_count(&self, label: &str) -> u64 {
        self.buffers.get(label).map_or(0, |buffer| buffer.recorded)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.buffers.keys().map(String::as_str)
    }
}

impl Default for MeasurementAggregator {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

impl MeasurementSink for MeasurementAggregator {
    fn record(&mut self, label: &str, value_ms: f64) {
        MeasurementAggregator::record(self, label, value_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_label_averages_over_zero_filled_window() {
        let mut agg = MeasurementAggregator::new(4);
        agg.record("upload", 8.0);
        // 8 / 4, not 8 / 1: the unwritten slots still count.
        assert_eq!(agg.average("upload"), 2.0);
    }

    #[test]
    fn writes_in_the_same_frame_overwrite_each_other() {
        let mut agg = MeasurementAggregator::new(4);
        agg.record("render", 1.0);
        agg.record("render", 3.0);
        assert_eq!(agg.average("render"), 0.75);
        assert_eq!(agg.sample_count("render"), 2);
    }

    #[test]
    fn snapshot_is_sorted_by_label() {
        let mut agg = MeasurementAggregator::new(2);
        agg.record("upload", 2.0);
        agg.record("frameEnd", 4.0);
        let labels: Vec<_> = agg.snapshot().into_keys().collect();
        assert_eq!(labels, vec!["frameEnd", "upload"]);
        assert_eq!(agg.labels().count(), 2);
    }

    #[test]
    fn zero_window_is_clamped_to_one() {
        let mut agg = MeasurementAggregator::new(0);
        agg.record("upload", 5.0);
        assert_eq!(agg.window(), 1);
        assert_eq!(agg.average("upload"), 5.0);
    }
}
