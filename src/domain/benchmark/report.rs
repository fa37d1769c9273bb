use crate::domain::errors::{AppError, ValidationResult};
use crate::domain::texture::texture_bytes;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Bytes pushed to the GPU per frame, in MiB.
pub fn upload_rate_mb(upload_frequency: u32, texture_size: u32) -> f64 {
    upload_frequency as f64 * texture_bytes(texture_size) as f64 / 1024.0 / 1024.0
}

/// What the status display shows once per interval.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    pub frame_count: u64,
    pub texture_size: u32,
    pub upload_frequency: u32,
    pub upload_rate_mb: f64,
    pub fps: f64,
    pub gpu_timing: bool,
    pub phase_averages_ms: BTreeMap<String, f64>,
}

impl StatusReport {
    pub fn new(
        frame_count: u64,
        texture_size: u32,
        upload_frequency: u32,
        fps: f64,
        gpu_timing: bool,
        phase_averages_ms: BTreeMap<String, f64>,
    ) -> Self {
        Self {
            frame_count,
            texture_size,
            upload_frequency,
            upload_rate_mb: upload_rate_mb(upload_frequency, texture_size),
            fps,
            gpu_timing,
            phase_averages_ms,
        }
    }

    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Texture Size: {}x{}", self.texture_size, self.texture_size),
            format!("Upload Frequency: {}/frame", self.upload_frequency),
            format!("Frame Count: {}", self.frame_count),
            format!("Upload Rate: {:.2} MB/Frame", self.upload_rate_mb),
            format!("FPS: {:.1}", self.fps),
        ];
        if !self.gpu_timing {
            lines.push("GPU Timing: unavailable".to_string());
        }
        lines.extend(
            self.phase_averages_ms
                .iter()
                .map(|(label, avg)| format!("Avg {} Time: {:.2}ms", label, avg)),
        );
        lines
    }

    pub fn to_json(&self) -> ValidationResult<String> {
        serde_json::to_string(self).map_err(|e| AppError::ValidationError(e.to_string()))
    }
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines().join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_uploads_of_1024_is_forty_megabytes() {
        assert_eq!(upload_rate_mb(10, 1024), 40.0);
        let report = StatusReport::new(0, 1024, 10, 0.0, true, BTreeMap::new());
        assert!(report.lines().contains(&"Upload Rate: 40.00 MB/Frame".to_string()));
    }

    #[test]
    fn status_text_lists_phases_in_label_order() {
        let phases = BTreeMap::from([
            ("upload".to_string(), 3.14159),
            ("frameEnd".to_string(), 0.02),
            ("render".to_string(), 0.5),
        ]);
        let report = StatusReport::new(120, 512, 4, 59.94, true, phases);
        insta::assert_snapshot!(report.to_string(), @r"
        Texture Size: 512x512
        Upload Frequency: 4/frame
        Frame Count: 120
        Upload Rate: 4.00 MB/Frame
        FPS: 59.9
        Avg frameEnd Time: 0.02ms
        Avg render Time: 0.50ms
        Avg upload Time: 3.14ms
        ");
    }

    #[test]
    fn missing_timer_is_called_out() {
        let report = StatusReport::new(1, 64, 1, 0.0, false, BTreeMap::new());
        assert_eq!(report.lines().last().map(String::as_str), Some("GPU Timing: unavailable"));
    }

    #[test]
    fn json_uses_camel_case_keys() {
        let report = StatusReport::new(1, 64, 1, 0.0, true, BTreeMap::new());
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["uploadFrequency"], 1);
        assert_eq!(json["gpuTiming"], true);
    }
}
