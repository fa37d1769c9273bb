use leptos::{SignalGetUntracked, SignalSet};
use std::str::FromStr;
use wasm_bindgen::prelude::*;

use crate::domain::benchmark::{BenchParams, ShaderVariant, TextureSize};
use crate::domain::errors::AppError;
use crate::global_state::{
    apply_params, current_params, last_report_signal, running_signal, shader_signal,
    texture_size_signal, upload_frequency_signal, use_mipmaps_signal,
};
use crate::infrastructure::rendering::{is_benchmark_active, stop_benchmark};

/// JavaScript handle onto the benchmark parameters and status. Setters take
/// effect on the next frame.
#[wasm_bindgen]
#[derive(Default)]
pub struct BenchmarkApi {}

#[wasm_bindgen]
impl BenchmarkApi {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {}
    }

    #[wasm_bindgen(js_name = setTextureSize)]
    pub fn set_texture_size(&self, size: u32) -> Result<(), JsValue> {
        texture_size_signal().set(TextureSize::try_from(size)?);
        Ok(())
    }

    #[wasm_bindgen(js_name = setUploadFrequency)]
    pub fn set_upload_frequency(&self, frequency: u32) -> Result<(), JsValue> {
        let params = BenchParams { upload_frequency: frequency, ..current_params() };
        params.validate()?;
        upload_frequency_signal().set(frequency);
        Ok(())
    }

    #[wasm_bindgen(js_name = setRunning)]
    pub fn set_running(&self, running: bool) {
        running_signal().set(running);
    }

    #[wasm_bindgen(js_name = setMipmaps)]
    pub fn set_mipmaps(&self, enabled: bool) {
        use_mipmaps_signal().set(enabled);
    }

    #[wasm_bindgen(js_name = setShader)]
    pub fn set_shader(&self, name: &str) -> Result<(), JsValue> {
        let shader = ShaderVariant::from_str(name)
            .map_err(|_| AppError::ValidationError(format!("unknown shader '{}'", name)))?;
        shader_signal().set(shader);
        Ok(())
    }

    #[wasm_bindgen(js_name = paramsJson)]
    pub fn params_json(&self) -> Result<String, JsValue> {
        Ok(current_params().to_json()?)
    }

    /// Replaces every parameter at once from a JSON object; missing fields
    /// take their defaults.
    #[wasm_bindgen(js_name = loadParamsJson)]
    pub fn load_params_json(&self, json: &str) -> Result<(), JsValue> {
        apply_params(&BenchParams::from_json(json)?);
        Ok(())
    }

    /// Latest status report, `undefined` until the first one is shown.
    #[wasm_bindgen(js_name = statusJson)]
    pub fn status_json(&self) -> Result<Option<String>, JsValue> {
        match last_report_signal().get_untracked() {
            Some(report) => Ok(Some(report.to_json()?)),
            None => Ok(None),
        }
    }

    #[wasm_bindgen(js_name = isActive)]
    pub fn is_active(&self) -> bool {
        is_benchmark_active()
    }

    /// Stops the loop and releases its GPU resources.
    pub fn stop(&self) -> bool {
        stop_benchmark()
    }
}
