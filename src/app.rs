use leptos::html::Canvas;
use leptos::*;
use std::str::FromStr;
use strum::IntoEnumIterator;

use crate::application::StatusSink;
use crate::domain::benchmark::{
    BenchConfig, MAX_UPLOAD_FREQUENCY, MIN_UPLOAD_FREQUENCY, ShaderVariant, StatusReport,
    TextureSize,
};
use crate::domain::errors::AppError;
use crate::domain::logging::LogComponent;
use crate::global_state::{
    current_params, fatal_error_signal, last_report_signal, running_signal, shader_signal,
    status_lines_signal, texture_size_signal, upload_frequency_signal, use_mipmaps_signal,
};
use crate::infrastructure::rendering::{is_benchmark_active, start_benchmark};
use crate::infrastructure::webgl::canvas_by_id;
use crate::{log_error, log_warn};

pub const CANVAS_ID: &str = "bench-canvas";

/// Pushes status reports into the panel signals.
pub struct PanelStatus;

impl StatusSink for PanelStatus {
    fn show(&mut self, report: &StatusReport) {
        status_lines_signal().set(report.lines());
        last_report_signal().set(Some(report.clone()));
    }

    fn show_error(&mut self, error: &AppError) {
        fatal_error_signal().set(Some(error.to_string()));
    }
}

#[component]
pub fn App() -> impl IntoView {
    view! {
        <style>
            {r#"
            .bench-app {
                font-family: monospace;
                background: #1b1f24;
                color: #e6e6e6;
                min-height: 100vh;
                padding: 16px;
            }
            .panel {
                display: flex;
                gap: 16px;
                align-items: center;
                flex-wrap: wrap;
                margin-bottom: 12px;
            }
            .status {
                background: rgba(0, 0, 0, 0.6);
                padding: 8px;
                white-space: pre;
            }
            .error {
                color: #ff6b6b;
            }
            "#}
        </style>
        <div class="bench-app">
            <ParameterPanel />
            <BenchCanvas />
            <StatusView />
        </div>
    }
}

#[component]
fn ParameterPanel() -> impl IntoView {
    let on_size_change = move |ev: web_sys::Event| {
        let value = event_target_value(&ev);
        match value.parse::<u32>().map_err(|e| AppError::ValidationError(e.to_string())) {
            Ok(texels) => match TextureSize::try_from(texels) {
                Ok(size) => texture_size_signal().set(size),
                Err(e) => {
                    log_warn!(LogComponent::Presentation("Panel"), "{}", e);
                }
            },
            Err(e) => {
                log_warn!(LogComponent::Presentation("Panel"), "{}", e);
            }
        }
    };

    let on_frequency_input = move |ev: web_sys::Event| {
        if let Ok(frequency) = event_target_value(&ev).parse::<u32>() {
            upload_frequency_signal()
                .set(frequency.clamp(MIN_UPLOAD_FREQUENCY, MAX_UPLOAD_FREQUENCY));
        }
    };

    let on_shader_change = move |ev: web_sys::Event| match ShaderVariant::from_str(&event_target_value(&ev)) {
        Ok(shader) => shader_signal().set(shader),
        Err(e) => {
            log_warn!(LogComponent::Presentation("Panel"), "unknown shader: {}", e);
        }
    };

    view! {
        <div class="panel">
            <label>
                "Texture Size "
                <select on:change=on_size_change>
                    {TextureSize::iter()
                        .map(|size| {
                            view! {
                                <option
                                    value=u32::from(size).to_string()
                                    selected=move || texture_size_signal().get() == size
                                >
                                    {size.to_string()}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </label>
            <label>
                {move || format!("Upload Frequency {} ", upload_frequency_signal().get())}
                <input
                    type="range"
                    min=MIN_UPLOAD_FREQUENCY
                    max=MAX_UPLOAD_FREQUENCY
                    step="1"
                    prop:value=move || upload_frequency_signal().get().to_string()
                    on:input=on_frequency_input
                />
            </label>
            <label>
                <input
                    type="checkbox"
                    prop:checked=move || running_signal().get()
                    on:change=move |ev| running_signal().set(event_target_checked(&ev))
                />
                " Running"
            </label>
            <label>
                <input
                    type="checkbox"
                    prop:checked=move || use_mipmaps_signal().get()
                    on:change=move |ev| use_mipmaps_signal().set(event_target_checked(&ev))
                />
                " Mipmaps"
            </label>
            <label>
                "Shader "
                <select on:change=on_shader_change>
                    {ShaderVariant::iter()
                        .map(|shader| {
                            view! {
                                <option
                                    value=shader.as_ref().to_string()
                                    selected=move || shader_signal().get() == shader
                                >
                                    {shader.to_string()}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </label>
        </div>
    }
}

#[component]
fn BenchCanvas() -> impl IntoView {
    let canvas_ref = create_node_ref::<Canvas>();
    let config = BenchConfig::default();
    let (width, height) = (config.canvas_width, config.canvas_height);

    // Start once the canvas is mounted
    create_effect(move |_| {
        if canvas_ref.get().is_none() || is_benchmark_active() {
            return;
        }
        let started = canvas_by_id(CANVAS_ID)
            .and_then(|canvas| start_benchmark(&canvas, &config, PanelStatus, current_params));
        if let Err(error) = started {
            log_error!(LogComponent::Presentation("App"), "benchmark failed to start: {}", error);
            fatal_error_signal().set(Some(error.to_string()));
        }
    });

    view! { <canvas id=CANVAS_ID node_ref=canvas_ref width=width height=height /> }
}

#[component]
fn StatusView() -> impl IntoView {
    view! {
        <pre class="status">{move || status_lines_signal().get().join("\n")}</pre>
        {move || fatal_error_signal().get().map(|error| view! { <div class="error">{error}</div> })}
    }
}
