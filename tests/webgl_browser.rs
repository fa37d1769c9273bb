#![cfg(all(target_arch = "wasm32", feature = "render"))]

use texture_upload_bench::application::Rasterizer;
use texture_upload_bench::domain::benchmark::ShaderVariant;
use texture_upload_bench::domain::texture::{TextureDataGenerator, TextureUploader};
use texture_upload_bench::domain::timing::{GpuTimer, MeasurementAggregator, UPLOAD_LABEL};
use texture_upload_bench::infrastructure::rendering::QuadRenderer;
use texture_upload_bench::infrastructure::webgl::{WebGlTextures, WebGlTimerQueries, create_context};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlCanvasElement;
wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

fn canvas() -> HtmlCanvasElement {
    let document = gloo::utils::document();
    let canvas = document
        .create_element("canvas")
        .expect("canvas element")
        .dyn_into::<HtmlCanvasElement>()
        .expect("is a canvas");
    canvas.set_width(64);
    canvas.set_height(64);
    document.body().expect("body").append_child(&canvas).expect("append");
    canvas
}

#[wasm_bindgen_test]
fn webgl2_context_is_created() {
    let gl = create_context(&canvas()).expect("webgl2");
    assert!(gl.drawing_buffer_width() > 0);
}

#[wasm_bindgen_test]
fn timer_follows_extension_availability() {
    let gl = create_context(&canvas()).expect("webgl2");
    let detected = WebGlTimerQueries::detect(&gl);
    let has_extension = detected.is_some();

    let mut timer = GpuTimer::new(detected, 4).expect("timer");
    assert_eq!(timer.is_enabled(), has_extension);

    timer.begin_frame();
    timer.begin_phase(UPLOAD_LABEL);
    timer.end_frame();
    let mut aggregator = MeasurementAggregator::new(10);
    // Results are never ready within the same task.
    assert_eq!(timer.poll_results(&mut aggregator), 0);
    timer.destroy();
}

#[wasm_bindgen_test]
fn texture_upload_and_draw() {
    let gl = create_context(&canvas()).expect("webgl2");
    let mut uploader =
        TextureUploader::new(WebGlTextures::new(gl.clone()), TextureDataGenerator::new(3));
    let texture = uploader.upload(None, 64, true).expect("upload");
    let texture = uploader.upload(Some(texture), 64, true).expect("re-upload");

    let mut renderer = QuadRenderer::new(gl).expect("renderer");
    renderer.draw(ShaderVariant::Scrolling, texture.handle()).expect("draw");
    renderer.draw(ShaderVariant::Static, texture.handle()).expect("draw");
    assert_eq!(renderer.frame(), 2);
    uploader.release(texture);
}
