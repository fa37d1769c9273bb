use crate::domain::benchmark::ShaderVariant;

pub const VERTEX_SHADER: &str = r#"#version 300 es
layout(location = 0) in vec2 position;
layout(location = 1) in vec2 texcoord;
out vec2 v_texcoord;

void main() {
    gl_Position = vec4(position, 0.0, 1.0);
    v_texcoord = texcoord;
}
"#;

/// Scrolls the texture vertically by 1/1024 of its height per frame.
pub const SCROLLING_FRAGMENT_SHADER: &str = r#"#version 300 es
precision highp float;
uniform sampler2D u_texture;
uniform uint u_frame;
in vec2 v_texcoord;
out vec4 outColor;

void main() {
    vec2 coord = v_texcoord;
    coord.y += float(u_frame) / 1024.0;
    outColor = texture(u_texture, coord);
}
"#;

pub const STATIC_FRAGMENT_SHADER: &str = r#"#version 300 es
precision highp float;
uniform sampler2D u_texture;
uniform uint u_frame;
in vec2 v_texcoord;
out vec4 outColor;

void main() {
    outColor = texture(u_texture, v_texcoord);
}
"#;

pub fn fragment_source(variant: ShaderVariant) -> &'static str {
    match variant {
        ShaderVariant::Scrolling => SCROLLING_FRAGMENT_SHADER,
        ShaderVariant::Static => STATIC_FRAGMENT_SHADER,
    }
}
