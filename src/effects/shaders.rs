/// Fullscreen triangle vertex shader shared by every effect pass
pub const FULLSCREEN_VERTEX_SHADER: &str = r#"#version 300 es
precision highp float;

out vec2 vTextureCoord;

void main() {
    float x = float((gl_VertexID & 1) << 2);
    float y = float((gl_VertexID & 2) << 1);
    vTextureCoord = vec2(x * 0.5, y * 0.5);
    gl_Position = vec4(x - 1.0, y - 1.0, 0.0, 1.0);
}
"#;

/// Underwater lighting: darkens the image toward deep blue wherever the
/// light map's red channel is low
pub const UNDERWATER_LIGHT_FRAGMENT_SHADER: &str = r#"#version 300 es
precision mediump float;

in vec2 vTextureCoord;

uniform sampler2D uSampler;
uniform sampler2D lightMap;
uniform vec2 scale;
uniform vec2 offset;
uniform vec2 mapDimensions;
uniform vec4 dimensions;

out vec4 fragColor;

void main() {
    vec4 col = texture(uSampler, vTextureCoord);
    vec2 lightCoord = clamp((vTextureCoord + offset) * scale, vec2(0.0), vec2(1.0));
    vec4 light = texture(lightMap, lightCoord);
    vec4 tint = vec4(col.r / 20.0, col.g / 20.0, col.b / 2.0, 1.0);
    fragColor = mix(col, tint, 1.0 - light.r);
}
"#;

/// Sinusoidal sampling distortion driven by the horizontal coordinate
pub const WOBBLE_FRAGMENT_SHADER: &str = r#"#version 300 es
precision mediump float;

in vec2 vTextureCoord;

uniform sampler2D uSampler;
uniform vec2 offset;
uniform vec2 scale;

out vec4 fragColor;

const float TAU = 6.28318530718;

void main() {
    vec2 coord = vTextureCoord;
    coord.x += sin(vTextureCoord.x * 20.0 + offset.y) * 0.002;
    coord.y += sin(vTextureCoord.x * TAU * scale.x + offset.x)
        * abs(0.5 - vTextureCoord.y * scale.x) * scale.y;
    fragColor = texture(uSampler, coord);
}
"#;

/// Name of the sampler every effect reads its input image from
pub const SOURCE_SAMPLER: &str = "uSampler";

/// Find the GLSL type a source declares for uniform `name`
pub fn declared_uniform_type<'a>(source: &'a str, name: &str) -> Option<&'a str> {
    source.lines().find_map(|line| {
        let mut words = line.trim().trim_end_matches(';').split_whitespace();
        match (words.next(), words.next(), words.next(), words.next()) {
            (Some("uniform"), Some(ty), Some(n), None) if n == name => Some(ty),
            _ => None,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shader_version() {
        for source in [
            FULLSCREEN_VERTEX_SHADER,
            UNDERWATER_LIGHT_FRAGMENT_SHADER,
            WOBBLE_FRAGMENT_SHADER,
        ] {
            assert!(source.starts_with("#version 300 es"));
        }
    }

    #[test]
    fn test_declared_uniform_type() {
        let source = UNDERWATER_LIGHT_FRAGMENT_SHADER;
        assert_eq!(declared_uniform_type(source, "lightMap"), Some("sampler2D"));
        assert_eq!(declared_uniform_type(source, "dimensions"), Some("vec4"));
        assert_eq!(declared_uniform_type(source, SOURCE_SAMPLER), Some("sampler2D"));
        assert_eq!(declared_uniform_type(source, "map"), None);
        assert_eq!(declared_uniform_type(WOBBLE_FRAGMENT_SHADER, "lightMap"), None);
    }
}
