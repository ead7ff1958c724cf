//! Error types for curve evaluation, effect parameters and scene loading

use thiserror::Error;

use crate::effects::UniformKind;
use crate::math::Vec2;

/// Invalid control-point data handed to the curve evaluator
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CurveError {
    #[error("curve needs at least 4 control points, found {found}")]
    TooFewPoints { found: usize },

    #[error("control point axes differ in length (x: {x}, y: {y})")]
    AxisLengthMismatch { x: usize, y: usize },

    #[error("control point {index} is not a finite number")]
    NonFiniteControlPoint { index: usize },

    #[error("progress must be a finite number")]
    NonFiniteProgress,
}

/// Rejected access to an effect parameter
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterError {
    #[error("unknown parameter '{0}'")]
    Unknown(String),

    #[error("parameter '{name}' is {expected}, got {found}")]
    TypeMismatch {
        name: String,
        expected: UniformKind,
        found: UniformKind,
    },

    #[error("parameter '{0}' is derived from texture metadata and cannot be set")]
    ReadOnly(String),

    #[error("parameter '{0}' declared twice")]
    Duplicate(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EffectError {
    #[error("light map must be power-of-two sized, got {width}x{height}")]
    NonPowerOfTwo { width: u32, height: u32 },

    #[error("fragment program does not declare `uniform {expected} {name};`")]
    UndeclaredUniform { name: String, expected: UniformKind },

    #[error(transparent)]
    Parameter(#[from] ParameterError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid path: {0}")]
    Curve(#[from] CurveError),

    #[error("{field} must be a positive number of seconds, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    #[error("{field} must be finite, got [{}, {}]", .value.x, .value.y)]
    NonFinite { field: &'static str, value: Vec2 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_problem() {
        let err = CurveError::TooFewPoints { found: 3 };
        assert!(err.to_string().contains("at least 4"));

        let err = ParameterError::TypeMismatch {
            name: "scale".to_string(),
            expected: UniformKind::Vec2,
            found: UniformKind::Scalar,
        };
        assert_eq!(err.to_string(), "parameter 'scale' is vec2, got float");
    }

    #[test]
    fn test_effect_error_wraps_parameter_error() {
        let err: EffectError = ParameterError::Unknown("tint".to_string()).into();
        assert_eq!(err.to_string(), "unknown parameter 'tint'");
    }
}
