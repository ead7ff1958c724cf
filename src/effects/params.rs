//! Typed uniform parameters shared between an effect and the renderer

use std::fmt;

use super::texture::TextureRef;
use crate::error::ParameterError;
use crate::math::Vec2;

/// Shape of a uniform, fixed when the parameter is declared
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniformKind {
    Scalar,
    Vec2,
    Vec4,
    Sampler2D,
}

impl UniformKind {
    /// Type name used in GLSL uniform declarations
    pub fn glsl_type(&self) -> &'static str {
        match self {
            UniformKind::Scalar => "float",
            UniformKind::Vec2 => "vec2",
            UniformKind::Vec4 => "vec4",
            UniformKind::Sampler2D => "sampler2D",
        }
    }
}

impl fmt::Display for UniformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.glsl_type())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UniformValue {
    Scalar(f32),
    Vec2(Vec2),
    Vec4([f32; 4]),
    Texture(TextureRef),
}

impl UniformValue {
    pub fn kind(&self) -> UniformKind {
        match self {
            UniformValue::Scalar(_) => UniformKind::Scalar,
            UniformValue::Vec2(_) => UniformKind::Vec2,
            UniformValue::Vec4(_) => UniformKind::Vec4,
            UniformValue::Texture(_) => UniformKind::Sampler2D,
        }
    }
}

impl From<f32> for UniformValue {
    fn from(v: f32) -> Self {
        UniformValue::Scalar(v)
    }
}

impl From<Vec2> for UniformValue {
    fn from(v: Vec2) -> Self {
        UniformValue::Vec2(v)
    }
}

impl From<[f32; 4]> for UniformValue {
    fn from(v: [f32; 4]) -> Self {
        UniformValue::Vec4(v)
    }
}

impl From<TextureRef> for UniformValue {
    fn from(v: TextureRef) -> Self {
        UniformValue::Texture(v)
    }
}

/// Who may write a parameter after declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Writable,
    /// Filled in by the owning effect from texture metadata
    Derived,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Uniform {
    name: String,
    kind: UniformKind,
    access: Access,
    value: UniformValue,
}

impl Uniform {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> UniformKind {
        self.kind
    }

    pub fn access(&self) -> Access {
        self.access
    }

    pub fn value(&self) -> &UniformValue {
        &self.value
    }
}

/// Named uniforms in declaration order.
///
/// A parameter's name and kind never change once declared; writes of a
/// different shape are rejected and leave the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterSet {
    uniforms: Vec<Uniform>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a writable parameter, builder style.
    ///
    /// Panics if `name` is already declared.
    pub fn with(mut self, name: &str, value: impl Into<UniformValue>) -> Self {
        let declared = self.declare(name, value.into(), Access::Writable);
        assert!(declared.is_ok(), "parameter '{}' declared twice", name);
        self
    }

    /// Declare a derived parameter, builder style.
    ///
    /// Panics if `name` is already declared.
    pub fn with_derived(mut self, name: &str, value: impl Into<UniformValue>) -> Self {
        let declared = self.declare(name, value.into(), Access::Derived);
        assert!(declared.is_ok(), "parameter '{}' declared twice", name);
        self
    }

    pub fn declare(
        &mut self,
        name: &str,
        value: UniformValue,
        access: Access,
    ) -> Result<(), ParameterError> {
        if self.find(name).is_some() {
            return Err(ParameterError::Duplicate(name.to_string()));
        }
        self.uniforms.push(Uniform {
            name: name.to_string(),
            kind: value.kind(),
            access,
            value,
        });
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&UniformValue> {
        self.find(name).map(|u| &u.value)
    }

    pub fn get_vec2(&self, name: &str) -> Option<Vec2> {
        match self.get(name)? {
            UniformValue::Vec2(v) => Some(*v),
            _ => None,
        }
    }

    pub fn get_texture(&self, name: &str) -> Option<&TextureRef> {
        match self.get(name)? {
            UniformValue::Texture(t) => Some(t),
            _ => None,
        }
    }

    /// Write a writable parameter; derived parameters are rejected
    pub fn set(
        &mut self,
        name: &str,
        value: impl Into<UniformValue>,
    ) -> Result<(), ParameterError> {
        let uniform = self
            .find_mut(name)
            .ok_or_else(|| ParameterError::Unknown(name.to_string()))?;
        if uniform.access == Access::Derived {
            return Err(ParameterError::ReadOnly(name.to_string()));
        }
        let value = value.into();
        if value.kind() != uniform.kind {
            return Err(ParameterError::TypeMismatch {
                name: uniform.name.clone(),
                expected: uniform.kind,
                found: value.kind(),
            });
        }
        uniform.value = value;
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Uniform> {
        self.uniforms.iter()
    }

    pub fn len(&self) -> usize {
        self.uniforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.uniforms.is_empty()
    }

    fn find(&self, name: &str) -> Option<&Uniform> {
        self.uniforms.iter().find(|u| u.name == name)
    }

    fn find_mut(&mut self, name: &str) -> Option<&mut Uniform> {
        self.uniforms.iter_mut().find(|u| u.name == name)
    }
}
