use alloc::vec::Vec;

use crate::AnimationError;

/// A numeric animation value.
///
/// Composite values are treated as independent scalar components; every operation is applied
/// component-wise.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    Scalar(f64),
    Vec2([f64; 2]),
    Vec4([f64; 4]),
    Components(Vec<f64>),
}

impl Value {
    pub fn components(&self) -> &[f64] {
        match self {
            Self::Scalar(v) => core::slice::from_ref(v),
            Self::Vec2(v) => v.as_slice(),
            Self::Vec4(v) => v.as_slice(),
            Self::Components(v) => v.as_slice(),
        }
    }

    pub fn len(&self) -> usize {
        self.components().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Applies `f` to every component, keeping the shape.
    pub fn map(&self, mut f: impl FnMut(f64) -> f64) -> Value {
        match self {
            Self::Scalar(v) => Self::Scalar(f(*v)),
            Self::Vec2([a, b]) => Self::Vec2([f(*a), f(*b)]),
            Self::Vec4([a, b, c, d]) => Self::Vec4([f(*a), f(*b), f(*c), f(*d)]),
            Self::Components(v) => Self::Components(v.iter().map(|c| f(*c)).collect()),
        }
    }

    /// Combines two values component-wise. The result takes the shape of `self`.
    pub fn zip_with(
        &self,
        other: &Value,
        mut f: impl FnMut(f64, f64) -> f64,
    ) -> Result<Value, AnimationError> {
        let rhs = other.components();
        if self.len() != rhs.len() {
            return Err(AnimationError::ShapeMismatch {
                from: self.len(),
                to: rhs.len(),
            });
        }
        let mut i = 0usize;
        Ok(self.map(|c| {
            let out = f(c, rhs[i]);
            i += 1;
            out
        }))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Scalar(v)
    }
}

impl From<[f64; 2]> for Value {
    fn from(v: [f64; 2]) -> Self {
        Self::Vec2(v)
    }
}

impl From<[f64; 4]> for Value {
    fn from(v: [f64; 4]) -> Self {
        Self::Vec4(v)
    }
}

impl From<Vec<f64>> for Value {
    fn from(v: Vec<f64>) -> Self {
        Self::Components(v)
    }
}
