/// Broad classification of [`AnimationError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The descriptor is incomplete or has an invalid step count.
    Configuration,
    /// `from` and `to` have a different number of components.
    ValueShape,
}

/// Reasons a [`crate::RelativeAnimation`] cannot produce keyframes.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AnimationError {
    #[error("missing from value")]
    MissingFromValue,

    #[error("missing to value")]
    MissingToValue,

    #[error("steps must be at least 1 (got {0})")]
    InvalidSteps(usize),

    #[error("from value has {from} components but to value has {to}")]
    ShapeMismatch { from: usize, to: usize },
}

impl AnimationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingFromValue | Self::MissingToValue | Self::InvalidSteps(_) => {
                ErrorKind::Configuration
            }
            Self::ShapeMismatch { .. } => ErrorKind::ValueShape,
        }
    }
}
