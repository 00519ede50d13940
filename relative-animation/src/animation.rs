use alloc::vec::Vec;

use crate::{AnimationError, TimingCurve, Value};

/// Number of keyframe intervals used when none is configured.
pub const DEFAULT_STEPS: usize = 50;

/// A description of an additive (or absolute) keyframe animation.
///
/// `from_value` and `to_value` are declared absolutely. Unless `absolute` is set, the generated
/// keyframes run from `from - to` down to zero and must be added to the resting value by the
/// animation runner.
///
/// Without a `timing` curve, progress is linear.
#[derive(Clone, Debug)]
pub struct RelativeAnimation {
    pub from_value: Option<Value>,
    pub to_value: Option<Value>,
    pub timing: Option<TimingCurve>,
    pub absolute: bool,
    pub steps: usize,
}

impl Default for RelativeAnimation {
    fn default() -> Self {
        Self {
            from_value: None,
            to_value: None,
            timing: None,
            absolute: false,
            steps: DEFAULT_STEPS,
        }
    }
}

impl RelativeAnimation {
    pub fn new(from_value: impl Into<Value>, to_value: impl Into<Value>) -> Self {
        Self {
            from_value: Some(from_value.into()),
            to_value: Some(to_value.into()),
            ..Self::default()
        }
    }

    pub fn with_from_value(mut self, from_value: impl Into<Value>) -> Self {
        self.from_value = Some(from_value.into());
        self
    }

    pub fn with_to_value(mut self, to_value: impl Into<Value>) -> Self {
        self.to_value = Some(to_value.into());
        self
    }

    pub fn with_timing(mut self, timing: Option<TimingCurve>) -> Self {
        self.timing = timing;
        self
    }

    pub fn with_absolute(mut self, absolute: bool) -> Self {
        self.absolute = absolute;
        self
    }

    pub fn with_steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    /// Samples the timing curve at `i / steps` for `i in 0..=steps`.
    ///
    /// The samples are not clamped, so overshooting curves produce values outside `[0, 1]`.
    pub fn sample_progress(&self) -> Result<Vec<f64>, AnimationError> {
        if self.steps < 1 {
            return Err(AnimationError::InvalidSteps(self.steps));
        }
        let steps = self.steps as f64;
        Ok((0..=self.steps)
            .map(|i| {
                let x = i as f64 / steps;
                match &self.timing {
                    Some(curve) => curve.sample(x),
                    None => x,
                }
            })
            .collect())
    }

    /// Builds `steps + 1` keyframes.
    ///
    /// Absolute: `from * (1 - p) + to * p`, so the first frame is exactly `from` and the last is
    /// exactly `to` for any curve with fixed endpoints.
    ///
    /// Additive: `(from - to) * (1 - p)`, so the first frame is `from - to` and the last is zero.
    pub fn keyframes(&self) -> Result<Keyframes, AnimationError> {
        let progress = self.sample_progress()?;
        let from = self
            .from_value
            .as_ref()
            .ok_or(AnimationError::MissingFromValue)?;
        let to = self
            .to_value
            .as_ref()
            .ok_or(AnimationError::MissingToValue)?;

        let steps = self.steps as f64;
        let key_times = (0..=self.steps).map(|i| i as f64 / steps).collect();

        let values = if self.absolute {
            progress
                .iter()
                .map(|&p| from.zip_with(to, |a, b| a * (1.0 - p) + b * p))
                .collect::<Result<Vec<_>, _>>()?
        } else {
            let delta = from.zip_with(to, |a, b| a - b)?;
            progress
                .iter()
                .map(|&p| delta.map(|d| d * (1.0 - p)))
                .collect()
        };

        Ok(Keyframes {
            values,
            key_times,
            additive: !self.absolute,
        })
    }
}

/// Discrete keyframes ready to be handed to an animation runner.
///
/// `key_times[i]` is the normalized time of `values[i]`. When `additive` is set, each value is an
/// offset to be added to the resting value at evaluation time.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Keyframes {
    pub values: Vec<Value>,
    pub key_times: Vec<f64>,
    pub additive: bool,
}

impl Keyframes {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn first(&self) -> Option<&Value> {
        self.values.first()
    }

    pub fn last(&self) -> Option<&Value> {
        self.values.last()
    }

    /// Returns the value the runner would display at keyframe `index` over `resting`.
    ///
    /// Additive keyframes are added to `resting`; absolute keyframes are returned as-is. Returns
    /// `None` if `index` is out of range or the shapes differ.
    pub fn compose(&self, index: usize, resting: &Value) -> Option<Value> {
        let frame = self.values.get(index)?;
        if !self.additive {
            return Some(frame.clone());
        }
        resting.zip_with(frame, |r, d| r + d).ok()
    }
}
