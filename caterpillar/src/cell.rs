use alloc::vec::Vec;

use relative_animation::{AnimationError, Keyframes, RelativeAnimation};

use crate::{CaterpillarOptions, Rect};

/// A consumer-constructed visual unit that can be recycled across item indexes.
///
/// A cell is owned either by the engine (attached to exactly one index) or by the reuse pool
/// (free). Ownership makes double attachment impossible.
pub trait ReusableCell {
    /// Selects which pool this cell returns to and which requests it may satisfy.
    fn reuse_identifier(&self) -> &str;

    /// Assigns the cell's model frame. Always called with the destination rect.
    fn set_frame(&mut self, frame: Rect);

    /// Hands a transition to the animation runner driving this cell.
    fn add_transition(&mut self, transition: FrameTransition);

    /// Discards every pending transition.
    fn remove_all_transitions(&mut self);

    /// Called after the cell is detached and its transitions are removed.
    fn prepare_for_reuse(&mut self) {}
}

/// The geometric property a [`FrameTransition`] animates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FrameProperty {
    /// `[x, y]` of the frame origin.
    Position,
    /// `[width, height]` of the frame.
    Size,
}

impl FrameProperty {
    fn sample(self, rect: &Rect) -> [f64; 2] {
        match self {
            Self::Position => rect.origin(),
            Self::Size => rect.size(),
        }
    }
}

/// Keyframes for one frame property, ready for the animation runner.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameTransition {
    pub property: FrameProperty,
    pub keyframes: Keyframes,
    pub duration_ms: u64,
}

/// Builds one transition per property that differs between `previous` and `current`.
pub(crate) fn frame_transitions(
    options: &CaterpillarOptions,
    previous: Rect,
    current: Rect,
) -> Result<Vec<FrameTransition>, AnimationError> {
    let mut out = Vec::new();
    for property in [FrameProperty::Position, FrameProperty::Size] {
        let from = property.sample(&previous);
        let to = property.sample(&current);
        if from == to {
            continue;
        }
        let keyframes = RelativeAnimation::new(from, to)
            .with_timing(Some(options.timing.clone()))
            .with_absolute(options.absolute)
            .with_steps(options.steps)
            .keyframes()?;
        out.push(FrameTransition {
            property,
            keyframes,
            duration_ms: options.duration_ms,
        });
    }
    Ok(out)
}
