use relative_animation::{DEFAULT_STEPS, TimingCurve};

use crate::Rect;

/// Configuration for [`crate::Caterpillar`].
///
/// Changes applied through `Caterpillar::set_options` take effect on the next layout pass.
#[derive(Clone, Debug)]
pub struct CaterpillarOptions {
    /// The viewport used until the host reports one.
    pub initial_viewport: Rect,

    /// When `false`, rect changes are always applied without transitions.
    pub animates_layout_changes: bool,

    /// Easing used for frame transitions.
    pub timing: TimingCurve,

    /// Emit absolute keyframes instead of additive ones.
    pub absolute: bool,

    /// Number of keyframe intervals per transition (`steps + 1` keyframes).
    pub steps: usize,

    /// Duration passed through to the animation runner.
    pub duration_ms: u64,
}

impl Default for CaterpillarOptions {
    fn default() -> Self {
        Self {
            initial_viewport: Rect::ZERO,
            animates_layout_changes: true,
            timing: TimingCurve::perfect_bezier(),
            absolute: false,
            steps: DEFAULT_STEPS,
            duration_ms: 250,
        }
    }
}

impl CaterpillarOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_initial_viewport(mut self, viewport: Rect) -> Self {
        self.initial_viewport = viewport;
        self
    }

    pub fn with_animates_layout_changes(mut self, animates: bool) -> Self {
        self.animates_layout_changes = animates;
        self
    }

    pub fn with_timing(mut self, timing: TimingCurve) -> Self {
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

    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }
}
