use alloc::sync::Arc;

/// An arbitrary timing function.
///
/// It receives linear progress in `[0, 1]` and may return values outside `[0, 1]` (overshoot for
/// bounce/elastic effects).
pub type TimingFunction = Arc<dyn Fn(f64) -> f64 + Send + Sync>;

const NEWTON_ITERATIONS: usize = 8;
const BISECTION_ITERATIONS: usize = 32;
const SOLVE_EPSILON: f64 = 1e-6;
const MIN_SLOPE: f64 = 1e-6;

#[inline]
fn abs(v: f64) -> f64 {
    if v < 0.0 { -v } else { v }
}

/// A cubic bezier with fixed endpoints `(0, 0)` and `(1, 1)`.
///
/// The curve is stored in polynomial form: `x(t) = ((ax * t + bx) * t + cx) * t`, same for `y`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitBezier {
    ax: f64,
    bx: f64,
    cx: f64,
    ay: f64,
    by: f64,
    cy: f64,
}

impl UnitBezier {
    /// Creates a curve from the two inner control points.
    pub fn new(p1x: f64, p1y: f64, p2x: f64, p2y: f64) -> Self {
        let cx = 3.0 * p1x;
        let bx = 3.0 * (p2x - p1x) - cx;
        let ax = 1.0 - cx - bx;

        let cy = 3.0 * p1y;
        let by = 3.0 * (p2y - p1y) - cy;
        let ay = 1.0 - cy - by;

        Self {
            ax,
            bx,
            cx,
            ay,
            by,
            cy,
        }
    }

    /// Returns the inner control points as `[p1x, p1y, p2x, p2y]`.
    pub fn control_points(&self) -> [f64; 4] {
        let p1x = self.cx / 3.0;
        let p1y = self.cy / 3.0;
        let p2x = (self.bx + self.cx) / 3.0 + p1x;
        let p2y = (self.by + self.cy) / 3.0 + p1y;
        [p1x, p1y, p2x, p2y]
    }

    #[inline]
    fn sample_curve_x(&self, t: f64) -> f64 {
        ((self.ax * t + self.bx) * t + self.cx) * t
    }

    #[inline]
    fn sample_curve_y(&self, t: f64) -> f64 {
        ((self.ay * t + self.by) * t + self.cy) * t
    }

    #[inline]
    fn sample_curve_derivative_x(&self, t: f64) -> f64 {
        (3.0 * self.ax * t + 2.0 * self.bx) * t + self.cx
    }

    /// Finds the curve parameter `t` for which `x(t) == x`.
    ///
    /// Newton-Raphson first; if it stalls on a flat tangent, leaves `[0, 1]`, or runs out of
    /// iterations, falls back to bisection. Both loops are bounded.
    pub fn solve_curve_x(&self, x: f64) -> f64 {
        let mut t = x;
        for _ in 0..NEWTON_ITERATIONS {
            let err = self.sample_curve_x(t) - x;
            if abs(err) < SOLVE_EPSILON {
                return t;
            }
            let slope = self.sample_curve_derivative_x(t);
            if abs(slope) < MIN_SLOPE {
                break;
            }
            t -= err / slope;
            if !(0.0..=1.0).contains(&t) {
                break;
            }
        }

        vtrace!(x, "solve_curve_x: falling back to bisection");

        let mut lo = 0.0f64;
        let mut hi = 1.0f64;
        t = x.clamp(lo, hi);
        for _ in 0..BISECTION_ITERATIONS {
            let sampled = self.sample_curve_x(t);
            if abs(sampled - x) < SOLVE_EPSILON {
                break;
            }
            if x > sampled {
                lo = t;
            } else {
                hi = t;
            }
            t = lo + (hi - lo) * 0.5;
        }
        t
    }

    /// Evaluates eased progress for linear progress `x`.
    ///
    /// The endpoints are exact: `solve(0.0) == 0.0` and `solve(1.0) == 1.0`.
    pub fn solve(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }
        self.sample_curve_y(self.solve_curve_x(x))
    }
}

/// An easing curve mapping linear progress to (possibly overshooting) eased progress.
#[derive(Clone)]
pub enum TimingCurve {
    Bezier(UnitBezier),
    Custom(TimingFunction),
}

impl TimingCurve {
    pub fn bezier_with_control_points(p1x: f64, p1y: f64, p2x: f64, p2y: f64) -> Self {
        Self::Bezier(UnitBezier::new(p1x, p1y, p2x, p2y))
    }

    /// `bezier_with_control_points(0.5, 0.0, 0.5, 1.0)`.
    ///
    /// Symmetric and flat at both ends, which blends well when additive animations interrupt
    /// each other.
    pub fn perfect_bezier() -> Self {
        Self::bezier_with_control_points(0.5, 0.0, 0.5, 1.0)
    }

    pub fn linear() -> Self {
        Self::bezier_with_control_points(0.0, 0.0, 1.0, 1.0)
    }

    pub fn ease() -> Self {
        Self::bezier_with_control_points(0.25, 0.1, 0.25, 1.0)
    }

    pub fn ease_in() -> Self {
        Self::bezier_with_control_points(0.42, 0.0, 1.0, 1.0)
    }

    pub fn ease_out() -> Self {
        Self::bezier_with_control_points(0.0, 0.0, 0.58, 1.0)
    }

    pub fn ease_in_out() -> Self {
        Self::bezier_with_control_points(0.42, 0.0, 0.58, 1.0)
    }

    pub fn custom(f: impl Fn(f64) -> f64 + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(f))
    }

    /// Samples the curve at linear progress `x` (expected in `[0, 1]`).
    pub fn sample(&self, x: f64) -> f64 {
        match self {
            Self::Bezier(b) => b.solve(x),
            Self::Custom(f) => f(x),
        }
    }
}

impl From<UnitBezier> for TimingCurve {
    fn from(b: UnitBezier) -> Self {
        Self::Bezier(b)
    }
}

impl core::fmt::Debug for TimingCurve {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Bezier(b) => f.debug_tuple("Bezier").field(&b.control_points()).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
