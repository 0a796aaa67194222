//! Cubic-bezier timing curves
//!
//! A curve maps normalized time progress to a normalized output value,
//! the same way CSS `cubic-bezier()` timing functions do. The x
//! component must stay inside [0, 1] so the curve can be inverted as a
//! function of time; the y component may overshoot.
//!
//! Inversion uses a precomputed sample table for the initial guess,
//! Newton-Raphson where the slope is healthy and binary subdivision
//! where it is not (Newton-Raphson can diverge near zero-slope regions).

use std::fmt;
use std::sync::OnceLock;

const NEWTON_ITERATIONS: usize = 4;
const NEWTON_MIN_SLOPE: f32 = 0.001;
const SUBDIVISION_PRECISION: f32 = 1e-7;
const SUBDIVISION_MAX_ITERATIONS: usize = 10;
const SPLINE_TABLE_SIZE: usize = 11;
const SAMPLE_STEP: f32 = 0.1;

/// Shared presets with the canonical CSS control points.
pub static EASE: EasingCurve = EasingCurve::from_points(0.25, 0.1, 0.25, 1.0);
pub static LINEAR: EasingCurve = EasingCurve::from_points(0.0, 0.0, 1.0, 1.0);
pub static EASE_IN: EasingCurve = EasingCurve::from_points(0.42, 0.0, 1.0, 1.0);
pub static EASE_OUT: EasingCurve = EasingCurve::from_points(0.0, 0.0, 0.58, 1.0);
pub static EASE_IN_OUT: EasingCurve = EasingCurve::from_points(0.42, 0.0, 0.58, 1.0);

/// Resolve a CSS timing-function keyword to its preset curve.
pub fn preset(name: &str) -> Option<&'static EasingCurve> {
    match name {
        "ease" => Some(&EASE),
        "linear" => Some(&LINEAR),
        "ease-in" => Some(&EASE_IN),
        "ease-out" => Some(&EASE_OUT),
        "ease-in-out" => Some(&EASE_IN_OUT),
        _ => None,
    }
}

/// Error type for curve construction
#[derive(Debug, Clone, PartialEq)]
pub enum EasingError {
    /// A control-point coordinate was NaN or infinite
    NonFinite(f32),
    /// An x coordinate fell outside [0, 1]
    XOutOfRange(f32),
}

impl fmt::Display for EasingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EasingError::NonFinite(v) => write!(f, "control point {} is not finite", v),
            EasingError::XOutOfRange(v) => write!(f, "x control point {} outside [0, 1]", v),
        }
    }
}

// Cubic bezier through (0,0) and (1,1) in polynomial form, one axis at
// a time. a1/a2 are that axis' control-point coordinates.
fn coef_a(a1: f32, a2: f32) -> f32 {
    1.0 - 3.0 * a2 + 3.0 * a1
}
fn coef_b(a1: f32, a2: f32) -> f32 {
    3.0 * a2 - 6.0 * a1
}
fn coef_c(a1: f32) -> f32 {
    3.0 * a1
}

fn bezier_at(t: f32, a1: f32, a2: f32) -> f32 {
    ((coef_a(a1, a2) * t + coef_b(a1, a2)) * t + coef_c(a1)) * t
}

fn bezier_slope(t: f32, a1: f32, a2: f32) -> f32 {
    3.0 * coef_a(a1, a2) * t * t + 2.0 * coef_b(a1, a2) * t + coef_c(a1)
}

/// A cubic-bezier timing function.
#[derive(Debug, Clone)]
pub struct EasingCurve {
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
    /// x(u) sampled at u = 0, 0.1, ..., 1.0. Built on first evaluation
    /// and immutable afterwards.
    samples: OnceLock<[f32; SPLINE_TABLE_SIZE]>,
}

impl EasingCurve {
    /// Build a curve from two control points. The x coordinates must be
    /// finite and inside [0, 1].
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Result<Self, EasingError> {
        for v in [x1, y1, x2, y2] {
            if !v.is_finite() {
                return Err(EasingError::NonFinite(v));
            }
        }
        if !(0.0..=1.0).contains(&x1) {
            return Err(EasingError::XOutOfRange(x1));
        }
        if !(0.0..=1.0).contains(&x2) {
            return Err(EasingError::XOutOfRange(x2));
        }
        Ok(Self::from_points(x1, y1, x2, y2))
    }

    /// Unvalidated constructor for the preset statics, whose control
    /// points are known-valid.
    const fn from_points(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        EasingCurve {
            x1,
            y1,
            x2,
            y2,
            samples: OnceLock::new(),
        }
    }

    /// Eased value for a progress `t` in [0, 1].
    pub fn evaluate(&self, t: f32) -> f32 {
        // Both control points on the identity line: the curve is y = x.
        if self.x1 == self.y1 && self.x2 == self.y2 {
            return t;
        }
        if t == 0.0 {
            return 0.0;
        }
        if t == 1.0 {
            return 1.0;
        }
        bezier_at(self.param_for_x(t), self.y1, self.y2)
    }

    fn samples(&self) -> &[f32; SPLINE_TABLE_SIZE] {
        self.samples.get_or_init(|| {
            let mut table = [0.0; SPLINE_TABLE_SIZE];
            for (i, sample) in table.iter_mut().enumerate() {
                *sample = bezier_at(i as f32 * SAMPLE_STEP, self.x1, self.x2);
            }
            table
        })
    }

    /// Find the curve parameter u with x(u) close to `x`.
    fn param_for_x(&self, x: f32) -> f32 {
        let samples = self.samples();
        let last = SPLINE_TABLE_SIZE - 1;

        // Walk the table to the interval containing x, then place the
        // initial guess by linear interpolation inside it.
        let mut interval_start = 0.0;
        let mut i = 1;
        while i != last && samples[i] <= x {
            interval_start += SAMPLE_STEP;
            i += 1;
        }
        let i = i - 1;

        let dist = (x - samples[i]) / (samples[i + 1] - samples[i]);
        let guess = interval_start + dist * SAMPLE_STEP;

        let initial_slope = bezier_slope(guess, self.x1, self.x2);
        if initial_slope >= NEWTON_MIN_SLOPE {
            self.newton_raphson(x, guess)
        } else if initial_slope == 0.0 {
            guess
        } else {
            self.binary_subdivide(x, interval_start, interval_start + SAMPLE_STEP)
        }
    }

    fn newton_raphson(&self, x: f32, mut guess: f32) -> f32 {
        for _ in 0..NEWTON_ITERATIONS {
            let slope = bezier_slope(guess, self.x1, self.x2);
            if slope == 0.0 {
                return guess;
            }
            let residual = bezier_at(guess, self.x1, self.x2) - x;
            guess -= residual / slope;
        }
        guess
    }

    fn binary_subdivide(&self, x: f32, mut lower: f32, mut upper: f32) -> f32 {
        let mut t = lower;
        for _ in 0..SUBDIVISION_MAX_ITERATIONS {
            t = lower + (upper - lower) / 2.0;
            let residual = bezier_at(t, self.x1, self.x2) - x;
            if residual > 0.0 {
                upper = t;
            } else {
                lower = t;
            }
            if residual.abs() <= SUBDIVISION_PRECISION {
                break;
            }
        }
        t
    }
}

impl fmt::Display for EasingCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cubic-bezier({}, {}, {}, {})",
            self.x1, self.y1, self.x2, self.y2
        )
    }
}

/// How an animation's raw progress is shaped before reaching its
/// progress callback.
#[derive(Clone)]
pub enum Easing {
    /// Raw progress passed through unchanged.
    Linear,
    /// One of the shared preset curves.
    Preset(&'static EasingCurve),
    /// A custom curve owned by the animation.
    Curve(EasingCurve),
}

impl Easing {
    /// Resolve a CSS timing-function keyword.
    pub fn named(name: &str) -> Option<Easing> {
        preset(name).map(Easing::Preset)
    }

    pub fn apply(&self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::Preset(curve) => curve.evaluate(t),
            Easing::Curve(curve) => curve.evaluate(t),
        }
    }
}
