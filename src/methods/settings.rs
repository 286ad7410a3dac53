//! Settings for numerical integrators

use std::ops::Index;

use bon::Builder;

use crate::{
    Float,
    error::{Error, InputError, SettingsError},
};

/// Settings for the numerical integrators.
///
/// Optional fields fall back to method-specific defaults documented on each
/// integrator. Build with [`Settings::builder`] or use [`Settings::default`].
#[derive(Builder, Clone, Debug, PartialEq)]
pub struct Settings {
    /// The rounding unit, typically machine epsilon.
    #[builder(default = 2.3e-16)]
    pub uround: Float,
    /// Safety factor in step-size prediction.
    #[builder(default = 0.9)]
    pub safety_factor: Float,
    /// Parameter for step size selection where scale_min <= hnew/hold <= scale_max
    pub scale_min: Option<Float>,
    /// Parameter for step size selection where scale_min <= hnew/hold <= scale_max
    pub scale_max: Option<Float>,
    /// Beta factor for stabilized step size control. Positive values of Beta
    /// ( <= 0.04 ) make the step size control more stable. Only used by DOPRI5.
    pub beta: Option<Float>,
    /// Maximal step size. Default is `|xend - x0|`.
    pub h_max: Option<Float>,
    /// Initial step size. None will result in an initial guess
    /// provided by the [`hinit`](crate::methods::hinit::hinit) function.
    pub h0: Option<Float>,
    /// Maximum number of allowed steps.
    #[builder(default = 100_000)]
    pub max_steps: usize,
    /// Number of accepted steps between stiffness tests. None disables the test.
    pub stiff_test: Option<usize>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings::builder().build()
    }
}

impl Settings {
    /// Checks the settings shared by every method, pushing each violation.
    pub(crate) fn validate_common(&self, errors: &mut Vec<SettingsError>) {
        if self.uround <= 1e-35 || self.uround >= 1.0 {
            errors.push(SettingsError::URoundOutOfRange(self.uround));
        }
        if self.safety_factor >= 1.0 || self.safety_factor <= 1e-4 {
            errors.push(SettingsError::SafetyFactorOutOfRange(self.safety_factor));
        }
        if self.max_steps == 0 {
            errors.push(SettingsError::MaxStepsMustBePositive(self.max_steps));
        }
        if let Some(h) = self.h_max {
            if !(h.is_finite() && h != 0.0) {
                errors.push(SettingsError::InvalidMaxStep(h));
            }
        }
        if let Some(h) = self.h0 {
            if !(h.is_finite() && h != 0.0) {
                errors.push(SettingsError::InvalidStepSize(h));
            }
        }
    }
}

/// Tolerance enum to allow scalar or vector tolerances
/// using [`Into`] trait for easy conversion from `Float`, `[Float; N]`, or `Vec<Float>`
/// users do not need to know or worry this simply allows both
/// `Float` and `[Float; N]` to be passed in as arguments.
#[derive(Clone, Debug, PartialEq)]
pub enum Tolerance {
    Scalar(Float),
    Vector(Vec<Float>),
}

impl Tolerance {
    /// Checks that a vector tolerance covers exactly `n` state components.
    pub(crate) fn check_len(&self, which: &'static str, n: usize) -> Result<(), Error> {
        match self {
            Tolerance::Vector(vs) if vs.len() != n => Err(InputError::ToleranceLength {
                which,
                got: vs.len(),
                expected: n,
            }
            .into()),
            _ => Ok(()),
        }
    }

    /// Raises every component in `[0, min)` to `min`. Negative and NaN
    /// components are left for [`validate`](Self::validate) to report.
    pub(crate) fn floored(&self, min: Float) -> Tolerance {
        let floor = |v: Float| if v >= 0.0 && v < min { min } else { v };
        match self {
            Tolerance::Scalar(v) => Tolerance::Scalar(floor(*v)),
            Tolerance::Vector(vs) => Tolerance::Vector(vs.iter().copied().map(floor).collect()),
        }
    }

    /// Pushes an error for every negative or non-finite component.
    pub(crate) fn validate(&self, errors: &mut Vec<SettingsError>) {
        let values = match self {
            Tolerance::Scalar(v) => std::slice::from_ref(v),
            Tolerance::Vector(vs) => vs.as_slice(),
        };
        for &v in values {
            if !(v.is_finite() && v >= 0.0) {
                errors.push(SettingsError::InvalidTolerance(v));
            }
        }
    }
}

impl From<Float> for Tolerance {
    fn from(val: Float) -> Self {
        Tolerance::Scalar(val)
    }
}

impl From<&[Float]> for Tolerance {
    fn from(val: &[Float]) -> Self {
        Tolerance::Vector(val.to_vec())
    }
}

impl<const N: usize> From<[Float; N]> for Tolerance {
    fn from(val: [Float; N]) -> Self {
        Tolerance::Vector(val.to_vec())
    }
}

impl From<Vec<Float>> for Tolerance {
    fn from(val: Vec<Float>) -> Self {
        Tolerance::Vector(val)
    }
}

impl Index<usize> for Tolerance {
    type Output = Float;

    fn index(&self, index: usize) -> &Self::Output {
        match self {
            Tolerance::Scalar(v) => v,
            Tolerance::Vector(vs) => &vs[index],
        }
    }
}
