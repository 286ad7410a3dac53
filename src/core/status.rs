//! Status codes for integrators

use std::fmt;

/// How an integration run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Reached `xend`.
    Success,
    /// A [`SolOut`](crate::core::solout::SolOut) callback asked to stop.
    UserInterrupt,
    /// The step budget ran out before `xend`.
    NeedLargerNMax,
    /// The step size collapsed below machine resolution.
    StepSizeTooSmall,
    /// The stiffness test fired repeatedly.
    ProbablyStiff,
}

impl Status {
    pub fn is_success(&self) -> bool {
        matches!(self, Status::Success)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Status::Success => "integration reached the end of the span",
            Status::UserInterrupt => "interrupted by the output callback",
            Status::NeedLargerNMax => "maximum number of steps exceeded",
            Status::StepSizeTooSmall => "step size became too small",
            Status::ProbablyStiff => "problem appears to be stiff",
        };
        f.write_str(msg)
    }
}
