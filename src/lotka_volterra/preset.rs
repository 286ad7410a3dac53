//! Named parameter bundles.

use serde::{Deserialize, Serialize};

use crate::Float;

use super::model::{ModelParameters, State};

/// Model inputs before they become a request: rates, initial populations
/// and the simulated duration starting from `t = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub parameters: ModelParameters,
    pub initial: State,
    pub t_max: Float,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            parameters: ModelParameters::default(),
            initial: State::default(),
            t_max: 50.0,
        }
    }
}

/// Fixed scenarios that replace every model input when selected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    /// Keep the inputs as given.
    #[default]
    None,
    /// Large periodic cycles around the equilibrium (10, 10).
    StableEcosystem,
    /// Predation twice as strong, starting with few prey and many predators.
    SharpPreyDecline,
}

impl Preset {
    pub const ALL: [Preset; 3] = [
        Preset::None,
        Preset::StableEcosystem,
        Preset::SharpPreyDecline,
    ];

    /// The bundle this preset stands for, or `None` for [`Preset::None`].
    pub fn scenario(self) -> Option<Scenario> {
        match self {
            Preset::None => None,
            Preset::StableEcosystem => Some(Scenario {
                parameters: ModelParameters::new(1.0, 0.1, 0.1, 1.0),
                initial: State::new(50.0, 10.0),
                t_max: 50.0,
            }),
            Preset::SharpPreyDecline => Some(Scenario {
                parameters: ModelParameters::new(1.0, 0.2, 0.1, 1.0),
                initial: State::new(20.0, 15.0),
                t_max: 50.0,
            }),
        }
    }

    /// Replaces `inputs` entirely unless this is [`Preset::None`].
    pub fn apply(self, inputs: Scenario) -> Scenario {
        self.scenario().unwrap_or(inputs)
    }

    pub fn label(self) -> &'static str {
        match self {
            Preset::None => "none",
            Preset::StableEcosystem => "stable ecosystem",
            Preset::SharpPreyDecline => "sharp prey decline",
        }
    }
}
