//! Optional request file and merging it with command-line flags.

use std::path::Path;

use serde::Deserialize;

use lvsim::{
    Float,
    lotka_volterra::{DEFAULT_GRID_POINTS, ModelParameters, Preset, Scenario, State},
};

use crate::{
    cli::{Chart, InputArgs, SolverMethod},
    error::{CliError, CliResult},
};

/// Contents of a YAML or JSON request file. Every key is optional.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RequestFile {
    pub preset: Option<Preset>,
    pub alpha: Option<Float>,
    pub beta: Option<Float>,
    pub delta: Option<Float>,
    pub gamma: Option<Float>,
    pub prey: Option<Float>,
    pub predator: Option<Float>,
    pub t_max: Option<Float>,
    pub points: Option<usize>,
    pub method: Option<SolverMethod>,
    pub rtol: Option<Float>,
    pub atol: Option<Float>,
    pub chart: Option<Chart>,
}

impl RequestFile {
    /// Reads `path` as JSON when it ends in `.json`, YAML otherwise.
    pub fn load(path: &Path) -> CliResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            serde_json::from_str(&text).map_err(|source| CliError::ConfigJson {
                path: path.to_path_buf(),
                source,
            })
        } else {
            serde_yaml::from_str(&text).map_err(|source| CliError::ConfigYaml {
                path: path.to_path_buf(),
                source,
            })
        }
    }
}

/// Fully resolved run configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub preset: Preset,
    pub scenario: Scenario,
    pub points: usize,
    pub method: SolverMethod,
    pub rtol: Float,
    pub atol: Float,
    pub chart: Chart,
}

struct Bound {
    name: &'static str,
    min: Float,
    max: Float,
    default: Float,
}

impl Bound {
    const fn new(name: &'static str, min: Float, max: Float, default: Float) -> Self {
        Self {
            name,
            min,
            max,
            default,
        }
    }

    fn resolve(&self, flag: Option<Float>, file: Option<Float>) -> CliResult<Float> {
        let value = flag.or(file).unwrap_or(self.default);
        if !(value >= self.min && value <= self.max) {
            return Err(CliError::OutOfBounds {
                name: self.name,
                value,
                min: self.min,
                max: self.max,
            });
        }
        Ok(value)
    }
}

const ALPHA: Bound = Bound::new("alpha", 0.1, 5.0, 1.0);
const BETA: Bound = Bound::new("beta", 0.1, 5.0, 0.1);
const DELTA: Bound = Bound::new("delta", 0.1, 5.0, 0.1);
const GAMMA: Bound = Bound::new("gamma", 0.1, 5.0, 1.0);
const PREY: Bound = Bound::new("prey", 1.0, 1000.0, 40.0);
const PREDATOR: Bound = Bound::new("predator", 1.0, 1000.0, 9.0);
const T_MAX: Bound = Bound::new("t-max", 1.0, 100.0, 50.0);

/// Flags win over the request file, which wins over defaults. Raw inputs
/// are bounds-checked before a preset replaces them.
pub fn resolve(args: &InputArgs, file: RequestFile) -> CliResult<RunConfig> {
    let raw = Scenario {
        parameters: ModelParameters::new(
            ALPHA.resolve(args.alpha, file.alpha)?,
            BETA.resolve(args.beta, file.beta)?,
            DELTA.resolve(args.delta, file.delta)?,
            GAMMA.resolve(args.gamma, file.gamma)?,
        ),
        initial: State::new(
            PREY.resolve(args.prey, file.prey)?,
            PREDATOR.resolve(args.predator, file.predator)?,
        ),
        t_max: T_MAX.resolve(args.t_max, file.t_max)?,
    };

    let preset = args.preset.map(Preset::from).or(file.preset).unwrap_or_default();
    let points = args.points.or(file.points).unwrap_or(DEFAULT_GRID_POINTS);
    if points == 0 {
        return Err(CliError::NoPoints);
    }

    Ok(RunConfig {
        preset,
        scenario: preset.apply(raw),
        points,
        method: args.method.or(file.method).unwrap_or_default(),
        rtol: args.rtol.or(file.rtol).unwrap_or(1e-6),
        atol: args.atol.or(file.atol).unwrap_or(1e-6),
        chart: args.chart.or(file.chart).unwrap_or_default(),
    })
}
